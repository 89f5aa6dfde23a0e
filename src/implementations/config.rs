use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{PoolConfig, PropertyOptions};
use crate::implementations::pool::PropertyPool;
use crate::implementations::property::Property;
use crate::models::value::PropertyValue;

/// Environment variable naming the seed file when none is given explicitly
pub const CONFIG_ENV_VAR: &str = "PROPBUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Initial value of a seeded property. The variant decides the payload type.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SeedValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PropertySeed {
    pub name: String,

    pub value: SeedValue,

    /// Group tag used by `$group` subscriptions
    #[serde(default)]
    pub group: String,

    /// Display template, see `Property::formatted`
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub locked: bool,
}

/// A YAML file describing pool policies and the properties to preload
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PoolFile {
    #[serde(flatten)]
    pub config: PoolConfig,

    #[serde(default)]
    pub properties: Vec<PropertySeed>,
}

impl PoolFile {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let file: PoolFile = serde_yaml::from_str(contents)?;
        Ok(file)
    }

    /// Path named by `PROPBUS_CONFIG`
    pub fn env_path() -> Result<PathBuf, ConfigError> {
        std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .map_err(|_| ConfigError::EnvVarNotFound(CONFIG_ENV_VAR.to_string()))
    }

    /// Build a pool with these policies and every seed registered, in file order
    pub fn build_pool(&self) -> PropertyPool {
        let mut pool = PropertyPool::with_config(self.config);
        for seed in &self.properties {
            let options = PropertyOptions {
                format: seed.format.clone(),
                ..self.config.property_options(&seed.group, seed.locked)
            };
            match &seed.value {
                SeedValue::Bool(v) => register_seed(&mut pool, seed, *v, options),
                SeedValue::Integer(v) => register_seed(&mut pool, seed, *v, options),
                SeedValue::Float(v) => register_seed(&mut pool, seed, *v, options),
                SeedValue::Text(v) => register_seed(&mut pool, seed, v.clone(), options),
            }
        }
        debug!("Built pool with {} properties from config", pool.len());
        pool
    }
}

fn register_seed<T: PropertyValue>(
    pool: &mut PropertyPool,
    seed: &PropertySeed,
    value: T,
    options: PropertyOptions,
) {
    pool.register(&Property::with_options(seed.name.as_str(), value, options));
}
