use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "propbus",
    about = "Inspect and drive a pool of reactive properties",
    version,
    author,
    long_about = None
)]
pub struct PropbusCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to the pool seed file (falls back to PROPBUS_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every registered property
    Show,

    /// List the properties a subscription pattern resolves to
    Match {
        /// Name glob, or `$`-prefixed group glob
        pattern: String,
    },

    /// Write a value and report the change notifications it caused
    Set {
        /// Registered property name
        name: String,

        /// New value, parsed according to the property's type
        value: String,

        /// Pattern to watch while writing (defaults to the property name)
        #[arg(short, long)]
        watch: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(format_str: &str) -> Result<Self> {
        match format_str.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unsupported output format: {}", format_str)),
        }
    }
}
