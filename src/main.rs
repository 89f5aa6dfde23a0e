use std::path::Path;

use anyhow::Result;
use clap::Parser;
use log::info;

use propbus::{ConfigError, PoolFile};

mod cli;
use cli::{Commands, OutputFormat, PropbusCli};

fn main() -> Result<()> {
    // A .env file may name the seed file through PROPBUS_CONFIG
    dotenv::dotenv().ok();

    // Parse the command line arguments
    let cli = PropbusCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    let format = OutputFormat::parse(&cli.output_format)?;
    let pool = load_pool_file(cli.config.as_deref())?.build_pool();
    info!("Pool ready with {} properties", pool.len());

    match &cli.command {
        Commands::Show => cli::commands::show::execute(&pool, format),
        Commands::Match { pattern } => cli::commands::matches::execute(&pool, pattern, format),
        Commands::Set { name, value, watch } => {
            cli::commands::set::execute(&pool, name, value, watch.as_deref(), format)
        }
    }
}

/// Seed file from `--config`, else `PROPBUS_CONFIG`, else an empty pool
fn load_pool_file(path: Option<&Path>) -> Result<PoolFile> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match PoolFile::env_path() {
            Ok(path) => path,
            Err(ConfigError::EnvVarNotFound(var)) => {
                info!("No --config given and {} is not set; starting with an empty pool", var);
                return Ok(PoolFile::default());
            }
            Err(e) => return Err(e.into()),
        },
    };

    info!("Loading pool from {}", path.display());
    let file = PoolFile::from_file(&path).map_err(|e| {
        cli::ui::print_error(&format!("{}: {}", path.display(), e));
        e
    })?;
    Ok(file)
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
