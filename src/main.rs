//! Finnboard main entry point

use anyhow::Context;
use clap::Parser;
use finnboard_api::start_server;
use finnboard_config::{Config, ConfigError};
use finnboard_core::TransactionBook;
use finnboard_source::{FixtureSource, JsonFileSource, SourceRef};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "finnboard")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal-finance dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Load the config file; a missing file means defaults
fn load_config(path: &Path) -> anyhow::Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, true)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), false)),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to load configuration from {}: {}",
            path.display(),
            e.to_details()
        )),
    }
}

fn record_source(config: &Config) -> SourceRef {
    let data_path = config.data_file_path();
    if config.data.use_fixture {
        log::info!("Using built-in sample data");
        Arc::new(FixtureSource)
    } else if data_path.exists() {
        Arc::new(JsonFileSource::new(data_path))
    } else {
        log::warn!(
            "Data file not found: {}, using built-in sample data",
            data_path.display()
        );
        Arc::new(FixtureSource)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, found) = load_config(&args.config)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    if found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }

    let mut book = TransactionBook::new(record_source(&config));
    match book.load().await {
        Ok(count) => log::info!("Loaded {} transactions", count),
        Err(e) => log::error!("Failed to load records: {}", e),
    }

    start_server(config, Arc::new(RwLock::new(book)))
        .await
        .context("Server error")?;

    Ok(())
}
