use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webpx_core::{
    first_working_and_active_converter_id, load_config, validate_config, working_converter_ids,
    Config, Converter,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Converter selection as seen by the conversion engine and the settings UI.
#[derive(Debug, Serialize)]
struct ConverterReport {
    /// Configured converters followed by the missing defaults.
    effective: Vec<Converter>,
    working_ids: Vec<String>,
    first_working_and_active: Option<String>,
}

impl ConverterReport {
    fn from_config(config: &Config) -> Self {
        Self {
            effective: config.effective_converters(),
            working_ids: working_converter_ids(config)
                .into_iter()
                .map(str::to_string)
                .collect(),
            first_working_and_active: first_working_and_active_converter_id(config)
                .map(str::to_string),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("webpx-converters v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("WEBPX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));

    let report = build_report(&config_path)?;
    match &report.first_working_and_active {
        Some(id) => info!("Selected converter: {}", id),
        None => info!("No working and active converter configured"),
    }

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}

fn build_report(config_path: &Path) -> Result<ConverterReport> {
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;
    info!(
        converters = config.converters().len(),
        "Configuration loaded successfully"
    );

    Ok(ConverterReport::from_config(&config))
}
