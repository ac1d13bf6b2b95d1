//! Log configuration.

use std::str::FromStr;

use reviewbot_config::Config;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,sqlx=warn,actix_web=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not set tracing global default subscriber: {source}")]
    SetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize log tracer: {source}")]
    LogTracerError {
        source: tracing::log::SetLoggerError,
    },
    #[error("Wrong env filter configuration '{configuration}': {source}")]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

fn env_filter_configuration(rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV_CONFIG.to_string())
}

/// Configure logging.
///
/// Human-readable tree output by default, Bunyan JSON lines when enabled.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::LogTracerError { source: e })?;

    let log_config = env_filter_configuration(std::env::var("RUST_LOG").ok());
    let filter_layer = EnvFilter::from_str(&log_config).map_err(|e| {
        LoggingError::EnvFilterConfigurationError {
            source: e,
            configuration: log_config,
        }
    })?;

    let use_bunyan = config.logging.use_bunyan;
    let hierarchical_layer = (!use_bunyan).then(|| {
        HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true)
    });
    let json_storage_layer = use_bunyan.then_some(JsonStorageLayer);
    let bunyan_layer = use_bunyan.then(|| {
        BunyanFormattingLayer::new(
            format!("{}-{}", config.name, config.version),
            std::io::stdout,
        )
    });

    let subscriber = tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(filter_layer)
        .with(hierarchical_layer)
        .with(json_storage_layer)
        .with(bunyan_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::SetGlobalDefaultError { source: e })?;

    Ok(())
}
