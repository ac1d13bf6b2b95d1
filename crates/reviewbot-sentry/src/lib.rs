//! Sentry integration.

use std::{future::Future, str::FromStr};

use reviewbot_config::Config;
pub use sentry;
use sentry::{
    integrations::debug_images::DebugImagesIntegration, types::Dsn, ClientInitGuard, ClientOptions,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SentryError {
    #[error("Invalid Sentry URL: {source}")]
    InvalidUrl { source: sentry::types::ParseDsnError },
}

fn init_client(config: &Config) -> Result<Option<ClientInitGuard>, SentryError> {
    if config.sentry.url.is_empty() {
        return Ok(None);
    }

    let dsn =
        Dsn::from_str(&config.sentry.url).map_err(|e| SentryError::InvalidUrl { source: e })?;
    info!(message = "Sentry integration enabled");

    let mut options = ClientOptions::new().add_integration(DebugImagesIntegration::default());
    options.dsn = Some(dsn);
    options.default_integrations = true;
    options.in_app_exclude.push("actix");
    options.in_app_exclude.push("sentry");
    options.in_app_exclude.push("tokio");
    options.release = Some(config.version.clone().into());
    options.attach_stacktrace = true;
    options.traces_sample_rate = config.sentry.traces_sample_rate;

    Ok(Some(sentry::init(options)))
}

/// Run `func` with the Sentry client configured, when a Sentry URL is set.
pub async fn with_sentry_configuration<T, Fut, E>(config: &Config, func: T) -> Result<(), E>
where
    T: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: From<SentryError>,
{
    let _guard = init_client(config)?;

    func().await
}
