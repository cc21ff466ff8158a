use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, MediaInfoConfig};

/// Initialize tracing for the mediainfo step.
///
/// RUST_LOG wins over the configured filter. Returns an error when the filter
/// does not parse or a global subscriber is already installed.
pub fn init_tracing(config: &MediaInfoConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .with_context(|| format!("Invalid log filter '{}'", config.log_filter))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.effective_log_format() {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.context("Failed to install tracing subscriber")?;

    tracing::debug!(
        environment = %config.environment,
        error_policy = %config.error_policy,
        "Tracing initialized"
    );
    Ok(())
}
