//! Tracing subscriber initialization

use cp_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::InfrastructureError;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Telemetry(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colored)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.colored)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
    };

    result.map_err(|e| InfrastructureError::Telemetry(e.to_string()))?;
    tracing::info!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}
