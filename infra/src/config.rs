//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. [`PortalConfig::for_environment`] defaults
//! 2. `.env.<environment>` and `.env` files (via `dotenvy`)
//! 3. `PORTAL_*` environment variables, `__` separating nested keys
//!    (e.g. `PORTAL_GATEWAY__BASE_URL`, `PORTAL_MESSAGING__SUCCESS_MESSAGE_TTL_MS`)

use cp_shared::{Environment, LogFormat, PortalConfig};
use tracing::debug;

use crate::InfrastructureError;

const ENV_PREFIX: &str = "PORTAL";

/// Load configuration from dotenv files and the process environment
pub fn load_config() -> Result<PortalConfig, InfrastructureError> {
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let config = build_config(environment, env_source())?;

    debug!(
        environment = %config.environment,
        provider = ?config.gateway.provider,
        base_url = %config.gateway.base_url,
        "Portal configuration loaded"
    );
    Ok(config)
}

fn env_source() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Layer `source` over the defaults for `environment`
pub fn build_config(
    environment: Environment,
    source: ::config::Environment,
) -> Result<PortalConfig, InfrastructureError> {
    let defaults = PortalConfig::for_environment(environment);
    let logging = &defaults.logging;

    let settings = ::config::Config::builder()
        .set_default("environment", environment.to_string())?
        .set_default("logging.level", logging.level.clone())?
        .set_default("logging.format", log_format_name(logging.format))?
        .set_default("logging.colored", logging.colored)?
        .set_default("logging.source_location", logging.source_location)?
        .add_source(source)
        .build()?;

    let config: PortalConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn log_format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
        LogFormat::Compact => "compact",
    }
}

fn validate(config: &PortalConfig) -> Result<(), InfrastructureError> {
    let base_url = &config.gateway.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(InfrastructureError::Config(format!(
            "gateway.base_url must be an http(s) URL, got {:?}",
            base_url
        )));
    }
    if config.gateway.timeout_secs == 0 {
        return Err(InfrastructureError::Config(
            "gateway.timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
