//! # Infrastructure Layer
//!
//! Concrete implementations behind the contact portal's core:
//! - **Gateway**: HTTP client for the verification backend, plus an
//!   in-memory backend for development
//! - **Config**: layered configuration from defaults, `.env` files and
//!   `PORTAL_*` environment variables
//! - **Telemetry**: tracing subscriber setup

use cp_core::PortalSession;
use cp_shared::PortalConfig;

pub mod config;
pub mod gateway;
pub mod telemetry;

pub use config::load_config;
pub use gateway::{create_gateway, HttpVerificationGateway, InMemoryVerificationBackend};
pub use telemetry::init_tracing;

/// Wire a new portal session to the gateway selected by `config`
pub fn build_session(config: &PortalConfig) -> Result<PortalSession, InfrastructureError> {
    let gateway = create_gateway(&config.gateway)?;
    Ok(PortalSession::new(gateway, config.messaging))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration source or deserialization error
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber setup error
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
