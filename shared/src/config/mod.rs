//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `gateway` - Verification backend endpoints and timeouts
//! - `messaging` - Success message auto-clear timing

pub mod environment;
pub mod gateway;
pub mod messaging;

use serde::{Deserialize, Serialize};

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use gateway::{GatewayConfig, GatewayProvider};
pub use messaging::{MessagingConfig, DEFAULT_SUCCESS_MESSAGE_TTL_MS};

/// Complete portal configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl PortalConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            gateway: GatewayConfig::default(),
            messaging: MessagingConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_portal_config() {
        let config = PortalConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.messaging.success_message_ttl_ms, 3000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PortalConfig = serde_json::from_str(
            r#"{"environment":"production","gateway":{"base_url":"https://backend.example.com"}}"#,
        )
        .unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.gateway.base_url, "https://backend.example.com");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.messaging, MessagingConfig::default());
    }
}
