//! Environment detection and logging configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development against a mock or sandbox backend
    #[default]
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Read the environment from `PORTAL_ENV`, falling back to `ENVIRONMENT`
    pub fn from_env() -> Self {
        env::var("PORTAL_ENV")
            .or_else(|_| env::var("ENVIRONMENT"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Name of the dotenv file loaded for this environment
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Staging => ".env.staging",
            Environment::Production => ".env.production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration consumed by the tracing subscriber
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error); `RUST_LOG` wins when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// ANSI colors (terminal only)
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Include file and line of the log call site
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_log_format(),
            colored: default_colored(),
            source_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                colored: true,
                source_location: true,
            },
            Environment::Staging => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
            Environment::Production => Self {
                level: String::from("warn"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

fn default_level() -> String {
    String::from("info")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_colored() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("invalid".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_display_round_trips_through_parse() {
        for env in [Environment::Development, Environment::Staging, Environment::Production] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
        assert_eq!(Environment::Production.env_file(), ".env.production");
    }

    #[test]
    fn test_logging_config_for_environment() {
        let dev_log = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev_log.level, "debug");
        assert_eq!(dev_log.format, LogFormat::Pretty);
        assert!(dev_log.source_location);

        let prod_log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod_log.level, "warn");
        assert_eq!(prod_log.format, LogFormat::Json);
        assert!(!prod_log.colored);
    }

    #[test]
    fn test_logging_config_deserializes_with_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format":"compact"}"#).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.colored);
    }
}
