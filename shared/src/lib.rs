//! Shared utilities and common types for the contact portal
//!
//! This crate provides common functionality used across all portal crates:
//! - Configuration types
//! - Email utilities (syntax check, masking for logs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    Environment, GatewayConfig, GatewayProvider, LogFormat, LoggingConfig, MessagingConfig,
    PortalConfig,
};
pub use utils::email;
