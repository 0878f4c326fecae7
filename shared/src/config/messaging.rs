//! Transient message lifecycle configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before a success message is cleared
pub const DEFAULT_SUCCESS_MESSAGE_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessagingConfig {
    /// Milliseconds a success message stays visible before auto-clear
    #[serde(default = "default_success_message_ttl_ms")]
    pub success_message_ttl_ms: u64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            success_message_ttl_ms: DEFAULT_SUCCESS_MESSAGE_TTL_MS,
        }
    }
}

impl MessagingConfig {
    pub fn success_message_ttl(&self) -> Duration {
        Duration::from_millis(self.success_message_ttl_ms)
    }
}

fn default_success_message_ttl_ms() -> u64 {
    DEFAULT_SUCCESS_MESSAGE_TTL_MS
}
