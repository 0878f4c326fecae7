//! Error types of the verification flow.

mod types;

#[cfg(test)]
mod tests;

pub use types::{GatewayError, GatewayErrorBody, ValidationError, GENERIC_ERROR_MESSAGE};

/// Result of a remote gateway call
pub type GatewayResult<T> = Result<T, GatewayError>;
