//! Error types for input validation and remote gateway failures
//!
//! Validation errors render the exact text shown to the user. Gateway
//! errors are opaque values whose user-facing text is extracted with a
//! fixed precedence (see [`GatewayError::user_message`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback text when a gateway failure carries no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Guard failures detected before any network call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    EmailMissing,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Please enter the verification code")]
    CodeMissing,

    #[error("Verification code must be 6 digits")]
    CodeLength,

    #[error("Verification code must contain only numbers")]
    CodeNotNumeric,
}

impl ValidationError {
    /// Stable machine-readable code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmailMissing => "EMAIL_MISSING",
            ValidationError::EmailInvalid => "EMAIL_INVALID",
            ValidationError::CodeMissing => "CODE_MISSING",
            ValidationError::CodeLength => "CODE_LENGTH",
            ValidationError::CodeNotNumeric => "CODE_NOT_NUMERIC",
        }
    }

    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmailMissing | ValidationError::EmailInvalid => "email",
            ValidationError::CodeMissing
            | ValidationError::CodeLength
            | ValidationError::CodeNotNumeric => "verification_code",
        }
    }
}

/// Structured error payload nested inside a gateway failure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatewayErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Opaque failure raised by `requestCode` or `verifyCode`.
///
/// Transport, validation and business-rule failures (rate limiting, expired
/// codes, unknown contacts) all arrive in this shape; the backend decides
/// which fields are filled.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[error("Gateway error{}: {}", self.status_label(), self.user_message())]
pub struct GatewayError {
    /// Structured payload, preferred when it carries a message
    #[serde(default)]
    pub body: Option<GatewayErrorBody>,
    /// Top-level message
    #[serde(default)]
    pub message: Option<String>,
    /// HTTP status, when the failure came from an HTTP response
    #[serde(default)]
    pub status: Option<u16>,
}

impl GatewayError {
    /// Failure whose structured body carries `message`
    pub fn with_body_message(message: impl Into<String>) -> Self {
        Self {
            body: Some(GatewayErrorBody {
                message: Some(message.into()),
            }),
            ..Default::default()
        }
    }

    /// Failure with only a top-level message (transport errors and the like)
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Failure with no usable message at all
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Human-readable message: nested body message, then top-level
    /// message, then [`GENERIC_ERROR_MESSAGE`]. Empty strings count as absent.
    pub fn user_message(&self) -> String {
        self.body
            .as_ref()
            .and_then(|body| non_empty(body.message.as_deref()))
            .or_else(|| non_empty(self.message.as_deref()))
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string()
    }

    fn status_label(&self) -> String {
        self.status
            .map(|status| format!(" ({})", status))
            .unwrap_or_default()
    }
}


fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
