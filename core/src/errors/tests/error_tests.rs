//! Unit tests for validation and gateway error types

use serde_json::json;

use crate::errors::{GatewayError, GatewayErrorBody, ValidationError, GENERIC_ERROR_MESSAGE};

#[test]
fn test_validation_messages_match_user_facing_text() {
    assert_eq!(ValidationError::EmailMissing.to_string(), "Please enter your email address");
    assert_eq!(ValidationError::EmailInvalid.to_string(), "Please enter a valid email address");
    assert_eq!(ValidationError::CodeMissing.to_string(), "Please enter the verification code");
    assert_eq!(ValidationError::CodeLength.to_string(), "Verification code must be 6 digits");
    assert_eq!(
        ValidationError::CodeNotNumeric.to_string(),
        "Verification code must contain only numbers"
    );
}

#[test]
fn test_validation_error_fields() {
    assert_eq!(ValidationError::EmailInvalid.field(), "email");
    assert_eq!(ValidationError::CodeNotNumeric.field(), "verification_code");
    assert_eq!(ValidationError::CodeLength.code(), "CODE_LENGTH");
}

#[test]
fn test_body_message_takes_precedence() {
    let error = GatewayError {
        body: Some(GatewayErrorBody {
            message: Some("Code expired".to_string()),
        }),
        message: Some("Request failed".to_string()),
        status: Some(400),
    };
    assert_eq!(error.user_message(), "Code expired");
}

#[test]
fn test_top_level_message_used_without_body_message() {
    let error = GatewayError {
        body: Some(GatewayErrorBody { message: None }),
        message: Some("Network unreachable".to_string()),
        status: None,
    };
    assert_eq!(error.user_message(), "Network unreachable");
    assert_eq!(GatewayError::with_message("Timed out").user_message(), "Timed out");
}

#[test]
fn test_empty_messages_fall_through_to_generic() {
    let error = GatewayError {
        body: Some(GatewayErrorBody {
            message: Some(String::new()),
        }),
        message: Some(String::new()),
        status: None,
    };
    assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    assert_eq!(GatewayError::unknown().user_message(), GENERIC_ERROR_MESSAGE);
}

#[test]
fn test_gateway_error_deserializes_from_opaque_json() {
    let error: GatewayError = serde_json::from_value(json!({
        "body": { "message": "Too many requests" },
        "status": 429
    }))
    .unwrap();
    assert_eq!(error.user_message(), "Too many requests");
    assert_eq!(error.to_string(), "Gateway error (429): Too many requests");
}

#[test]
fn test_gateway_error_display_without_status_is_a_std_error() {
    let error = GatewayError::with_message("Network unreachable");
    assert_eq!(error.to_string(), "Gateway error: Network unreachable");

    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(GatewayError::unknown());
    assert_eq!(
        boxed.to_string(),
        format!("Gateway error: {}", GENERIC_ERROR_MESSAGE)
    );
    assert!(boxed.source().is_none());
}
