//! Input guards consulted before any remote call.
//!
//! Each validator reports the first failing rule as a [`ValidationError`]
//! whose display text is the message shown to the user. Rules are checked
//! in a fixed order so a given malformed input always yields the same
//! message.

use cp_shared::email::is_valid_email_format;

use crate::errors::ValidationError;

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

/// Validate an email address: missing, then format.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailMissing);
    }

    if !is_valid_email_format(email) {
        return Err(ValidationError::EmailInvalid);
    }

    Ok(())
}

/// Validate a verification code: missing, then length, then digits.
///
/// Length is counted in characters, so a six-character string containing a
/// non-ASCII digit fails on content, not on length.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::CodeMissing);
    }

    if code.chars().count() != CODE_LENGTH {
        return Err(ValidationError::CodeLength);
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::CodeNotNumeric);
    }

    Ok(())
}

pub fn is_email_valid(email: &str) -> bool {
    validate_email(email).is_ok()
}

pub fn is_code_valid(code: &str) -> bool {
    validate_code(code).is_ok()
}
