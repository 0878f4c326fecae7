//! Request and response shapes of the two remote verification operations.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Contact;

/// `requestCode` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

impl SendCodeRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

/// `requestCode` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl SendCodeResponse {
    /// Successful delivery with the server's confirmation text
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Well-formed refusal without a raised error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `verifyCode` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

impl VerifyCodeRequest {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
        }
    }
}

/// `verifyCode` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub contact: Contact,
    /// Explanation some backends attach to `success: false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyCodeResponse {
    pub fn verified(contact: Contact) -> Self {
        Self {
            success: true,
            contact,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            contact: Contact::default(),
            message: Some(message.into()),
        }
    }
}
