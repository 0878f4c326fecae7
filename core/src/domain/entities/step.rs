//! Phases of the verification flow.

use serde::{Deserialize, Serialize};

/// The active phase of a portal session; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Initial step: the user types the email address to verify
    #[default]
    EmailEntry,
    /// A code was sent; the user types the 6-digit code
    CodeEntry,
    /// The code was accepted and the contact record is shown
    ContactDisplay,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::EmailEntry => "email_entry",
            Step::CodeEntry => "code_entry",
            Step::ContactDisplay => "contact_display",
        }
    }

    /// Whether the step is the terminal step of the happy path
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::ContactDisplay)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
