//! Observable state of a portal session

use serde::Serialize;

use crate::domain::{Contact, Step};

/// Session-scoped state driven by [`PortalSession`](super::PortalSession).
///
/// `error_message` and `success_message` are never both set once a handler
/// returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PortalState {
    pub step: Step,
    pub email: String,
    pub verification_code: String,
    /// Present only after a successful verification
    pub contact: Option<Contact>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    /// True only while a remote call is outstanding
    pub is_loading: bool,
    /// Bumped on every write to the message fields; identifies the
    /// success message an auto-clear timer was armed for
    #[serde(skip)]
    pub(crate) message_seq: u64,
    /// Bumped by navigation; a remote call settling under a different
    /// epoch than it was dispatched with is discarded
    #[serde(skip)]
    pub(crate) nav_epoch: u64,
}

impl PortalState {
    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn has_success(&self) -> bool {
        self.success_message.is_some()
    }

    pub(crate) fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
        self.message_seq += 1;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.success_message = None;
        self.message_seq += 1;
    }

    /// Set the success message and return the sequence number to arm the
    /// auto-clear with. An empty message leaves the field unset.
    pub(crate) fn set_success(&mut self, message: impl Into<String>) -> Option<u64> {
        let message = message.into();
        self.error_message = None;
        self.message_seq += 1;
        if message.is_empty() {
            self.success_message = None;
            None
        } else {
            self.success_message = Some(message);
            Some(self.message_seq)
        }
    }

    pub(crate) fn navigate(&mut self, step: Step) {
        self.step = step;
        self.nav_epoch += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.navigate(Step::EmailEntry);
        self.email.clear();
        self.verification_code.clear();
        self.contact = None;
        self.clear_messages();
    }
}
