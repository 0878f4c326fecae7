//! Verification state machine
//!
//! Sequences `requestCode` and `verifyCode`, runs the input guards before
//! each call and owns the transient message lifecycle. Every mutation is
//! published through a `watch` channel, so observers re-render after each
//! transition.

use std::sync::{Arc, Weak};

use cp_shared::email::mask_email;
use cp_shared::MessagingConfig;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    is_code_valid, is_email_valid, validate_code, validate_email, SendCodeRequest, Step,
    VerifyCodeRequest,
};
use crate::errors::{ValidationError, GENERIC_ERROR_MESSAGE};

use super::state::PortalState;
use super::traits::VerificationGateway;

/// Success message shown once the contact record is retrieved
pub const CONTACT_RETRIEVED_MESSAGE: &str = "Contact information retrieved successfully!";

/// What a submit action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote call succeeded and the session is now at this step
    Advanced(Step),
    /// A guard failed; no remote call was made
    Rejected(ValidationError),
    /// The remote call settled without success; carries the message shown
    Failed(String),
    /// Not available: a call is in flight or the current step has no such action
    Ignored,
    /// The remote call settled after `go_back` or `start_over`; its result was dropped
    Discarded,
}

/// One user's verification flow, from email entry to contact display.
///
/// Created per session and dropped with it; nothing is shared across
/// sessions. Handlers never return errors: every failure ends in
/// `error_message`.
pub struct PortalSession<G: VerificationGateway + ?Sized = dyn VerificationGateway> {
    id: Uuid,
    gateway: Arc<G>,
    state: Arc<watch::Sender<PortalState>>,
    messaging: MessagingConfig,
}

impl<G: VerificationGateway + ?Sized> PortalSession<G> {
    pub fn new(gateway: Arc<G>, messaging: MessagingConfig) -> Self {
        let (state, _) = watch::channel(PortalState::default());
        let id = Uuid::new_v4();

        debug!(session_id = %id, event = "session_created", "Portal session created");

        Self {
            id,
            gateway,
            state: Arc::new(state),
            messaging,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PortalState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state mutation
    pub fn subscribe(&self) -> watch::Receiver<PortalState> {
        self.state.subscribe()
    }

    pub fn step(&self) -> Step {
        self.state.borrow().step
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Derived flag for UI affordances; submit handlers re-run the full guard
    pub fn is_email_valid(&self) -> bool {
        is_email_valid(&self.state.borrow().email)
    }

    /// Derived flag for UI affordances; submit handlers re-run the full guard
    pub fn is_code_valid(&self) -> bool {
        is_code_valid(&self.state.borrow().verification_code)
    }

    pub fn handle_email_change(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.send_modify(|state| {
            state.email = email;
            state.clear_messages();
        });
    }

    pub fn handle_code_change(&self, code: impl Into<String>) {
        let code = code.into();
        self.state.send_modify(|state| {
            state.verification_code = code;
            state.clear_messages();
        });
    }

    /// Dismiss the error message, leaving any success message alone
    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Send a code to the entered email (EmailEntry only)
    pub async fn submit_email(&self) -> SubmitOutcome {
        match self.step() {
            Step::EmailEntry => self.send_code("submit_email").await,
            Step::CodeEntry | Step::ContactDisplay => self.ignore("submit_email"),
        }
    }

    /// Request a fresh code for the same email (CodeEntry only)
    pub async fn resend_code(&self) -> SubmitOutcome {
        match self.step() {
            Step::CodeEntry => self.send_code("resend_code").await,
            Step::EmailEntry | Step::ContactDisplay => self.ignore("resend_code"),
        }
    }

    /// Exchange the entered code for the contact record (CodeEntry only)
    pub async fn submit_code(&self) -> SubmitOutcome {
        const ACTION: &str = "submit_code";

        match self.step() {
            Step::CodeEntry => {}
            Step::EmailEntry | Step::ContactDisplay => return self.ignore(ACTION),
        }
        if self.is_loading() {
            return self.ignore(ACTION);
        }

        let (email, code) = {
            let state = self.state.borrow();
            (state.email.clone(), state.verification_code.clone())
        };
        if let Err(reason) = validate_email(&email).and_then(|_| validate_code(&code)) {
            return self.reject(ACTION, reason);
        }

        let Some(loading) = self.begin_loading() else {
            return self.ignore(ACTION);
        };

        info!(
            session_id = %self.id,
            email = %mask_email(&email),
            event = "code_verification_requested",
            "Verifying code"
        );

        let request = VerifyCodeRequest::new(email, code);
        match self.gateway.verify_code(&request).await {
            Ok(response) if response.success => {
                let field_count = response.contact.len();
                let mut armed = None;
                let settled = self.settle(&loading, |state| {
                    state.contact = Some(response.contact);
                    state.step = Step::ContactDisplay;
                    armed = state.set_success(CONTACT_RETRIEVED_MESSAGE);
                });
                if !settled {
                    return self.discard(ACTION);
                }
                if let Some(seq) = armed {
                    self.arm_auto_clear(seq);
                }

                info!(
                    session_id = %self.id,
                    contact_fields = field_count,
                    event = "contact_retrieved",
                    "Code verified, contact retrieved"
                );
                SubmitOutcome::Advanced(Step::ContactDisplay)
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
                self.fail(&loading, ACTION, message)
            }
            Err(error) => {
                debug!(session_id = %self.id, error = %error, "verifyCode raised an error");
                self.fail(&loading, ACTION, error.user_message())
            }
        }
    }

    /// Return to email entry, dropping the entered code (CodeEntry only)
    pub fn go_back(&self) -> Step {
        match self.step() {
            Step::CodeEntry => {
                self.state.send_modify(|state| {
                    state.navigate(Step::EmailEntry);
                    state.verification_code.clear();
                    state.clear_messages();
                });
                debug!(session_id = %self.id, event = "went_back", "Returned to email entry");
            }
            step @ (Step::EmailEntry | Step::ContactDisplay) => {
                debug!(session_id = %self.id, step = %step, "go_back ignored");
            }
        }
        self.step()
    }

    /// Clear every field and return to email entry
    pub fn start_over(&self) -> Step {
        self.state.send_modify(PortalState::reset);
        debug!(session_id = %self.id, event = "started_over", "Session reset");
        Step::EmailEntry
    }

    async fn send_code(&self, action: &'static str) -> SubmitOutcome {
        if self.is_loading() {
            return self.ignore(action);
        }

        let email = self.state.borrow().email.clone();
        if let Err(reason) = validate_email(&email) {
            return self.reject(action, reason);
        }

        let Some(loading) = self.begin_loading() else {
            return self.ignore(action);
        };

        info!(
            session_id = %self.id,
            action,
            email = %mask_email(&email),
            event = "code_requested",
            "Requesting verification code"
        );

        let request = SendCodeRequest::new(email);
        match self.gateway.request_code(&request).await {
            Ok(response) if response.success => {
                let mut armed = None;
                let settled = self.settle(&loading, |state| {
                    state.step = Step::CodeEntry;
                    armed = state.set_success(response.message);
                });
                if !settled {
                    return self.discard(action);
                }
                if let Some(seq) = armed {
                    self.arm_auto_clear(seq);
                }

                info!(
                    session_id = %self.id,
                    action,
                    event = "code_sent",
                    "Verification code sent"
                );
                SubmitOutcome::Advanced(Step::CodeEntry)
            }
            Ok(response) => {
                let message = if response.message.is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    response.message
                };
                self.fail(&loading, action, message)
            }
            Err(error) => {
                debug!(session_id = %self.id, action, error = %error, "requestCode raised an error");
                self.fail(&loading, action, error.user_message())
            }
        }
    }

    /// Mark a remote call as outstanding. Returns `None` if one already is.
    fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        let mut epoch = 0;
        let acquired = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.clear_messages();
            epoch = state.nav_epoch;
            true
        });

        acquired.then(|| LoadingGuard {
            state: &self.state,
            epoch,
        })
    }

    /// Apply a remote call's result and end loading in one notification.
    /// Returns `false` without touching the fields if the user navigated
    /// since dispatch; the guard still clears `is_loading` on drop.
    fn settle(&self, loading: &LoadingGuard<'_>, apply: impl FnOnce(&mut PortalState)) -> bool {
        self.state.send_if_modified(|state| {
            if state.nav_epoch != loading.epoch {
                return false;
            }
            state.is_loading = false;
            apply(state);
            true
        })
    }

    fn reject(&self, action: &'static str, reason: ValidationError) -> SubmitOutcome {
        debug!(
            session_id = %self.id,
            action,
            field = reason.field(),
            reason = reason.code(),
            event = "guard_rejected",
            "Input rejected before remote call"
        );
        self.state.send_modify(|state| state.set_error(reason.to_string()));
        SubmitOutcome::Rejected(reason)
    }

    fn fail(
        &self,
        loading: &LoadingGuard<'_>,
        action: &'static str,
        message: String,
    ) -> SubmitOutcome {
        if !self.settle(loading, |state| state.set_error(message.clone())) {
            return self.discard(action);
        }
        warn!(
            session_id = %self.id,
            action,
            error_message = %message,
            event = "remote_call_failed",
            "Remote verification call failed"
        );
        SubmitOutcome::Failed(message)
    }

    fn discard(&self, action: &'static str) -> SubmitOutcome {
        debug!(
            session_id = %self.id,
            action,
            step = %self.step(),
            event = "stale_result_discarded",
            "Remote call settled after navigation, result dropped"
        );
        SubmitOutcome::Discarded
    }

    fn ignore(&self, action: &'static str) -> SubmitOutcome {
        let state = self.state.borrow();
        debug!(
            session_id = %self.id,
            action,
            step = %state.step,
            is_loading = state.is_loading,
            "Action ignored"
        );
        SubmitOutcome::Ignored
    }

    /// Clear the success message after the configured delay, unless a newer
    /// message write happened in the meantime. The task holds only a weak
    /// reference, so it never outlives the session's state.
    fn arm_auto_clear(&self, seq: u64) {
        let state: Weak<watch::Sender<PortalState>> = Arc::downgrade(&self.state);
        let ttl = self.messaging.success_message_ttl();
        let session_id = self.id;

        debug!(
            session_id = %session_id,
            ttl_ms = ttl.as_millis() as u64,
            "Armed success message auto-clear"
        );

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;

            let Some(state) = state.upgrade() else {
                return;
            };
            let cleared = state.send_if_modified(|state| {
                if state.message_seq == seq && state.success_message.is_some() {
                    state.success_message = None;
                    true
                } else {
                    false
                }
            });
            if cleared {
                debug!(
                    session_id = %session_id,
                    event = "success_message_cleared",
                    "Success message auto-cleared"
                );
            }
        });
    }
}

/// Resets `is_loading` on every exit path of a remote call, including
/// cancellation of the calling future.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<PortalState>,
    /// Navigation epoch at dispatch
    epoch: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.is_loading, false));
    }
}
