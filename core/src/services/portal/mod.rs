//! Email verification flow for the self-service contact portal
//!
//! This module provides the client-side orchestration of the two-factor
//! contact lookup:
//! - Step sequencing (email entry, code entry, contact display)
//! - Input guards before every remote call
//! - Loading discipline: at most one outstanding call per session
//! - Success message auto-clear and error message handling

mod session;
mod state;
mod traits;

#[cfg(test)]
mod tests;

pub use session::{PortalSession, SubmitOutcome, CONTACT_RETRIEVED_MESSAGE};
pub use state::PortalState;
pub use traits::VerificationGateway;
