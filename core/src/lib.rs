//! # Contact Portal Core
//!
//! Domain layer and verification state machine for the contact portal.
//! A user proves control of an email address with a one-time code, then
//! exchanges the code for their contact record. Code issuance, storage and
//! contact lookup live in a backend reached through [`VerificationGateway`].

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
