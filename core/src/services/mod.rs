//! Application services driving the verification flow.

pub mod portal;

pub use portal::{
    PortalSession, PortalState, SubmitOutcome, VerificationGateway, CONTACT_RETRIEVED_MESSAGE,
};
