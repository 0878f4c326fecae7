//! Value objects exchanged with the verification backend.

pub mod gateway_messages;

pub use gateway_messages::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
