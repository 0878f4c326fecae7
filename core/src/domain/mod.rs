//! Domain layer: flow steps, contact records, backend message shapes and input guards.

pub mod entities;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use validation::{is_code_valid, is_email_valid, validate_code, validate_email, CODE_LENGTH};
pub use value_objects::*;
