//! Domain entities of the verification flow.

pub mod contact;
pub mod step;

#[cfg(test)]
mod tests;

pub use contact::Contact;
pub use step::Step;
