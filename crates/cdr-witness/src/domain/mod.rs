//! Witness domain: PIN digests and errors.

pub mod errors;
pub mod pin;

pub use errors::{DirectoryError, WitnessError};
pub use pin::hash_pin;
