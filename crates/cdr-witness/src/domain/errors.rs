use cdr_types::ActorId;
use std::time::Duration;
use thiserror::Error;

/// Errors from the external identity/staff collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Identity directory unavailable: {0}")]
    Unavailable(String),
}

/// Witness authentication errors.
///
/// `IncorrectPin` is recoverable: the operator may retry PIN entry without
/// abandoning the transaction being witnessed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WitnessError {
    #[error("Witness not found: {0}")]
    WitnessNotFound(ActorId),

    #[error("Incorrect PIN")]
    IncorrectPin,

    #[error("Invalid witness: {reason}")]
    InvalidWitness { reason: String },

    #[error("Witness verification timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
