use thiserror::Error;

/// Errors from the remote compliance sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Compliance sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors from ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("Audit ledger internal error: {0}")]
    Internal(String),
}
