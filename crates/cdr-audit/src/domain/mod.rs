//! Audit domain: entities and errors.

pub mod entities;
pub mod errors;

pub use entities::{AuditCategory, AuditEntry};
pub use errors::{AuditError, SinkError};
