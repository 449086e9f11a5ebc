use crate::domain::{AuditEntry, SinkError};
use async_trait::async_trait;

/// The organization-wide compliance audit stream.
///
/// Append-only from this subsystem's point of view: there is no read,
/// update, or delete here. Delivery failures surface as [`SinkError`] and
/// are retried by the ledger's pending queue.
#[async_trait]
pub trait ComplianceSink: Send + Sync {
    async fn log(&self, entry: &AuditEntry) -> Result<(), SinkError>;
}
