use crate::domain::{AuditEntry, SinkError};
use crate::ports::ComplianceSink;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory compliance sink.
///
/// Records every delivered entry and can be switched offline to exercise
/// the pending-queue path. Production substitutes an adapter over the
/// organization's central audit endpoint.
#[derive(Default)]
pub struct InMemorySink {
    delivered: Mutex<Vec<AuditEntry>>,
    offline: AtomicBool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the sink becoming (un)reachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Entries delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<AuditEntry> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ComplianceSink for InMemorySink {
    async fn log(&self, entry: &AuditEntry) -> Result<(), SinkError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("sink offline".to_string()));
        }
        self.delivered
            .lock()
            .map_err(|_| SinkError::Unavailable("sink lock poisoned".to_string()))?
            .push(entry.clone());
        Ok(())
    }
}
