//! # Audit Ledger Service
//!
//! Local append-only entry log plus the mirror to the organization-wide
//! compliance stream. A sink failure parks the entry on the pending queue
//! rather than losing it; `flush_pending` drains the queue in arrival
//! order.

use crate::domain::{AuditEntry, AuditError, SinkError};
use crate::ports::ComplianceSink;
use cdr_types::{ActorId, CommittedTransaction, TimeSource};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tunables for the compliance mirror.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Bound on each sink round-trip; on expiry the entry is queued.
    pub sink_timeout: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            sink_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Default)]
struct Inner {
    /// Local entry log. Append-only: nothing in this crate removes from it.
    entries: Vec<AuditEntry>,
    /// Entries whose sink mirror has not yet landed.
    pending: VecDeque<AuditEntry>,
}

/// Append-only audit ledger with compliance-stream mirroring.
pub struct AuditLedger {
    sink: Arc<dyn ComplianceSink>,
    time: Arc<dyn TimeSource>,
    config: AuditConfig,
    inner: Mutex<Inner>,
}

impl AuditLedger {
    pub fn new(sink: Arc<dyn ComplianceSink>, time: Arc<dyn TimeSource>, config: AuditConfig) -> Self {
        Self {
            sink,
            time,
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Record the audit entry for a committed transaction.
    ///
    /// Exactly one entry per committed transaction. The local append
    /// always succeeds; the sink mirror is attempted immediately and
    /// queued for retry when it fails. The entry's timestamp comes from
    /// the ledger's clock, not the caller's.
    pub async fn record(&self, tx: &CommittedTransaction) -> Result<AuditEntry, AuditError> {
        let entry = AuditEntry::for_transaction(tx, self.time.now());

        self.lock()?.entries.push(entry.clone());

        match self.mirror(&entry).await {
            Ok(()) => {
                debug!(entry_id = %entry.id, "audit entry mirrored to compliance stream");
            }
            Err(err) => {
                warn!(
                    entry_id = %entry.id,
                    error = %err,
                    "compliance mirror failed; entry queued for retry"
                );
                self.lock()?.pending.push_back(entry.clone());
            }
        }

        Ok(entry)
    }

    /// Retry queued mirrors in arrival order. Stops at the first failure
    /// so ordering is preserved; returns how many entries landed.
    pub async fn flush_pending(&self) -> Result<usize, AuditError> {
        let mut flushed = 0;
        loop {
            let Some(entry) = self.lock()?.pending.front().cloned() else {
                break;
            };

            if let Err(err) = self.mirror(&entry).await {
                warn!(
                    entry_id = %entry.id,
                    error = %err,
                    remaining = self.pending_len()?,
                    "compliance mirror still failing"
                );
                break;
            }

            self.lock()?.pending.pop_front();
            flushed += 1;
        }

        if flushed > 0 {
            info!(flushed, "pending audit entries delivered");
        }
        Ok(flushed)
    }

    /// Number of entries still awaiting sink delivery.
    pub fn pending_len(&self) -> Result<usize, AuditError> {
        Ok(self.lock()?.pending.len())
    }

    /// All locally recorded entries, in append order.
    pub fn entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self.lock()?.entries.clone())
    }

    /// Entries recorded for one acting user, in append order.
    pub fn entries_for_actor(&self, actor: ActorId) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self
            .lock()?
            .entries
            .iter()
            .filter(|e| e.actor_id == actor)
            .cloned()
            .collect())
    }

    async fn mirror(&self, entry: &AuditEntry) -> Result<(), SinkError> {
        tokio::time::timeout(self.config.sink_timeout, self.sink.log(entry))
            .await
            .map_err(|_| {
                SinkError::Unavailable(format!(
                    "sink timed out after {:?}",
                    self.config.sink_timeout
                ))
            })?
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AuditError> {
        self.inner
            .lock()
            .map_err(|_| AuditError::Internal("ledger lock poisoned".to_string()))
    }
}
