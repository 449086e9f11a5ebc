//! # Audit Entities

use cdr_types::{ActorId, AuditEntryId, CommittedTransaction, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag in the organization-wide compliance log.
///
/// The register only ever writes `Drug`; the other domains of the
/// surrounding application write their own categories into the same
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditCategory {
    Drug,
    Rota,
    Profile,
    System,
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Drug => "Drug",
            Self::Rota => "Rota",
            Self::Profile => "Profile",
            Self::System => "System",
        };
        f.write_str(label)
    }
}

/// One record in the compliance log.
///
/// Write-once, read-many; never mutated or deleted by the application.
/// `recorded_at` is assigned from the ledger's own clock, independent of
/// whatever the submitting client believes the time is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub category: AuditCategory,
    /// One-line action label, e.g. `"Drug Administer: Morphine Sulphate"`.
    pub summary: String,
    /// Full human-readable account of the movement, including any
    /// reconciliation discrepancy note.
    pub detail: String,
    pub actor_id: ActorId,
    pub actor_name: String,
    pub recorded_at: Timestamp,
}

impl AuditEntry {
    /// Build the mirror entry for a committed register transaction.
    pub fn for_transaction(tx: &CommittedTransaction, recorded_at: Timestamp) -> Self {
        let summary = format!("Drug {}: {}", tx.kind, tx.item_name);

        let mut detail = format!(
            "{} {} x{} ({}). Balance after: {}.",
            tx.kind, tx.item_name, tx.quantity, tx.acting_user, tx.balance_after
        );
        if let Some(witness) = &tx.witness_name {
            detail.push_str(&format!(" Witness: {witness}."));
        }
        if let Some(batch) = &tx.batch_number {
            detail.push_str(&format!(" Batch: {batch}."));
        }
        if let Some(expiry) = &tx.expiry_date {
            detail.push_str(&format!(" Expiry: {expiry}."));
        }
        if let Some(notes) = &tx.notes {
            detail.push_str(&format!(" Notes: {notes}"));
        }

        Self {
            id: AuditEntryId::random(),
            category: AuditCategory::Drug,
            summary,
            detail,
            actor_id: tx.acting_user_id,
            actor_name: tx.acting_user.clone(),
            recorded_at,
        }
    }
}
