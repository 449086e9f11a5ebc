//! # Transaction Engine Service
//!
//! Application service that drives a proposal through gating, balance
//! computation, and the atomic commit.
//!
//! ## Commit Discipline
//!
//! The balance mutation and the register transaction land through one
//! atomic catalog commit, conditioned on the item version read at the top
//! of the attempt. A concurrent commit on the same item surfaces as a
//! version conflict and the attempt is replayed from a fresh read, so two
//! operators transacting against the same drug within seconds both land,
//! in some order, with `balance_after` reflecting that order. The audit
//! mirror runs after the commit; its delivery is guaranteed by the
//! ledger's pending queue, not by holding the commit hostage.

use crate::domain::{balance, gating, Drafted, EngineError, Proposal, ProposalStage, Validated};
use cdr_audit::AuditLedger;
use cdr_catalog::{CatalogError, ItemUpdate, StockCatalog, StoreError, VersionedItem};
use cdr_types::{CommittedTransaction, ItemId, TimeSource, TransactionId, TransactionKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tunables for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Commit retries after a version conflict before giving up.
    pub max_commit_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: 5,
        }
    }
}

/// Validates and commits register transactions.
pub struct TransactionEngine {
    catalog: Arc<StockCatalog>,
    ledger: Arc<AuditLedger>,
    time: Arc<dyn TimeSource>,
    config: EngineConfig,
}

impl TransactionEngine {
    pub fn new(
        catalog: Arc<StockCatalog>,
        ledger: Arc<AuditLedger>,
        time: Arc<dyn TimeSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            ledger,
            time,
            config,
        }
    }

    /// Validate a drafted proposal against the catalog and the witness
    /// gating policy.
    ///
    /// Returns [`ProposalStage::AwaitingWitness`] when the policy demands
    /// an independent witness; the caller then collects a PIN-verified
    /// assertion (or abandons the proposal: a plain drop, nothing has
    /// been mutated).
    pub fn propose(&self, draft: Proposal<Drafted>) -> Result<ProposalStage, EngineError> {
        let versioned = self.load(draft.item_id)?;
        let item = &versioned.item;

        if item.retired {
            return Err(EngineError::ItemRetired(draft.item_id));
        }
        if draft.quantity == 0 && draft.kind != TransactionKind::Check {
            return Err(EngineError::QuantityOutOfRange {
                kind: draft.kind,
                quantity: 0,
            });
        }

        if gating::requires_witness(item.class, draft.kind, draft.actor.grade) {
            debug!(item = %draft.item_id, kind = %draft.kind, "proposal parked awaiting witness");
            Ok(ProposalStage::AwaitingWitness(draft.awaiting_witness()))
        } else {
            Ok(ProposalStage::Validated(draft.validated()))
        }
    }

    /// Commit a validated proposal. The point of no return: on success
    /// the balance, the register transaction, and the audit entry are all
    /// durable.
    ///
    /// A [`EngineError::PersistenceError`] means the outcome is unknown;
    /// the caller must re-query the register before retrying, never
    /// resubmit blind.
    pub async fn commit(
        &self,
        proposal: Proposal<Validated>,
    ) -> Result<CommittedTransaction, EngineError> {
        let mut proposal = proposal;
        // The assertion is consumed here: only its display name survives,
        // denormalized into the committed record.
        let witness_name = proposal.witness.take().map(|w| w.into_witness_name());
        let item_id = proposal.item_id;
        let kind = proposal.kind;
        let quantity = proposal.quantity;
        // One id across retries: conflicts replay the same logical
        // transaction, they do not mint a new one.
        let tx_id = TransactionId::random();

        let mut attempts = 0u32;
        loop {
            attempts += 1;

            let versioned = self.load(item_id)?;
            let item = &versioned.item;
            if item.retired {
                return Err(EngineError::ItemRetired(item_id));
            }

            let change = balance::apply(kind, item.current_balance, quantity)?;
            let notes =
                compose_notes(kind, item.current_balance, quantity, proposal.notes.clone());

            let (batch_number, expiry_date) = if kind == TransactionKind::Receive {
                (proposal.batch_number.clone(), proposal.expiry_date)
            } else {
                (None, None)
            };

            let tx = CommittedTransaction {
                id: tx_id,
                timestamp: self.time.now(),
                kind,
                item_id,
                item_name: item.name.clone(),
                quantity,
                delta: change.delta,
                balance_after: change.new_balance,
                acting_user_id: proposal.actor.id,
                acting_user: proposal.actor.display_name.clone(),
                witness_name: witness_name.clone(),
                notes,
                batch_number: batch_number.clone(),
                expiry_date,
            };

            let update = ItemUpdate {
                item_id,
                expected_version: versioned.version,
                new_balance: change.new_balance,
                batch_number,
                expiry_date,
            };

            match self.catalog.commit_transaction(update, tx.clone()) {
                Ok(()) => {
                    if let Err(err) = self.ledger.record(&tx).await {
                        warn!(
                            transaction = %tx.id,
                            error = %err,
                            "transaction committed but audit recording failed"
                        );
                        return Err(EngineError::PersistenceError {
                            reason: err.to_string(),
                        });
                    }
                    info!(
                        transaction = %tx.id,
                        item = %item_id,
                        kind = %kind,
                        balance_after = tx.balance_after,
                        witnessed = tx.witness_name.is_some(),
                        "transaction committed"
                    );
                    return Ok(tx);
                }
                Err(CatalogError::Store(StoreError::Conflict { .. })) => {
                    if attempts > self.config.max_commit_retries {
                        return Err(EngineError::Contention { item_id, attempts });
                    }
                    debug!(
                        item = %item_id,
                        attempts,
                        "commit conflicted with a concurrent transaction; replaying"
                    );
                }
                Err(CatalogError::ItemNotFound(id))
                | Err(CatalogError::Store(StoreError::NotFound(id))) => {
                    return Err(EngineError::ItemNotFound(id));
                }
                Err(err) => {
                    return Err(EngineError::PersistenceError {
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    fn load(&self, item_id: ItemId) -> Result<VersionedItem, EngineError> {
        match self.catalog.get(item_id) {
            Ok(versioned) => Ok(versioned),
            Err(CatalogError::ItemNotFound(id)) => Err(EngineError::ItemNotFound(id)),
            Err(err) => Err(EngineError::PersistenceError {
                reason: err.to_string(),
            }),
        }
    }
}

/// A reconciliation that found a discrepancy must say so in the record:
/// the synthesized note names the replaced balance and is appended to any
/// operator note rather than replacing it.
fn compose_notes(
    kind: TransactionKind,
    recorded: u32,
    counted: u32,
    operator_notes: Option<String>,
) -> Option<String> {
    if kind != TransactionKind::Check || counted == recorded {
        return operator_notes;
    }
    let discrepancy = format!("Discrepancy corrected. Old: {recorded}");
    Some(match operator_notes {
        Some(existing) => format!("{existing}. {discrepancy}"),
        None => discrepancy,
    })
}
