use cdr_types::{ItemId, TransactionKind};
use thiserror::Error;

/// Transaction engine errors.
///
/// Recoverability:
/// - `WitnessRequired` / `InvalidWitness`: attach a fresh witness and retry
/// - `InsufficientStock` / `QuantityOutOfRange`: correct the quantity
/// - `ItemNotFound`: the caller's catalog view is stale; refresh before
///   any retry
/// - `Contention`: another operator was committing against the same item;
///   safe to re-propose
/// - `PersistenceError`: the outcome is unknown; the caller must re-query
///   the register before retrying, never retry blind
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item {0} is retired and accepts no new transactions")]
    ItemRetired(ItemId),

    #[error("This transaction requires an independent witness")]
    WitnessRequired,

    #[error("Invalid witness: {reason}")]
    InvalidWitness { reason: String },

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Quantity {quantity} is not valid for a {kind} transaction")]
    QuantityOutOfRange {
        kind: TransactionKind,
        quantity: u32,
    },

    #[error("Commit contention on item {item_id}: gave up after {attempts} attempts")]
    Contention { item_id: ItemId, attempts: u32 },

    #[error("Commit outcome unknown ({reason}); re-query the register before retrying")]
    PersistenceError { reason: String },
}
