use cdr_types::ItemId;
use thiserror::Error;

/// Errors from the persistence boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Version conflict on item {item_id}: expected {expected}, found {actual}")]
    Conflict {
        item_id: ItemId,
        expected: u64,
        actual: u64,
    },

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Item already exists: {0}")]
    Duplicate(ItemId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item {0} is retired and accepts no new transactions")]
    ItemRetired(ItemId),

    #[error("Malformed item record: {reason}")]
    MalformedRecord { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
