use crate::domain::{ItemUpdate, StockItem, StoreError, VersionedItem};
use cdr_types::{CommittedTransaction, ItemId};

/// Persistence abstraction for the catalog.
///
/// The production adapter wraps whatever database the embedding
/// application uses; [`crate::adapters::InMemoryCatalogStore`] backs unit
/// and integration tests.
///
/// `commit` is the atomicity boundary of the whole register: the item
/// mutation and the transaction append must land together or not at all,
/// and a stale `expected_version` must fail with [`StoreError::Conflict`]
/// rather than overwrite a concurrent commit.
pub trait CatalogStore: Send + Sync {
    fn load(&self, id: ItemId) -> Result<Option<VersionedItem>, StoreError>;

    fn list(&self) -> Result<Vec<VersionedItem>, StoreError>;

    /// Insert a new item at version 0.
    fn insert(&self, item: StockItem) -> Result<(), StoreError>;

    /// Atomically apply the item update and append the transaction.
    fn commit(
        &self,
        update: ItemUpdate,
        transaction: CommittedTransaction,
    ) -> Result<(), StoreError>;

    /// Soft-retire an item. Its history remains queryable.
    fn retire(&self, id: ItemId) -> Result<(), StoreError>;

    /// Committed transactions for one item, in commit order.
    fn transactions_for(&self, id: ItemId) -> Result<Vec<CommittedTransaction>, StoreError>;
}
