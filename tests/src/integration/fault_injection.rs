//! # Fault Injection
//!
//! Drives the commit path into persistence and sink failures and asserts
//! the register's two core promises: a failed commit leaves nothing
//! visible, and a failed audit mirror loses nothing.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::Register;
    use cdr_catalog::{
        CatalogStore, InMemoryCatalogStore, ItemUpdate, StockItem, StoreError, VersionedItem,
    };
    use cdr_engine::{EngineError, Proposal};
    use cdr_types::{Actor, CommittedTransaction, DrugClass, Grade, ItemId, TransactionKind};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Store whose commit path can be made to fail while reads keep
    /// working, simulating a database outage mid-transaction.
    struct OutageStore {
        inner: InMemoryCatalogStore,
        commits_fail: AtomicBool,
    }

    impl OutageStore {
        fn new() -> Self {
            Self {
                inner: InMemoryCatalogStore::new(),
                commits_fail: AtomicBool::new(false),
            }
        }
    }

    impl CatalogStore for OutageStore {
        fn load(&self, id: ItemId) -> Result<Option<VersionedItem>, StoreError> {
            self.inner.load(id)
        }
        fn list(&self) -> Result<Vec<VersionedItem>, StoreError> {
            self.inner.list()
        }
        fn insert(&self, item: StockItem) -> Result<(), StoreError> {
            self.inner.insert(item)
        }
        fn commit(
            &self,
            update: ItemUpdate,
            transaction: CommittedTransaction,
        ) -> Result<(), StoreError> {
            if self.commits_fail.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("write did not confirm".to_string()));
            }
            self.inner.commit(update, transaction)
        }
        fn retire(&self, id: ItemId) -> Result<(), StoreError> {
            self.inner.retire(id)
        }
        fn transactions_for(&self, id: ItemId) -> Result<Vec<CommittedTransaction>, StoreError> {
            self.inner.transactions_for(id)
        }
    }

    #[tokio::test]
    async fn failed_persistence_leaves_no_partial_commit() {
        let store = Arc::new(OutageStore::new());
        let register = Register::with_store(store.clone());
        let item = register.onboard_with_balance("Morphine Sulphate", DrugClass::Standard, 20);
        let clinician = Actor::new("A. Clinician", Grade::Paramedic);

        store.commits_fail.store(true, Ordering::SeqCst);

        let draft = Proposal::new(item.id, TransactionKind::Administer, 5, clinician.clone());
        let validated = register.engine.propose(draft).unwrap().validated().unwrap();
        let err = register.engine.commit(validated).await.unwrap_err();

        // The caller is told the outcome is unknown and must re-query.
        assert!(matches!(err, EngineError::PersistenceError { .. }));

        // Re-querying shows nothing landed: no balance change, no
        // transaction, no audit entry.
        assert_eq!(register.catalog.balance(item.id).unwrap(), 20);
        assert!(register.catalog.transactions_for(item.id).unwrap().is_empty());
        assert!(register.ledger.entries().unwrap().is_empty());
        assert!(register.sink.delivered().is_empty());

        // Outage over: the re-proposed movement commits cleanly.
        store.commits_fail.store(false, Ordering::SeqCst);
        let draft = Proposal::new(item.id, TransactionKind::Administer, 5, clinician);
        let validated = register.engine.propose(draft).unwrap().validated().unwrap();
        let tx = register.engine.commit(validated).await.unwrap();
        assert_eq!(tx.balance_after, 15);
    }

    #[tokio::test]
    async fn unreachable_sink_queues_the_audit_entry_until_it_lands() {
        let register = Register::new();
        let item = register.onboard_with_balance("Morphine Sulphate", DrugClass::Standard, 20);
        let clinician = Actor::new("A. Clinician", Grade::Paramedic);

        register.sink.set_offline(true);

        let draft = Proposal::new(item.id, TransactionKind::Administer, 5, clinician);
        let validated = register.engine.propose(draft).unwrap().validated().unwrap();
        let tx = register.engine.commit(validated).await.unwrap();

        // The stock movement is NOT vetoed by the dead sink...
        assert_eq!(tx.balance_after, 15);
        assert_eq!(register.catalog.balance(item.id).unwrap(), 15);
        // ...and the audit entry is locally recorded and queued, not lost.
        assert_eq!(register.ledger.entries().unwrap().len(), 1);
        assert_eq!(register.ledger.pending_len().unwrap(), 1);
        assert!(register.sink.delivered().is_empty());

        register.sink.set_offline(false);
        assert_eq!(register.ledger.flush_pending().await.unwrap(), 1);
        assert_eq!(register.ledger.pending_len().unwrap(), 0);
        assert_eq!(register.sink.delivered().len(), 1);
        assert!(register.sink.delivered()[0]
            .detail
            .contains("Morphine Sulphate"));
    }
}
