use crate::domain::{ItemUpdate, StockItem, StoreError, VersionedItem};
use crate::ports::CatalogStore;
use cdr_types::{CommittedTransaction, ItemId};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory catalog store.
///
/// A single mutex held across the version check, the item write, and the
/// transaction append gives the same all-or-nothing guarantee a database
/// transaction would. Production deployments substitute an adapter over
/// the host application's database.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    items: HashMap<ItemId, VersionedItem>,
    log: HashMap<ItemId, Vec<CommittedTransaction>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("catalog store lock poisoned".to_string()))
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self, id: ItemId) -> Result<Option<VersionedItem>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.items.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<VersionedItem>, StoreError> {
        let inner = self.lock()?;
        let mut items: Vec<_> = inner.items.values().cloned().collect();
        items.sort_by(|a, b| a.item.name.cmp(&b.item.name));
        Ok(items)
    }

    fn insert(&self, item: StockItem) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.items.contains_key(&item.id) {
            return Err(StoreError::Duplicate(item.id));
        }
        let id = item.id;
        inner.items.insert(id, VersionedItem { item, version: 0 });
        inner.log.insert(id, Vec::new());
        Ok(())
    }

    fn commit(
        &self,
        update: ItemUpdate,
        transaction: CommittedTransaction,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;

        let versioned = inner
            .items
            .get_mut(&update.item_id)
            .ok_or(StoreError::NotFound(update.item_id))?;

        if versioned.version != update.expected_version {
            return Err(StoreError::Conflict {
                item_id: update.item_id,
                expected: update.expected_version,
                actual: versioned.version,
            });
        }

        versioned.item.current_balance = update.new_balance;
        if let Some(batch) = update.batch_number {
            versioned.item.batch_number = Some(batch);
        }
        if let Some(expiry) = update.expiry_date {
            versioned.item.expiry_date = Some(expiry);
        }
        versioned.version += 1;

        inner
            .log
            .entry(update.item_id)
            .or_default()
            .push(transaction);
        Ok(())
    }

    fn retire(&self, id: ItemId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let versioned = inner.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        versioned.item.retired = true;
        versioned.version += 1;
        Ok(())
    }

    fn transactions_for(&self, id: ItemId) -> Result<Vec<CommittedTransaction>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.log.get(&id).cloned().unwrap_or_default())
    }
}
