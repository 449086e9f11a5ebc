//! # Stock Catalog Service
//!
//! Application service over the [`CatalogStore`] port. The transaction
//! engine drives `commit_transaction`; everything else serves stock pages
//! and the witness-era compliance review screens.

use crate::domain::{CatalogError, ItemUpdate, StockItem, VersionedItem};
use crate::events::{
    CatalogSubscription, EventFilter, StockEvent, DEFAULT_CHANNEL_CAPACITY,
};
use crate::ports::CatalogStore;
use cdr_types::{CommittedTransaction, ItemId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// The single source of truth for current stock balances.
pub struct StockCatalog {
    store: Arc<dyn CatalogStore>,
    events: broadcast::Sender<StockEvent>,
}

impl StockCatalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { store, events }
    }

    // === Onboarding / retirement ===

    /// Onboard a new item. The record is validated, never coerced.
    pub fn insert_item(&self, item: StockItem) -> Result<(), CatalogError> {
        item.validate()?;
        let item_id = item.id;
        self.store.insert(item)?;
        info!(%item_id, "stock item onboarded");
        self.publish(StockEvent::ItemInserted { item_id });
        Ok(())
    }

    /// Soft-retire an item: it stops accepting transactions but its
    /// history stays queryable for as long as audit records reference it.
    pub fn retire_item(&self, id: ItemId) -> Result<(), CatalogError> {
        self.store.retire(id)?;
        info!(item_id = %id, "stock item retired");
        self.publish(StockEvent::ItemRetired { item_id: id });
        Ok(())
    }

    // === Reads ===

    pub fn get(&self, id: ItemId) -> Result<VersionedItem, CatalogError> {
        self.store
            .load(id)?
            .ok_or(CatalogError::ItemNotFound(id))
    }

    pub fn balance(&self, id: ItemId) -> Result<u32, CatalogError> {
        Ok(self.get(id)?.item.current_balance)
    }

    pub fn list_items(&self) -> Result<Vec<VersionedItem>, CatalogError> {
        Ok(self.store.list()?)
    }

    /// Items at or below their reorder threshold.
    pub fn below_minimum(&self) -> Result<Vec<StockItem>, CatalogError> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(|v| v.item)
            .filter(|i| !i.retired && i.is_below_minimum())
            .collect())
    }

    /// Committed transactions for one item, in commit order.
    pub fn transactions_for(&self, id: ItemId) -> Result<Vec<CommittedTransaction>, CatalogError> {
        Ok(self.store.transactions_for(id)?)
    }

    // === Commit ===

    /// Atomically apply a balance update and append its transaction.
    ///
    /// Called by the transaction engine only. The store enforces the
    /// version check; a `Conflict` comes back untouched so the engine can
    /// reload and re-validate.
    pub fn commit_transaction(
        &self,
        update: ItemUpdate,
        transaction: CommittedTransaction,
    ) -> Result<(), CatalogError> {
        let event = StockEvent::BalanceChanged {
            item_id: update.item_id,
            balance: update.new_balance,
            transaction_id: transaction.id,
            kind: transaction.kind,
        };
        self.store.commit(update, transaction)?;
        self.publish(event);
        Ok(())
    }

    // === Subscriptions ===

    /// Subscribe to changes for one item.
    pub fn subscribe(&self, item: ItemId) -> CatalogSubscription {
        CatalogSubscription::new(self.events.subscribe(), EventFilter::for_item(item))
    }

    /// Subscribe to changes for every item.
    pub fn subscribe_all(&self) -> CatalogSubscription {
        CatalogSubscription::new(self.events.subscribe(), EventFilter::default())
    }

    fn publish(&self, event: StockEvent) {
        // Zero receivers is normal when no stock page is open.
        if self.events.send(event).is_err() {
            debug!("catalog event dropped: no subscribers");
        }
    }
}
