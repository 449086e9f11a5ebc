//! # Catalog Change Feed
//!
//! Re-expresses the original live-updating stock page as an explicit
//! subscription interface: callers subscribe to one item (or all items)
//! and receive a [`StockEvent`] after every committed mutation. The feed
//! is decoupled from any transport; the UI layer drains it however it
//! likes.

use cdr_types::{ItemId, TransactionId, TransactionKind};
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum events buffered per subscriber before older ones are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// A change published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockEvent {
    /// A transaction committed and moved the balance.
    BalanceChanged {
        item_id: ItemId,
        balance: u32,
        transaction_id: TransactionId,
        kind: TransactionKind,
    },
    /// A new item was onboarded.
    ItemInserted { item_id: ItemId },
    /// An item was soft-retired.
    ItemRetired { item_id: ItemId },
}

impl StockEvent {
    pub fn item_id(&self) -> ItemId {
        match self {
            Self::BalanceChanged { item_id, .. }
            | Self::ItemInserted { item_id }
            | Self::ItemRetired { item_id } => *item_id,
        }
    }
}

/// Filter for a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Restrict to one item; `None` matches every item.
    pub item: Option<ItemId>,
}

impl EventFilter {
    pub fn for_item(item: ItemId) -> Self {
        Self { item: Some(item) }
    }

    pub fn matches(&self, event: &StockEvent) -> bool {
        match self.item {
            Some(id) => event.item_id() == id,
            None => true,
        }
    }
}

/// A subscription handle for receiving catalog events.
pub struct CatalogSubscription {
    receiver: broadcast::Receiver<StockEvent>,
    filter: EventFilter,
}

impl CatalogSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<StockEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` when the catalog has been dropped. A slow subscriber
    /// that lags the buffer skips the dropped events and keeps receiving.
    pub async fn recv(&mut self) -> Option<StockEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "catalog subscriber lagged, events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Non-blocking variant for polling callers.
    pub fn try_recv(&mut self) -> Option<StockEvent> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
