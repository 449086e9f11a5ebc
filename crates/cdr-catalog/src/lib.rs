//! # cdr-catalog
//!
//! Stock catalog for the CD Register: the single source of truth for how
//! much of each regulated item is left.
//!
//! ## Role in System
//!
//! - Holds the current balance and metadata (strength, batch, expiry,
//!   minimum level) for every item on the register
//! - Persists balance mutation and transaction append as one atomic store
//!   commit, guarded by a per-item version (compare-and-swap)
//! - Publishes a change feed so stock pages update live without polling
//!
//! ## Atomicity
//!
//! The balance write and the transaction append travel through a single
//! [`CatalogStore::commit`] call. The in-memory adapter applies both under
//! one lock; a database-backed adapter applies both in one transaction.
//! A stale `expected_version` fails the commit with `Conflict` so a
//! concurrent transaction can never be silently overwritten.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCatalogStore;
pub use domain::{CatalogError, ItemUpdate, StockItem, StoreError, VersionedItem};
pub use events::{CatalogSubscription, EventFilter, StockEvent};
pub use ports::CatalogStore;
pub use service::StockCatalog;
