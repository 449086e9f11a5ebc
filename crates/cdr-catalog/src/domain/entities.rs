//! # Catalog Entities
//!
//! ## Type Decisions
//!
//! - `current_balance: u32` - balances are counts of physical units
//!   (ampoules, tablets). A non-negative integer type makes a negative
//!   recorded balance unrepresentable; the engine separately rejects
//!   transactions that would try to go below zero.
//! - `version: u64` - bumped on every committed mutation; the key for the
//!   compare-and-swap that serializes concurrent commits on one item.

use cdr_types::{DrugClass, ItemId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

/// A regulated item on the register.
///
/// Invariant: `current_balance` equals the sum of all committed transaction
/// deltas applied since creation, or since the most recent `Check`
/// reconciliation, which resets the baseline.
///
/// Items referenced by committed transactions are never deleted; they are
/// soft-retired via the `retired` flag and stop accepting new transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StockItem {
    pub id: ItemId,
    pub name: String,
    /// Strength label, e.g. "10mg/1ml".
    pub strength: String,
    /// Counting unit, e.g. "ampoule".
    pub unit: String,
    pub current_balance: u32,
    /// Reorder threshold; at or below this the item is flagged low.
    pub min_level: u32,
    pub class: DrugClass,
    /// Most recent batch number, updated by `Receive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    /// Most recent expiry date, updated by `Receive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub retired: bool,
}

impl StockItem {
    /// Create an item with a fresh id and zero balance.
    pub fn new(
        name: impl Into<String>,
        strength: impl Into<String>,
        unit: impl Into<String>,
        class: DrugClass,
        min_level: u32,
    ) -> Self {
        Self {
            id: ItemId::random(),
            name: name.into(),
            strength: strength.into(),
            unit: unit.into(),
            current_balance: 0,
            min_level,
            class,
            batch_number: None,
            expiry_date: None,
            retired: false,
        }
    }

    /// Builder method to set the starting balance.
    pub fn with_balance(mut self, balance: u32) -> Self {
        self.current_balance = balance;
        self
    }

    pub fn is_controlled(&self) -> bool {
        self.class == DrugClass::Controlled
    }

    /// True when the balance has reached the reorder threshold.
    pub fn is_below_minimum(&self) -> bool {
        self.current_balance <= self.min_level
    }

    /// Reject records that deserialized structurally but are not usable.
    ///
    /// Loosely-typed upstream documents are not coerced into defaults: a
    /// record with a blank name or unit is refused at the boundary.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::MalformedRecord {
                reason: "item name is blank".to_string(),
            });
        }
        if self.unit.trim().is_empty() {
            return Err(CatalogError::MalformedRecord {
                reason: format!("item '{}' has no counting unit", self.name),
            });
        }
        Ok(())
    }
}

/// An item together with its commit version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedItem {
    pub item: StockItem,
    pub version: u64,
}

/// The mutation half of an atomic commit.
///
/// `expected_version` must match the version the proposer read; the store
/// refuses the commit otherwise. `batch_number`/`expiry_date` are patches:
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdate {
    pub item_id: ItemId,
    pub expected_version: u64,
    pub new_balance: u32,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl ItemUpdate {
    /// A balance-only update.
    pub fn balance(item_id: ItemId, expected_version: u64, new_balance: u32) -> Self {
        Self {
            item_id,
            expected_version,
            new_balance,
            batch_number: None,
            expiry_date: None,
        }
    }
}
