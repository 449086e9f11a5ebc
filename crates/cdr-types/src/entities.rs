//! # Core Domain Entities
//!
//! Defines the entities shared across the register subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: newtype UUIDs for items, actors, transactions, audit entries
//! - **Staff**: `Actor` and the ordered `Grade` hierarchy
//! - **Register**: `DrugClass`, `TransactionKind`, `CommittedTransaction`
//! - **Witnessing**: `WitnessAssertion`

use crate::time::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// IDENTITY
// =============================================================================

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a stock item.
    ItemId
);
uuid_id!(
    /// Unique identifier for a staff member.
    ActorId
);
uuid_id!(
    /// Unique identifier for a committed register transaction.
    TransactionId
);
uuid_id!(
    /// Unique identifier for a compliance audit entry.
    AuditEntryId
);

// =============================================================================
// STAFF
// =============================================================================

/// Clinical grade hierarchy, ordered from most junior to most senior.
///
/// The derived `Ord` is the authority for "is grade X below grade Y":
/// witness gating compares against [`Grade::Paramedic`], the grade at which
/// a clinician may administer unsupervised.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    CareAssistant,
    StudentParamedic,
    AmbulanceTechnician,
    Paramedic,
    SeniorParamedic,
    ClinicalManager,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CareAssistant => "Care Assistant",
            Self::StudentParamedic => "Student Paramedic",
            Self::AmbulanceTechnician => "Ambulance Technician",
            Self::Paramedic => "Paramedic",
            Self::SeniorParamedic => "Senior Paramedic",
            Self::ClinicalManager => "Clinical Manager",
        };
        f.write_str(label)
    }
}

/// A staff member as known to the active-staff directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub display_name: String,
    pub grade: Grade,
}

impl Actor {
    pub fn new(display_name: impl Into<String>, grade: Grade) -> Self {
        Self {
            id: ActorId::random(),
            display_name: display_name.into(),
            grade,
        }
    }
}

// =============================================================================
// REGISTER
// =============================================================================

/// Legal classification of a stock item.
///
/// `Controlled` items are subject to statutory recording requirements and
/// stricter witness gating; `Standard` items share the same ledger but not
/// the two-person protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrugClass {
    Controlled,
    Standard,
}

/// The five movement types the register records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Stock received into the register (may carry batch/expiry).
    Receive,
    /// Clinical administration to a patient.
    Administer,
    /// Stock destroyed or discarded.
    Waste,
    /// Stock transferred out of this register's scope.
    Move,
    /// Physical count reconciliation; replaces the balance outright.
    Check,
}

impl TransactionKind {
    /// All kinds, in display order. Used by truth-table tests and pickers.
    pub const ALL: [TransactionKind; 5] = [
        Self::Receive,
        Self::Administer,
        Self::Waste,
        Self::Move,
        Self::Check,
    ];
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Receive => "Receive",
            Self::Administer => "Administer",
            Self::Waste => "Waste",
            Self::Move => "Move",
            Self::Check => "Check",
        };
        f.write_str(label)
    }
}

/// A committed register transaction.
///
/// Write-once: committed transactions are never edited or deleted.
/// A mistake is corrected by committing a compensating transaction
/// (e.g. a `Receive` to reverse an erroneous `Waste`), never by
/// rewriting history.
///
/// `balance_after` denormalizes the item balance at commit time so an
/// inspector can read the running balance straight off the record, and so
/// replaying the per-item history reproduces the current balance exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedTransaction {
    pub id: TransactionId,
    /// Commit timestamp, milliseconds since the UNIX epoch.
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub item_id: ItemId,
    pub item_name: String,
    /// Quantity as proposed (absolute count for `Check`).
    pub quantity: u32,
    /// Signed effect on the balance (`Check` records counted minus previous).
    pub delta: i64,
    /// Item balance immediately after this transaction committed.
    pub balance_after: u32,
    pub acting_user_id: ActorId,
    pub acting_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Batch number, populated for `Receive` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    /// Expiry date, populated for `Receive` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

// =============================================================================
// WITNESSING
// =============================================================================

/// Proof that a second person verified a transaction with their PIN.
///
/// Deliberately **not** `Clone` and not serializable: an assertion is
/// consumed by value by the single transaction commit it was issued for.
/// Reusing one for a second transaction requires a fresh PIN verification,
/// by construction. Only the witness display name is denormalized into the
/// committed record; the assertion itself is never persisted.
#[derive(Debug, PartialEq, Eq)]
pub struct WitnessAssertion {
    witness_id: ActorId,
    witness_name: String,
    verified_at: Timestamp,
}

impl WitnessAssertion {
    /// Issue an assertion. Called by the witness authenticator at the
    /// moment of successful PIN verification; not meant to be constructed
    /// anywhere else.
    pub fn issue(witness_id: ActorId, witness_name: impl Into<String>, verified_at: Timestamp) -> Self {
        Self {
            witness_id,
            witness_name: witness_name.into(),
            verified_at,
        }
    }

    pub fn witness_id(&self) -> ActorId {
        self.witness_id
    }

    pub fn witness_name(&self) -> &str {
        &self.witness_name
    }

    pub fn verified_at(&self) -> Timestamp {
        self.verified_at
    }

    /// Consume the assertion, yielding the denormalized witness name.
    pub fn into_witness_name(self) -> String {
        self.witness_name
    }
}
