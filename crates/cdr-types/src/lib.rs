//! # cdr-types
//!
//! Shared domain entities for the CD Register.
//!
//! ## Clusters
//!
//! - **Identity**: `ItemId`, `ActorId`, `TransactionId`, `AuditEntryId`
//! - **Staff**: `Actor`, `Grade` (ordered clinical hierarchy)
//! - **Register**: `DrugClass`, `TransactionKind`, `CommittedTransaction`
//! - **Witnessing**: `WitnessAssertion` (ephemeral, single-use)
//! - **Time**: `Timestamp`, `TimeSource` port and adapters
//!
//! Every crate in the workspace depends on this one; nothing here depends
//! on any other workspace crate.

pub mod entities;
pub mod time;

pub use entities::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
