//! # cdr-audit
//!
//! Append-only audit ledger for the CD Register.
//!
//! ## Role in System
//!
//! Every committed register transaction is mirrored into the
//! organization-wide compliance log as exactly one [`AuditEntry`]. These
//! entries are the records a regulator reviews after the fact, so the
//! ledger is write-once: there is no update or delete anywhere in the
//! public surface.
//!
//! ## Delivery Guarantee
//!
//! The remote compliance sink can be unreachable; losing an audit record
//! for a controlled-substance transaction is itself a compliance failure.
//! A failed mirror is therefore never swallowed: the entry is parked on a
//! pending queue, a warning is logged, and [`service::AuditLedger::flush_pending`]
//! retries in arrival order until every entry lands.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemorySink;
pub use domain::{AuditCategory, AuditEntry, AuditError, SinkError};
pub use ports::ComplianceSink;
pub use service::{AuditConfig, AuditLedger};
