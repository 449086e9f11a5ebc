//! # cdr-witness
//!
//! Witness authentication for the CD Register.
//!
//! ## Role in System
//!
//! Controlled-drug law requires certain stock movements to be verified by
//! a second authorized person. This crate turns a claimed witness identity
//! plus an entered PIN into a [`cdr_types::WitnessAssertion`] or a typed
//! failure, checked against the external identity store.
//!
//! ## Security
//!
//! - PIN digests use SHA-256; comparisons are constant-time (`subtle`)
//! - Legacy plaintext PINs are still honoured for records not yet
//!   migrated, with a deprecation warning logged on every use; new
//!   enrollments always store a hash
//! - Stored secret material is zeroized on drop and never logged
//! - An assertion is single-use: it is consumed by value by the one
//!   transaction commit it was issued for

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{hash_pin, DirectoryError, WitnessError};
pub use ports::{CredentialDirectory, StaffDirectory, StoredSecret};
pub use service::{WitnessAuthenticator, WitnessConfig};
