//! Witness ports.

pub mod outbound;

pub use outbound::{CredentialDirectory, StaffDirectory, StoredSecret};
