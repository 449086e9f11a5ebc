//! Outbound ports to the identity-and-credentials collaborators.

use crate::domain::DirectoryError;
use async_trait::async_trait;
use cdr_types::{Actor, ActorId};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A witness credential as held by the external identity store.
///
/// Either representation may be present: `pin_hash` for migrated records,
/// `pin` for legacy plaintext ones. The hash always wins when both exist.
/// Secret fields are zeroized on drop and redacted from `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StoredSecret {
    #[zeroize(skip)]
    pub actor_id: ActorId,
    #[zeroize(skip)]
    pub display_name: String,
    /// Hex SHA-256 digest of the PIN (current representation).
    pub pin_hash: Option<String>,
    /// Plaintext PIN (legacy records not yet migrated).
    pub pin: Option<String>,
}

impl fmt::Debug for StoredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSecret")
            .field("actor_id", &self.actor_id)
            .field("display_name", &self.display_name)
            .field("pin_hash", &self.pin_hash.as_ref().map(|_| "<redacted>"))
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Credential lookup against the external identity store.
///
/// Read-only: witness verification never mutates witness records.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    async fn get_secret(&self, actor: ActorId) -> Result<Option<StoredSecret>, DirectoryError>;
}

/// Active-staff listing, used to populate the witness picker.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Actor>, DirectoryError>;
}
