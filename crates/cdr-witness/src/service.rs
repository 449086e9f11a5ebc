//! # Witness Authentication Service
//!
//! Application service implementing the witness-verification protocol over
//! the outbound [`CredentialDirectory`] and [`StaffDirectory`] ports.
//!
//! ## Verification Path
//!
//! 1. Look up the claimed witness's stored secret (bounded round-trip)
//! 2. Compare against the hash representation when present
//! 3. Fall back to the legacy plaintext representation only when no hash
//!    exists, logging a deprecation warning
//! 4. On success, issue a single-use [`WitnessAssertion`] bound to the
//!    witness's identity and display name

use crate::domain::{pin, WitnessError};
use crate::ports::{CredentialDirectory, StaffDirectory};
use cdr_types::{Actor, ActorId, TimeSource, WitnessAssertion};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Tunables for witness verification.
#[derive(Debug, Clone)]
pub struct WitnessConfig {
    /// Bound on each directory round-trip. On expiry the verification
    /// fails; the enclosing transaction is rejected, never left waiting.
    pub directory_timeout: Duration,
}

impl Default for WitnessConfig {
    fn default() -> Self {
        Self {
            directory_timeout: Duration::from_secs(10),
        }
    }
}

/// Verifies claimed witness identities against their PINs.
pub struct WitnessAuthenticator<C: CredentialDirectory, S: StaffDirectory> {
    credentials: C,
    staff: S,
    time: Arc<dyn TimeSource>,
    config: WitnessConfig,
}

impl<C: CredentialDirectory, S: StaffDirectory> WitnessAuthenticator<C, S> {
    pub fn new(credentials: C, staff: S, time: Arc<dyn TimeSource>, config: WitnessConfig) -> Self {
        Self {
            credentials,
            staff,
            time,
            config,
        }
    }

    /// Verify a claimed witness identity against an entered PIN.
    ///
    /// Succeeds with a single-use assertion; the assertion carries no
    /// further privilege and cannot be reused for a second transaction.
    /// Never mutates the identity store.
    pub async fn verify(
        &self,
        claimed: ActorId,
        entered_pin: &str,
    ) -> Result<WitnessAssertion, WitnessError> {
        let lookup = tokio::time::timeout(
            self.config.directory_timeout,
            self.credentials.get_secret(claimed),
        )
        .await
        .map_err(|_| WitnessError::Timeout(self.config.directory_timeout))??;

        let secret = lookup.ok_or(WitnessError::WitnessNotFound(claimed))?;

        let verified = match (&secret.pin_hash, &secret.pin) {
            // Hash representation wins whenever present.
            (Some(hash), _) => pin::matches_hash(entered_pin, hash),
            (None, Some(plaintext)) => {
                warn!(
                    witness = %claimed,
                    "witness PIN still stored as plaintext; record awaits hashed re-enrollment"
                );
                pin::matches_plaintext(entered_pin, plaintext)
            }
            (None, None) => {
                return Err(WitnessError::InvalidWitness {
                    reason: "no PIN on record".to_string(),
                })
            }
        };

        if !verified {
            return Err(WitnessError::IncorrectPin);
        }

        info!(witness = %claimed, name = %secret.display_name, "witness verified");
        Ok(WitnessAssertion::issue(
            secret.actor_id,
            secret.display_name.clone(),
            self.time.now(),
        ))
    }

    /// Staff members eligible to witness a transaction by `acting_user`:
    /// everyone currently active except the acting user themselves.
    pub async fn active_witnesses(
        &self,
        acting_user: ActorId,
    ) -> Result<Vec<Actor>, WitnessError> {
        let staff = tokio::time::timeout(self.config.directory_timeout, self.staff.list_active())
            .await
            .map_err(|_| WitnessError::Timeout(self.config.directory_timeout))??;

        Ok(staff
            .into_iter()
            .filter(|actor| actor.id != acting_user)
            .collect())
    }
}
