//! PIN digest and comparison primitives.
//!
//! All comparisons are constant-time. Plaintext comparison hashes both
//! sides first so the comparison cost never depends on where the strings
//! diverge or how long they are.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Digest a PIN for storage. New witnesses are always enrolled with this;
/// plaintext storage exists only for records not yet migrated.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// Compare an entered PIN against a stored hex digest.
pub fn matches_hash(entered: &str, stored_hex: &str) -> bool {
    let Ok(stored) = hex::decode(stored_hex) else {
        return false;
    };
    let digest = Sha256::digest(entered.as_bytes());
    if stored.len() != digest.len() {
        return false;
    }
    bool::from(digest.as_slice().ct_eq(&stored))
}

/// Compare an entered PIN against a stored plaintext value (legacy path).
pub fn matches_plaintext(entered: &str, stored: &str) -> bool {
    let a = Sha256::digest(entered.as_bytes());
    let b = Sha256::digest(stored.as_bytes());
    bool::from(a.as_slice().ct_eq(b.as_slice()))
}
