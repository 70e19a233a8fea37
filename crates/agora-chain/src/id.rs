//! Deterministic id derivation
//!
//! A platform transaction id maps to its on-chain escrow id by Keccak-256
//! over the UTF-8 bytes. Every caller - funding, querying, disputing -
//! derives the same way, so one off-chain transaction always addresses the
//! same on-chain record with no lookup table.

use agora_types::Hash32;
use sha3::{Digest, Keccak256};

/// Derive the on-chain escrow id for a platform transaction id
///
/// Deterministic and one-way: identical inputs always produce identical
/// ids, and distinct inputs collide only with negligible probability.
pub fn escrow_id(transaction_id: &str) -> Hash32 {
    keccak256(transaction_id.as_bytes())
}

/// Hash success-criteria JSON into the on-chain criteria commitment
///
/// A nonzero criteria hash on an escrow names machine-checkable success
/// criteria, enabling automated dispute resolution.
pub fn criteria_hash(criteria_json: &str) -> Hash32 {
    keccak256(criteria_json.as_bytes())
}

fn keccak256(data: &[u8]) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash32::new(hasher.finalize().into())
}
