//! Canonical serialization for deterministic fingerprints.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable Vec order: Vectors serialize in index order
//! - No HashMap allowed: Use BTreeMap/BTreeSet for anything fingerprinted

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute the canonical hash as a 16-digit hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Serialize)]
    struct Members {
        identifier: u32,
        members: BTreeSet<u32>,
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = Members {
            identifier: 1,
            members: [3, 1, 2].into_iter().collect(),
        };
        let b = Members {
            identifier: 1,
            members: [2, 3, 1].into_iter().collect(),
        };
        assert_eq!(canonical_hash(&a), canonical_hash(&b));
        assert_eq!(canonical_hash_hex(&a).len(), 16);
    }
}
