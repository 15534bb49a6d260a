//! Lock name transformation.
//!
//! Lock names are caller-supplied and unbounded; CAS keys must be
//! fixed-length and storage-safe. Names are transformed by hashing, which
//! keeps keys stable across processes while preserving uniqueness up to the
//! collision resistance of the hash.

use sha2::{Digest, Sha256};

use crate::error::{LockerError, LockerResult};

/// Length of a transformed key in characters (SHA-256, hex encoded).
pub const TRANSFORMED_KEY_LENGTH: usize = 64;

/// Transforms a lock name into its CAS key.
///
/// Computes the SHA-256 digest of the UTF-8 encoding of `name` and encodes
/// it as lowercase hexadecimal. Identical names always produce identical
/// keys; distinct names produce distinct keys with overwhelming probability.
///
/// Empty names are rejected.
pub fn transform_name(name: &str) -> LockerResult<String> {
    if name.is_empty() {
        return Err(LockerError::InvalidName(
            "lock name cannot be empty".to_string(),
        ));
    }

    let digest = Sha256::digest(name.as_bytes());
    let key = digest.iter().map(|byte| format!("{byte:02x}")).collect();

    Ok(key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_transform_is_deterministic() {
        let first = transform_name("bug-RUN1--1").unwrap();
        let second = transform_name("bug-RUN1--1").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_transform_shape() {
        let key = transform_name("bug-RUN1--1").unwrap();
        assert_eq!(key.len(), TRANSFORMED_KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!key.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_transform_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            transform_name("abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_distinct_names_do_not_collide() {
        let mut keys = HashSet::new();
        for i in 0..10_000 {
            let name = format!("lock-{i}");
            assert!(keys.insert(transform_name(&name).unwrap()));
        }
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = transform_name("").unwrap_err();
        assert!(matches!(err, LockerError::InvalidName(_)));
    }

    #[test]
    fn test_non_ascii_names_are_accepted() {
        let key = transform_name("verrou-\u{e9}t\u{e9}").unwrap();
        assert_eq!(key.len(), TRANSFORMED_KEY_LENGTH);
    }
}
