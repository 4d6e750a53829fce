//! SHA-256 checksum verification for downloaded artifacts.
//!
//! Catalog checksums take the form `sha256:<lowercase-hex>` and are compared
//! byte-for-byte against the digest of the downloaded content.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{RegistryError, RegistryResult};

/// Prefix of every checksum string.
const SHA256_PREFIX: &str = "sha256:";

/// Compute the catalog-format checksum of `data`.
#[must_use]
pub fn sha256_checksum(data: &[u8]) -> String {
    format!("{SHA256_PREFIX}{}", hex::encode(Sha256::digest(data)))
}

/// Verify `data` against a declared checksum.
///
/// # Errors
///
/// Returns [`RegistryError::Integrity`] carrying both checksums when they differ.
pub fn verify_checksum(data: &[u8], expected: &str, name: &str) -> RegistryResult<()> {
    let actual = sha256_checksum(data);

    // Slices of different lengths compare unequal.
    if !bool::from(actual.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(RegistryError::Integrity {
            name: name.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_checksum(b"hello"),
            "sha256:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_verify_matching() {
        let data = b"#!/bin/sh\necho hi\n";
        verify_checksum(data, &sha256_checksum(data), "hi").unwrap();
    }

    #[test]
    fn test_verify_mismatch_reports_both() {
        let expected = sha256_checksum(b"published");
        let err = verify_checksum(b"tampered", &expected, "fmt").unwrap_err();
        match err {
            RegistryError::Integrity {
                name,
                expected: e,
                actual,
            } => {
                assert_eq!(name, "fmt");
                assert_eq!(e, expected);
                assert_eq!(actual, sha256_checksum(b"tampered"));
            },
            other => panic!("expected Integrity, got {other:?}"),
        }
    }

    #[test]
    fn test_uppercase_hex_is_a_mismatch() {
        let data = b"payload";
        let upper = sha256_checksum(data).to_uppercase().replace("SHA256:", "sha256:");
        assert!(verify_checksum(data, &upper, "p").is_err());
    }

    #[test]
    fn test_missing_prefix_is_a_mismatch() {
        let data = b"payload";
        let bare = hex::encode(Sha256::digest(data));
        assert!(verify_checksum(data, &bare, "p").is_err());
    }
}
