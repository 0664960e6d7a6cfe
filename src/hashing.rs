//! Archive Digest - SHA-256
//!
//! Lets callers confirm two exports produced byte-identical archives.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return lowercase hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(sha256_hex(b"archive"), sha256_hex(b"archive"));
        assert_ne!(sha256_hex(b"archive"), sha256_hex(b"archive2"));
    }
}
