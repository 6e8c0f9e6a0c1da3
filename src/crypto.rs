//! Hash primitives used for transaction identifiers

use crate::types::Hash;
use sha2::{Digest, Sha256};

/// Double SHA-256 hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256d;

impl Sha256d {
    pub fn new() -> Self {
        Self
    }

    /// Single SHA256
    pub fn hash(&self, data: &[u8]) -> Hash {
        Sha256::digest(data).into()
    }

    /// SHA256(SHA256(data))
    pub fn hash256(&self, data: &[u8]) -> Hash {
        Sha256::digest(Sha256::digest(data)).into()
    }
}

/// Convenience function for single SHA256 hash
pub fn sha256(data: &[u8]) -> Hash {
    Sha256d::new().hash(data)
}

/// Convenience function for double SHA256 hash
pub fn hash256(data: &[u8]) -> Hash {
    Sha256d::new().hash256(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash256_empty() {
        assert_eq!(
            hex::encode(hash256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_hash256_is_sha256_twice() {
        let data = b"witness";
        assert_eq!(hash256(data), sha256(&sha256(data)));
    }
}
