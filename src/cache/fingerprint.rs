//! Content fingerprints for write deduplication
//!
//! A fingerprint is the SHA256 of a blob's bytes. It is only used to compare
//! incoming content against the cached copy, never to authenticate it.

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters shown in short fingerprints
const SHORT_HEX_LEN: usize = 12;

/// SHA256 digest of a blob
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint the given bytes
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hasher.finalize().into())
    }

    /// Fingerprint of zero bytes, used for keys the cache has never seen
    pub fn empty() -> Self {
        Self::of(&[])
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex chars, enough to tell entries apart in logs
    pub fn short(&self) -> String {
        hex::encode(&self.0[..SHORT_HEX_LEN / 2])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}
