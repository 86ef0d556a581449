//! Content fingerprinting for deduplication.
//!
//! SHA-256 over the raw UTF-8 bytes of the lesson body. The hex digest is the
//! dedup key across projects, so it must be stable byte-for-byte.

use sha2::{Digest, Sha256};

/// Compute the 64-hex-char SHA-256 digest of a lesson body.
///
/// Pure and deterministic: identical input always yields an identical digest.
pub fn hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two digests in constant time.
///
/// Kept constant-time for compatibility with the original service contract,
/// even though collision attacks are not the threat model here.
pub fn equal(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
