//! Hashing utilities shared by the delta builder, producer ranking and consensus.

use sha2::{Digest, Sha256};

use crate::Hash;

/// Compute SHA-256 hash of data
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 over the concatenation of `parts` without allocating it.
#[inline]
pub fn sha256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// First 8 bytes of a hash as lowercase hex, for log lines.
pub fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..8])
}
