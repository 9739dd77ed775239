//! # Deltas
//!
//! A delta is one round's accepted batch of entries. Producers first announce
//! a [`CandidateDelta`] (hash only), voters pick a [`FavouriteDelta`], and the
//! elected producer publishes the full [`Delta`] under its content hash.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use crate::entities::{CoinbaseEntry, Hash, PeerId, PublicEntry, Signature};
use crate::hashing::sha256;

/// A producer's proposal for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateDelta {
    /// Digest of the salted entries, sorted signatures and coinbase.
    pub hash: Hash,
    pub producer_id: PeerId,
    pub previous_delta_hash: Hash,
}

/// A vote: the candidate `voter_id` considers best for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavouriteDelta {
    pub candidate: CandidateDelta,
    pub voter_id: PeerId,
}

/// Announces where an elected delta was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeltaAddress {
    /// Content hash of the published delta.
    pub delta_hash: Hash,
    pub previous_delta_hash: Hash,
}

/// Full content of a delta.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub previous_delta_hash: Hash,
    /// Hash of the candidate this delta was built as.
    pub merkle_root: Hash,
    pub coinbase: CoinbaseEntry,
    /// Entries in salted order.
    pub entries: Vec<PublicEntry>,
    /// Signatures in byte-lexicographic order.
    #[serde_as(as = "Vec<Bytes>")]
    pub signatures: Vec<Signature>,
    /// Unix millis at construction.
    pub timestamp: u64,
}

impl Delta {
    /// The root of every chain: empty, zero-stamped, parentless.
    pub fn genesis() -> Self {
        Self {
            previous_delta_hash: [0u8; 32],
            merkle_root: [0u8; 32],
            coinbase: CoinbaseEntry::new(0, [0u8; 32]),
            entries: Vec::new(),
            signatures: Vec::new(),
            timestamp: 0,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.previous_delta_hash);
        bytes.extend_from_slice(&self.merkle_root);
        bytes.extend_from_slice(&self.coinbase.to_bytes());
        bytes.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            bytes.extend_from_slice(&entry.to_bytes());
        }
        bytes.extend_from_slice(&(self.signatures.len() as u32).to_le_bytes());
        for signature in &self.signatures {
            bytes.extend_from_slice(signature);
        }
        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes
    }

    /// Content address under which the delta is published.
    pub fn hash(&self) -> Hash {
        sha256(&self.to_bytes())
    }
}
