//! # Core Domain Entities
//!
//! Identities and transaction records used throughout the node.
//!
//! ## Clusters
//!
//! - **Identity**: `NodeId`, `PeerId`, `PublicKey`, `CorrelationId`
//! - **Transactions**: `PublicEntry`, `MempoolTransaction`, `CoinbaseEntry`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use uuid::Uuid;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// Format version of a plain (non-confidential) entry.
pub const PUBLIC_ENTRY_VERSION: u32 = 1;

/// Largest `PublicEntry::data` payload a delta may carry.
///
/// Keeps the encoded length prefix within its `u32`.
pub const MAX_ENTRY_DATA_LEN: usize = 1 << 20;

/// Format version stamped on coinbase records.
pub const COINBASE_VERSION: u32 = 0;

/// Unique identifier for a node in the network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub [u8; 32]);

/// A peer identifier (alias for `NodeId` in peer contexts).
pub type PeerId = NodeId;

impl NodeId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for NodeId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..4]))
    }
}

/// Identifier correlating every copy of one gossiped message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A plain value transfer between two keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicEntry {
    pub sender_public_key: PublicKey,
    pub receiver_public_key: PublicKey,
    pub amount: u64,
    pub data: Vec<u8>,
}

impl PublicEntry {
    /// Canonical encoding: sender, receiver, amount (LE), data length (LE u32), data.
    ///
    /// Only entries within [`MAX_ENTRY_DATA_LEN`] are ever encoded into a
    /// delta, so the length prefix is exact.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 32 + 8 + 4 + self.data.len());
        bytes.extend_from_slice(&self.sender_public_key);
        bytes.extend_from_slice(&self.receiver_public_key);
        bytes.extend_from_slice(&self.amount.to_le_bytes());
        bytes.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}

/// A pending transaction as handed out by the mempool.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolTransaction {
    /// The transfer itself.
    pub entry: PublicEntry,
    /// Sender's signature over the entry.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
    /// Earliest inclusion time; anything above zero is time-locked.
    pub lock_time: i64,
    /// Entry format version (1 = public entry).
    pub version: u32,
    /// Fee paid to the producer.
    pub fee: u64,
    /// Gas ceiling declared by the sender.
    pub gas_limit: u64,
    /// Price per unit of gas.
    pub gas_price: u64,
    /// Unix millis when the transaction entered the mempool.
    pub timestamp: u64,
}

impl MempoolTransaction {
    /// Whether the entry may be packed into a delta right now.
    pub fn is_includable(&self) -> bool {
        self.lock_time <= 0 && self.version == PUBLIC_ENTRY_VERSION && !self.has_oversized_data()
    }

    pub fn has_oversized_data(&self) -> bool {
        self.entry.data.len() > MAX_ENTRY_DATA_LEN
    }
}

/// Reward record appended to every delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseEntry {
    pub amount: u64,
    pub receiver_public_key: PublicKey,
    pub version: u32,
}

impl CoinbaseEntry {
    pub fn new(amount: u64, receiver_public_key: PublicKey) -> Self {
        Self {
            amount,
            receiver_public_key,
            version: COINBASE_VERSION,
        }
    }

    /// Canonical encoding: amount (LE), receiver, version (LE).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + 32 + 4);
        bytes.extend_from_slice(&self.amount.to_le_bytes());
        bytes.extend_from_slice(&self.receiver_public_key);
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes
    }
}
