//! Error types for the gossip subsystem.

use shared_types::PeerId;
use thiserror::Error;

/// Gossip errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GossipError {
    #[error("Peer unreachable: {0}")]
    PeerUnreachable(PeerId),

    #[error("Send to {peer} failed: {reason}")]
    SendFailed { peer: PeerId, reason: String },

    #[error("Invalid gossip configuration: {0}")]
    InvalidConfiguration(String),
}
