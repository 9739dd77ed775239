//! Outbound ports (SPI) for the gossip subsystem.

use async_trait::async_trait;
use shared_types::{GossipMessage, PeerId};

use crate::events::GossipError;

/// Point-to-point delivery of gossip messages.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn send(&self, peer: PeerId, message: GossipMessage) -> Result<(), GossipError>;
}

/// Peers eligible as gossip targets, in a stable order.
pub trait PeerDirectory: Send + Sync {
    fn known_peers(&self) -> Vec<PeerId>;
}
