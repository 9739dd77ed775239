//! Inbound ports (API) for the gossip subsystem.

use async_trait::async_trait;
use shared_types::{CorrelationId, GossipMessage};

use crate::domain::{BroadcastOutcome, GossipStats, ReceiveOutcome};

/// Gossip API.
#[async_trait]
pub trait GossipApi: Send + Sync {
    /// Send `message` to up to `K` peers and count the sends against its id.
    async fn broadcast(&self, message: GossipMessage) -> BroadcastOutcome;

    /// Count a receipt of `message`, forwarding it if this is the first one.
    async fn receive(&self, message: GossipMessage) -> ReceiveOutcome;

    /// Counters of a live correlation id.
    fn stats(&self, correlation_id: &CorrelationId) -> Option<GossipStats>;
}
