//! Broadcast manager: the gossip service.

use async_trait::async_trait;
use futures::future::join_all;
use shared_types::{ConsensusMessage, CorrelationId, GossipMessage, PeerId};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::domain::{
    select_gossip_targets, BroadcastOutcome, GossipCache, GossipConfig, GossipEntry, GossipStats,
    ReceiveOutcome,
};
use crate::events::GossipError;
use crate::ports::inbound::GossipApi;
use crate::ports::outbound::{PeerDirectory, PeerTransport};

/// Fan-out gossip with per-correlation-id accounting.
pub struct BroadcastManager {
    local_peer_id: PeerId,
    config: GossipConfig,
    cache: GossipCache,
    transport: Arc<dyn PeerTransport>,
    peer_directory: Arc<dyn PeerDirectory>,
}

impl BroadcastManager {
    pub fn new(
        local_peer_id: PeerId,
        config: GossipConfig,
        transport: Arc<dyn PeerTransport>,
        peer_directory: Arc<dyn PeerDirectory>,
    ) -> Result<Self, GossipError> {
        config.validate()?;
        Ok(Self {
            local_peer_id,
            cache: GossipCache::new(config.cache_ttl),
            config,
            transport,
            peer_directory,
        })
    }

    pub fn local_peer_id(&self) -> PeerId {
        self.local_peer_id
    }

    /// Originate `payload` from this node under a fresh correlation id.
    pub async fn broadcast_payload(
        &self,
        payload: ConsensusMessage,
    ) -> (GossipMessage, BroadcastOutcome) {
        let message = GossipMessage::new(self.local_peer_id, payload);
        let outcome = self.broadcast(message).await;
        (message, outcome)
    }

    pub fn sweep_expired(&self) -> usize {
        let removed = self.cache.sweep_expired();
        if removed > 0 {
            debug!(removed, remaining = self.cache.len(), "Swept expired gossip entries");
        }
        removed
    }

    /// Sweep expired entries every `sweep_interval` until `shutdown` flips.
    pub fn spawn_sweeper(self: &Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(manager.config.sweep_interval);
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        manager.sweep_expired();
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
        })
    }

    async fn gossip(&self, entry: &GossipEntry, message: GossipMessage) -> BroadcastOutcome {
        let known = self.peer_directory.known_peers();
        let mut targets = select_gossip_targets(
            &known,
            &self.local_peer_id,
            &message.originator,
            self.config.fanout,
        );
        let granted = entry.reserve_sends(targets.len(), self.config.fanout);
        targets.truncate(granted);

        if targets.is_empty() {
            debug!(
                correlation_id = %message.correlation_id,
                known = known.len(),
                "No gossip targets available"
            );
            return BroadcastOutcome::default();
        }

        let results = join_all(
            targets
                .iter()
                .map(|peer| self.transport.send(*peer, message)),
        )
        .await;

        let mut outcome = BroadcastOutcome::default();
        for (peer, result) in targets.iter().zip(results) {
            match result {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    warn!(peer = %peer, error = %e, "Gossip send failed");
                    outcome.failed += 1;
                }
            }
        }
        entry.release_sends(outcome.failed);

        debug!(
            correlation_id = %message.correlation_id,
            kind = message.payload.kind(),
            sent = outcome.sent,
            failed = outcome.failed,
            "Gossiped message"
        );
        outcome
    }
}

#[async_trait]
impl GossipApi for BroadcastManager {
    async fn broadcast(&self, message: GossipMessage) -> BroadcastOutcome {
        let entry = self.cache.entry(message.correlation_id);
        entry.claim_forward();
        self.gossip(&entry, message).await
    }

    async fn receive(&self, message: GossipMessage) -> ReceiveOutcome {
        let entry = self.cache.entry(message.correlation_id);
        let received_count = entry.record_receipt();
        let first_receipt = received_count == 1;

        let forwarded = if first_receipt && entry.claim_forward() {
            self.gossip(&entry, message).await.sent
        } else {
            0
        };

        trace!(
            correlation_id = %message.correlation_id,
            originator = %message.originator,
            received_count,
            first_receipt,
            "Received gossip"
        );
        ReceiveOutcome {
            received_count,
            first_receipt,
            forwarded,
        }
    }

    fn stats(&self, correlation_id: &CorrelationId) -> Option<GossipStats> {
        self.cache.stats(correlation_id)
    }
}
