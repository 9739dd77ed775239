//! [`ConsensusGossip`] over the gossip subsystem's broadcast manager.

use async_trait::async_trait;
use dl_03_gossip::BroadcastManager;
use shared_types::ConsensusMessage;
use tracing::{debug, warn};

use crate::ports::outbound::ConsensusGossip;

#[async_trait]
impl ConsensusGossip for BroadcastManager {
    async fn broadcast(&self, payload: ConsensusMessage) {
        let kind = payload.kind();
        let (message, outcome) = self.broadcast_payload(payload).await;
        if outcome.failed > 0 {
            warn!(
                correlation_id = %message.correlation_id,
                kind,
                sent = outcome.sent,
                failed = outcome.failed,
                "Consensus message partially delivered"
            );
        } else {
            debug!(correlation_id = %message.correlation_id, kind, sent = outcome.sent, "Consensus message sent");
        }
    }
}
