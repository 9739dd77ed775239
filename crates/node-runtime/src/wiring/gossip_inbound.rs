//! Routes gossip arriving at this node into the consensus service.

use dl_03_gossip::{BroadcastManager, GossipApi};
use dl_04_consensus::{ConsensusApi, ConsensusService};
use shared_types::{ConsensusMessage, GossipMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub struct GossipInbound {
    gossip: Arc<BroadcastManager>,
    consensus: Arc<ConsensusService>,
}

impl GossipInbound {
    pub fn new(gossip: Arc<BroadcastManager>, consensus: Arc<ConsensusService>) -> Self {
        Self { gossip, consensus }
    }

    /// Count and forward the message, then hand its payload to consensus.
    ///
    /// Candidates are scored on every receipt so repeats raise their
    /// popularity; favourites and addresses go through on the first receipt
    /// only.
    pub async fn on_message(&self, message: GossipMessage) {
        let outcome = self.gossip.receive(message).await;
        if message.originator == self.gossip.local_peer_id() {
            debug!(correlation_id = %message.correlation_id, "Ignoring echo of own message");
            return;
        }
        let is_candidate = matches!(message.payload, ConsensusMessage::Candidate(_));
        if !outcome.first_receipt && !is_candidate {
            return;
        }
        if let Err(e) = self.consensus.handle_message(message.payload).await {
            warn!(
                kind = message.payload.kind(),
                originator = %message.originator,
                error = %e,
                "Consensus rejected gossiped message"
            );
        }
    }

    pub async fn run(
        self,
        mut inbox: mpsc::Receiver<GossipMessage>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                received = inbox.recv() => match received {
                    Some(message) => self.on_message(message).await,
                    None => break,
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Gossip inbound loop stopped");
    }
}
