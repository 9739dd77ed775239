//! # In-Memory Network
//!
//! One bounded inbox per registered node. Delivery is point to point and
//! asynchronous; a full inbox applies back-pressure to the sender.

use async_trait::async_trait;
use dashmap::DashMap;
use dl_03_gossip::{GossipError, PeerTransport};
use shared_types::{GossipMessage, PeerId};
use tokio::sync::mpsc;

/// Messages buffered per node.
pub const INBOX_CAPACITY: usize = 1_024;

#[derive(Default)]
pub struct InMemoryNetwork {
    inboxes: DashMap<PeerId, mpsc::Sender<GossipMessage>>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `peer`, replacing any earlier registration.
    pub fn register(&self, peer: PeerId) -> mpsc::Receiver<GossipMessage> {
        let (sender, receiver) = mpsc::channel(INBOX_CAPACITY);
        self.inboxes.insert(peer, sender);
        receiver
    }

    pub fn disconnect(&self, peer: &PeerId) -> bool {
        self.inboxes.remove(peer).is_some()
    }

    pub fn is_connected(&self, peer: &PeerId) -> bool {
        self.inboxes.contains_key(peer)
    }
}

#[async_trait]
impl PeerTransport for InMemoryNetwork {
    async fn send(&self, peer: PeerId, message: GossipMessage) -> Result<(), GossipError> {
        let sender = self
            .inboxes
            .get(&peer)
            .map(|inbox| inbox.value().clone())
            .ok_or(GossipError::PeerUnreachable(peer))?;
        sender
            .send(message)
            .await
            .map_err(|_| GossipError::SendFailed {
                peer,
                reason: "inbox closed".into(),
            })
    }
}
