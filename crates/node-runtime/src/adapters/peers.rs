//! # Peer Directory Adapter
//!
//! The authorised node set, fixed at start-up from configuration and
//! adjustable at runtime.

use dl_02_delta_builder::PeerDirectory as ProducerDirectory;
use dl_03_gossip::PeerDirectory as GossipDirectory;
use parking_lot::RwLock;
use shared_types::PeerId;

/// Sorted, duplicate-free peer set that includes the local node.
///
/// Producer ranking sees the set in id order. Gossip sees it rotated to start
/// just after the local node, so each node relays to its successors and a
/// flood walks the whole ring.
pub struct StaticPeerDirectory {
    local_peer_id: PeerId,
    peers: RwLock<Vec<PeerId>>,
}

impl StaticPeerDirectory {
    pub fn new(local_peer_id: PeerId, peers: impl IntoIterator<Item = PeerId>) -> Self {
        let mut all: Vec<PeerId> = peers.into_iter().collect();
        all.push(local_peer_id);
        all.sort_unstable();
        all.dedup();
        Self {
            local_peer_id,
            peers: RwLock::new(all),
        }
    }

    pub fn add_peer(&self, peer: PeerId) -> bool {
        let mut peers = self.peers.write();
        match peers.binary_search(&peer) {
            Ok(_) => false,
            Err(at) => {
                peers.insert(at, peer);
                true
            }
        }
    }

    pub fn remove_peer(&self, peer: &PeerId) -> bool {
        let mut peers = self.peers.write();
        match peers.binary_search(peer) {
            Ok(at) => {
                peers.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    fn snapshot(&self) -> Vec<PeerId> {
        self.peers.read().clone()
    }

    fn ring_from_local(&self) -> Vec<PeerId> {
        let mut peers = self.snapshot();
        let start = match peers.binary_search(&self.local_peer_id) {
            Ok(at) => at + 1,
            Err(at) => at,
        };
        let len = peers.len().max(1);
        peers.rotate_left(start % len);
        peers
    }
}

impl ProducerDirectory for StaticPeerDirectory {
    fn known_peers(&self) -> Vec<PeerId> {
        self.snapshot()
    }
}

impl GossipDirectory for StaticPeerDirectory {
    fn known_peers(&self) -> Vec<PeerId> {
        self.ring_from_local()
    }
}
