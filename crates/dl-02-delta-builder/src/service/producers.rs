//! Producer priority for a round, memoized per previous delta hash.

use parking_lot::Mutex;
use shared_types::{short_hex, Hash, PeerId};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

use crate::domain::rank_producers;
use crate::ports::inbound::ProducerRanking;
use crate::ports::outbound::PeerDirectory;

struct CachedRanking {
    /// Sorted peer snapshot the ranking was computed from.
    peers: Vec<PeerId>,
    ranking: Vec<PeerId>,
}

/// Bounded FIFO cache of rankings.
struct RankingCache {
    entries: HashMap<Hash, CachedRanking>,
    insertion_order: VecDeque<Hash>,
    max_size: usize,
}

impl RankingCache {
    fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_size),
            insertion_order: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    fn get(&self, previous: &Hash, peers: &[PeerId]) -> Option<Vec<PeerId>> {
        self.entries
            .get(previous)
            .filter(|cached| cached.peers == peers)
            .map(|cached| cached.ranking.clone())
    }

    fn insert(&mut self, previous: Hash, peers: Vec<PeerId>, ranking: Vec<PeerId>) {
        if self.max_size == 0 {
            return;
        }
        if !self.entries.contains_key(&previous) {
            if self.entries.len() >= self.max_size {
                if let Some(oldest) = self.insertion_order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
            self.insertion_order.push_back(previous);
        }
        self.entries.insert(previous, CachedRanking { peers, ranking });
    }
}

/// Ranks known peers by `sha256(peer_id ‖ previous_delta_hash)`.
pub struct ProducerPriorityProvider {
    peer_directory: Arc<dyn PeerDirectory>,
    cache: Mutex<RankingCache>,
}

impl ProducerPriorityProvider {
    pub fn new(peer_directory: Arc<dyn PeerDirectory>, cache_size: usize) -> Self {
        Self {
            peer_directory,
            cache: Mutex::new(RankingCache::new(cache_size)),
        }
    }
}

impl ProducerRanking for ProducerPriorityProvider {
    fn rank_producers(&self, previous_delta_hash: &Hash, known_peers: &[PeerId]) -> Vec<PeerId> {
        rank_producers(previous_delta_hash, known_peers.iter().copied())
    }

    fn get_producers(&self, previous_delta_hash: &Hash) -> Vec<PeerId> {
        let mut peers = self.peer_directory.known_peers();
        peers.sort_unstable();
        peers.dedup();

        if let Some(ranking) = self.cache.lock().get(previous_delta_hash, &peers) {
            return ranking;
        }

        let ranking = rank_producers(previous_delta_hash, peers.iter().copied());
        debug!(
            previous = %short_hex(previous_delta_hash),
            producers = ranking.len(),
            "Ranked producers for round"
        );
        self.cache
            .lock()
            .insert(*previous_delta_hash, peers, ranking.clone());
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockPeerDirectory {
        peers: Mutex<Vec<PeerId>>,
        calls: AtomicUsize,
    }

    impl MockPeerDirectory {
        fn with(peers: Vec<PeerId>) -> Arc<Self> {
            Arc::new(Self {
                peers: Mutex::new(peers),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl PeerDirectory for MockPeerDirectory {
        fn known_peers(&self) -> Vec<PeerId> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.peers.lock().clone()
        }
    }

    fn peers(n: u8) -> Vec<PeerId> {
        (0..n).map(|i| PeerId::from([i; 32])).collect()
    }

    #[test]
    fn test_get_producers_matches_explicit_ranking() {
        let directory = MockPeerDirectory::with(peers(8));
        let provider = ProducerPriorityProvider::new(directory, 4);
        let previous = [3u8; 32];
        assert_eq!(
            provider.get_producers(&previous),
            provider.rank_producers(&previous, &peers(8))
        );
    }

    #[test]
    fn test_ranking_recomputed_when_peer_set_changes() {
        let directory = MockPeerDirectory::with(peers(4));
        let provider = ProducerPriorityProvider::new(Arc::clone(&directory) as Arc<dyn PeerDirectory>, 4);
        let previous = [3u8; 32];
        assert_eq!(provider.get_producers(&previous).len(), 4);

        *directory.peers.lock() = peers(6);
        assert_eq!(provider.get_producers(&previous).len(), 6);
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = RankingCache::new(2);
        cache.insert([1u8; 32], vec![], vec![]);
        cache.insert([2u8; 32], vec![], vec![]);
        cache.insert([3u8; 32], vec![], vec![]);
        assert!(cache.get(&[1u8; 32], &[]).is_none());
        assert!(cache.get(&[2u8; 32], &[]).is_some());
        assert!(cache.get(&[3u8; 32], &[]).is_some());
    }

    #[test]
    fn test_rank_input_order_irrelevant() {
        let provider = ProducerPriorityProvider::new(MockPeerDirectory::with(vec![]), 0);
        let mut reversed = peers(10);
        reversed.reverse();
        let previous = [9u8; 32];
        assert_eq!(
            provider.rank_producers(&previous, &peers(10)),
            provider.rank_producers(&previous, &reversed)
        );
    }
}
