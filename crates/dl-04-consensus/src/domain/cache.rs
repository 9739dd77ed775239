//! Local and confirmed delta bodies.

use dl_02_delta_builder::LocalDeltaStore;
use parking_lot::RwLock;
use shared_types::{short_hex, CandidateDelta, Delta, Hash};
use tracing::trace;

use super::BoundedMap;

/// Delta bodies known to this node.
///
/// *Local* deltas are this node's own candidates, keyed by candidate hash,
/// kept until the round is elected. *Confirmed* deltas are keyed by their
/// content hash and always include genesis.
pub struct DeltaCache {
    genesis_hash: Hash,
    genesis: Delta,
    local: RwLock<BoundedMap<Hash, Delta>>,
    confirmed: RwLock<BoundedMap<Hash, Delta>>,
}

impl DeltaCache {
    pub fn new(capacity: usize) -> Self {
        let genesis = Delta::genesis();
        Self {
            genesis_hash: genesis.hash(),
            genesis,
            local: RwLock::new(BoundedMap::new(capacity)),
            confirmed: RwLock::new(BoundedMap::new(capacity)),
        }
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }

    pub fn local_delta(&self, candidate_hash: &Hash) -> Option<Delta> {
        self.local.read().get(candidate_hash).cloned()
    }

    pub fn confirmed_delta(&self, delta_hash: &Hash) -> Option<Delta> {
        if *delta_hash == self.genesis_hash {
            return Some(self.genesis.clone());
        }
        self.confirmed.read().get(delta_hash).cloned()
    }

    pub fn add_confirmed_delta(&self, delta_hash: Hash, delta: Delta) {
        trace!(delta = %short_hex(&delta_hash), "Caching confirmed delta");
        self.confirmed.write().insert(delta_hash, delta);
    }
}

impl LocalDeltaStore for DeltaCache {
    fn add_local_delta(&self, candidate: &CandidateDelta, delta: Delta) {
        trace!(candidate = %short_hex(&candidate.hash), "Caching local delta");
        self.local.write().insert(candidate.hash, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PeerId;

    fn child_of(previous: Hash, timestamp: u64) -> Delta {
        Delta {
            previous_delta_hash: previous,
            timestamp,
            ..Delta::genesis()
        }
    }

    #[test]
    fn test_genesis_always_confirmed() {
        let cache = DeltaCache::new(1);
        for t in 1..5 {
            let delta = child_of([0u8; 32], t);
            cache.add_confirmed_delta(delta.hash(), delta);
        }
        let genesis_hash = cache.genesis_hash();
        assert_eq!(cache.confirmed_delta(&genesis_hash), Some(Delta::genesis()));
    }

    #[test]
    fn test_local_delta_keyed_by_candidate_hash() {
        let cache = DeltaCache::new(4);
        let candidate = CandidateDelta {
            hash: [9u8; 32],
            producer_id: PeerId::from([1u8; 32]),
            previous_delta_hash: cache.genesis_hash(),
        };
        let delta = child_of(cache.genesis_hash(), 10);
        cache.add_local_delta(&candidate, delta.clone());

        assert_eq!(cache.local_delta(&[9u8; 32]), Some(delta));
        assert!(cache.confirmed_delta(&[9u8; 32]).is_none());
    }
}
