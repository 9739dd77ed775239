//! History of accepted delta hashes.

use dl_01_cycle_events::{CycleError, DeltaHashSource};
use parking_lot::RwLock;
use shared_types::{short_hex, Hash};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{ConsensusError, DeltaCache, Result};

const UPDATES_CAPACITY: usize = 64;

struct HashHistory {
    /// (delta timestamp, hash), oldest first.
    by_time: BTreeSet<(u64, Hash)>,
    known: HashSet<Hash>,
    capacity: usize,
}

impl HashHistory {
    fn insert(&mut self, timestamp: u64, hash: Hash) {
        self.by_time.insert((timestamp, hash));
        self.known.insert(hash);
        while self.by_time.len() > self.capacity {
            if let Some((_, evicted)) = self.by_time.pop_first() {
                self.known.remove(&evicted);
            }
        }
    }
}

/// Time-ordered record of the deltas this node accepted, seeded with genesis.
pub struct DeltaHashProvider {
    cache: Arc<DeltaCache>,
    history: RwLock<HashHistory>,
    updates: broadcast::Sender<Hash>,
}

impl DeltaHashProvider {
    pub fn new(cache: Arc<DeltaCache>, capacity: usize) -> Self {
        let genesis_hash = cache.genesis_hash();
        let genesis_timestamp = cache
            .confirmed_delta(&genesis_hash)
            .map(|genesis| genesis.timestamp)
            .unwrap_or_default();
        let mut history = HashHistory {
            by_time: BTreeSet::new(),
            known: HashSet::new(),
            capacity: capacity.max(1),
        };
        history.insert(genesis_timestamp, genesis_hash);
        let (updates, _) = broadcast::channel(UPDATES_CAPACITY);
        Self {
            cache,
            history: RwLock::new(history),
            updates,
        }
    }

    /// Accept `new_hash` as the successor of `previous_hash`.
    ///
    /// Both deltas must be in the cache, the new one must name `previous_hash`
    /// as its parent and carry a strictly later timestamp.
    pub fn try_update_latest_hash(&self, previous_hash: &Hash, new_hash: &Hash) -> Result<()> {
        let previous = self.cache.confirmed_delta(previous_hash).ok_or_else(|| {
            warn!(previous = %short_hex(previous_hash), "Previous delta not found");
            ConsensusError::DeltaNotFound(short_hex(previous_hash))
        })?;
        let new = self.cache.confirmed_delta(new_hash).ok_or_else(|| {
            warn!(new = %short_hex(new_hash), "New delta not found");
            ConsensusError::DeltaNotFound(short_hex(new_hash))
        })?;

        if new.previous_delta_hash != *previous_hash {
            warn!(
                previous = %short_hex(previous_hash),
                new = %short_hex(new_hash),
                "New delta is not a child of the previous one"
            );
            return Err(ConsensusError::NotAChild {
                previous: short_hex(previous_hash),
                new: short_hex(new_hash),
            });
        }
        if new.timestamp <= previous.timestamp {
            warn!(
                new = %short_hex(new_hash),
                new_timestamp = new.timestamp,
                previous_timestamp = previous.timestamp,
                "New delta is older than its parent"
            );
            return Err(ConsensusError::NotNewer {
                new: short_hex(new_hash),
                previous_timestamp: previous.timestamp,
                new_timestamp: new.timestamp,
            });
        }

        {
            let mut history = self.history.write();
            if history.known.contains(new_hash) {
                debug!(new = %short_hex(new_hash), "Delta hash already accepted");
                return Err(ConsensusError::AlreadyAccepted(short_hex(new_hash)));
            }
            history.insert(new.timestamp, *new_hash);
        }

        info!(
            previous = %short_hex(previous_hash),
            new = %short_hex(new_hash),
            "Latest delta hash updated"
        );
        // No subscribers is fine.
        let _ = self.updates.send(*new_hash);
        Ok(())
    }

    /// Newest accepted hash stamped at or before `as_of` (unix millis).
    pub fn latest_hash_as_of(&self, as_of: u64) -> Option<Hash> {
        self.history
            .read()
            .by_time
            .range(..=(as_of, [0xFF; 32]))
            .next_back()
            .map(|(_, hash)| *hash)
    }

    /// Newest accepted hash overall.
    pub fn latest_hash(&self) -> Hash {
        let history = self.history.read();
        history
            .by_time
            .last()
            .map(|(_, hash)| *hash)
            .unwrap_or_else(|| self.cache.genesis_hash())
    }

    pub fn is_accepted(&self, hash: &Hash) -> bool {
        self.history.read().known.contains(hash)
    }

    /// Stream of newly accepted hashes.
    pub fn subscribe(&self) -> broadcast::Receiver<Hash> {
        self.updates.subscribe()
    }
}

impl DeltaHashSource for DeltaHashProvider {
    fn latest_delta_hash(&self, as_of: u64) -> std::result::Result<Hash, CycleError> {
        self.latest_hash_as_of(as_of)
            .ok_or_else(|| CycleError::DeltaHashUnavailable {
                as_of,
                reason: "no accepted delta at or before this time".into(),
            })
    }
}
