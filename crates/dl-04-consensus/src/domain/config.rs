//! Consensus configuration.

use serde::Deserialize;

use super::{ConsensusError, Result};

/// Tuning for voting, election and history retention.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Producers allowed to build a candidate each round, taken from the top
    /// of the priority ranking. Lower-ranked peers stand by.
    pub max_producers_per_cycle: usize,
    /// Accepted delta hashes remembered for `latest_delta_hash(as_of)` lookups.
    pub hash_history_capacity: usize,
    /// Rounds of candidates and votes kept before the oldest is dropped.
    pub retained_rounds: usize,
    /// Delta bodies kept in the local cache.
    pub delta_cache_capacity: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            max_producers_per_cycle: 5,
            hash_history_capacity: 10_000,
            retained_rounds: 16,
            delta_cache_capacity: 1_024,
        }
    }
}

impl ConsensusConfig {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.max_producers_per_cycle, "max_producers_per_cycle"),
            (self.hash_history_capacity, "hash_history_capacity"),
            (self.retained_rounds, "retained_rounds"),
            (self.delta_cache_capacity, "delta_cache_capacity"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(ConsensusError::InvalidConfiguration(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }
}
