//! Driving ports (API)

use async_trait::async_trait;
use shared_types::{CandidateDelta, Hash, PeerId};

use crate::error::Result;

/// Candidate construction for the local producer.
#[async_trait]
pub trait DeltaBuilderApi: Send + Sync {
    /// Build this node's candidate for the round after `previous_delta_hash`.
    ///
    /// Deterministic for a given mempool snapshot and previous hash.
    async fn build_candidate_delta(&self, previous_delta_hash: Hash) -> Result<CandidateDelta>;
}

/// Producer order for a round.
pub trait ProducerRanking: Send + Sync {
    /// Rank an explicit peer set.
    fn rank_producers(&self, previous_delta_hash: &Hash, known_peers: &[PeerId]) -> Vec<PeerId>;

    /// Rank the peer directory's current snapshot.
    fn get_producers(&self, previous_delta_hash: &Hash) -> Vec<PeerId>;
}
