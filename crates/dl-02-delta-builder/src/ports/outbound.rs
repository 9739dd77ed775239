//! Driven ports (Outbound dependencies)

use async_trait::async_trait;
use shared_types::{CandidateDelta, Delta, MempoolTransaction, PeerId};

/// Mempool interface for delta building
#[async_trait]
pub trait MempoolGateway: Send + Sync {
    /// Pending transactions, highest priority first
    ///
    /// `Err` means the mempool is unavailable; the build fails without retry.
    async fn pending_transactions_by_priority(
        &self,
        max_count: usize,
    ) -> Result<Vec<MempoolTransaction>, String>;
}

/// Read-only view of the peers this node knows about
pub trait PeerDirectory: Send + Sync {
    /// Snapshot of all known peers, including the local node
    fn known_peers(&self) -> Vec<PeerId>;
}

/// Keeps the full content of locally built candidates
pub trait LocalDeltaStore: Send + Sync {
    fn add_local_delta(&self, candidate: &CandidateDelta, delta: Delta);
}
