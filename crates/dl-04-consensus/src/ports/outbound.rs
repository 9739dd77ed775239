//! Driven ports (Outbound dependencies)

use async_trait::async_trait;
use shared_types::{ConsensusMessage, Delta, Hash};

/// Content-addressed storage for elected deltas
#[async_trait]
pub trait DeltaStore: Send + Sync {
    /// Persist `delta` and return its address (`Delta::hash`).
    async fn publish(&self, delta: &Delta) -> Result<Hash, String>;

    /// Retrieve a delta by address; `Ok(None)` if the store does not have it.
    async fn fetch(&self, address: &Hash) -> Result<Option<Delta>, String>;
}

/// Dissemination of this node's consensus messages
#[async_trait]
pub trait ConsensusGossip: Send + Sync {
    async fn broadcast(&self, payload: ConsensusMessage);
}
