//! Removes transactions from the mempool once a delta carrying them is
//! accepted.

use dl_04_consensus::DeltaCache;
use shared_types::{short_hex, Hash};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::adapters::InMemoryMempool;

pub struct MempoolPruner {
    cache: Arc<DeltaCache>,
    mempool: Arc<InMemoryMempool>,
}

impl MempoolPruner {
    pub fn new(cache: Arc<DeltaCache>, mempool: Arc<InMemoryMempool>) -> Self {
        Self { cache, mempool }
    }

    pub fn on_accepted(&self, delta_hash: &Hash) -> usize {
        let Some(delta) = self.cache.confirmed_delta(delta_hash) else {
            debug!(delta = %short_hex(delta_hash), "Accepted delta not cached, nothing to prune");
            return 0;
        };
        self.mempool.remove_by_signatures(&delta.signatures)
    }

    /// Prune for every hash on `accepted` until shutdown.
    pub async fn run(
        self,
        mut accepted: broadcast::Receiver<Hash>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                received = accepted.recv() => match received {
                    Ok(delta_hash) => {
                        self.on_accepted(&delta_hash);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Mempool pruning lagged behind accepted deltas");
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Mempool pruning loop stopped");
    }
}
