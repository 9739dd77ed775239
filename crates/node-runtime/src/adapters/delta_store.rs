//! # Delta Store Adapter
//!
//! Content-addressed delta storage shared by every node in the process.

use async_trait::async_trait;
use dashmap::DashMap;
use dl_04_consensus::DeltaStore;
use shared_types::{short_hex, Delta, Hash};
use tracing::trace;

#[derive(Default)]
pub struct InMemoryDeltaStore {
    deltas: DashMap<Hash, Delta>,
}

impl InMemoryDeltaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

#[async_trait]
impl DeltaStore for InMemoryDeltaStore {
    async fn publish(&self, delta: &Delta) -> Result<Hash, String> {
        let address = delta.hash();
        self.deltas.entry(address).or_insert_with(|| delta.clone());
        trace!(address = %short_hex(&address), "Stored delta");
        Ok(address)
    }

    async fn fetch(&self, address: &Hash) -> Result<Option<Delta>, String> {
        Ok(self.deltas.get(address).map(|delta| delta.value().clone()))
    }
}
