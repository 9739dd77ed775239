//! # Mempool Adapter
//!
//! Pending transactions keyed by signature, served highest fee first.

use async_trait::async_trait;
use dl_02_delta_builder::MempoolGateway;
use parking_lot::RwLock;
use shared_types::{MempoolTransaction, Signature};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryMempool {
    pending: RwLock<HashMap<Signature, MempoolTransaction>>,
}

impl InMemoryMempool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction. Returns `false` if one with the same signature is
    /// already pending.
    pub fn submit(&self, transaction: MempoolTransaction) -> bool {
        let mut pending = self.pending.write();
        if pending.contains_key(&transaction.signature) {
            return false;
        }
        pending.insert(transaction.signature, transaction);
        true
    }

    /// Drop transactions that made it into a delta.
    pub fn remove_by_signatures(&self, signatures: &[Signature]) -> usize {
        let mut pending = self.pending.write();
        let removed = signatures
            .iter()
            .filter(|signature| pending.remove(*signature).is_some())
            .count();
        if removed > 0 {
            debug!(removed, remaining = pending.len(), "Pruned included transactions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }
}

#[async_trait]
impl MempoolGateway for InMemoryMempool {
    async fn pending_transactions_by_priority(
        &self,
        max_count: usize,
    ) -> Result<Vec<MempoolTransaction>, String> {
        let mut transactions: Vec<MempoolTransaction> =
            self.pending.read().values().cloned().collect();
        transactions.sort_by_key(|tx| (Reverse(tx.fee), tx.timestamp, tx.signature));
        transactions.truncate(max_count);
        Ok(transactions)
    }
}
