//! # Delta Builder Service
//!
//! Turns a mempool snapshot into this node's [`CandidateDelta`] for the round.
//!
//! ## Algorithm
//!
//! 1. Fetch pending transactions (fails fast if the mempool is unavailable)
//! 2. Drop time-locked and non-public entries, pack by gas price under the limit
//! 3. Salt = first ISAAC word seeded with the previous delta hash
//! 4. Order entries by `sha256(entry ‖ salt)`, signatures bytewise
//! 5. Hash entries ‖ signatures ‖ coinbase and keep the full delta locally

use async_trait::async_trait;
use shared_types::{short_hex, CandidateDelta, CoinbaseEntry, Delta, Hash, PeerId};
use std::sync::Arc;
use tracing::{debug, info, trace};

use dl_01_cycle_events::TimeSource;

use crate::config::DeltaBuilderConfig;
use crate::domain::{
    candidate_hash, filter_includable, pack_by_gas_price, salt_from_previous_delta, salted_order,
    sorted_signatures,
};
use crate::error::{DeltaBuilderError, Result};
use crate::ports::inbound::DeltaBuilderApi;
use crate::ports::outbound::{LocalDeltaStore, MempoolGateway};

/// Deterministic candidate delta builder.
pub struct DeltaBuilder {
    config: DeltaBuilderConfig,
    /// Also the coinbase receiver key.
    local_peer_id: PeerId,
    mempool: Arc<dyn MempoolGateway>,
    delta_store: Arc<dyn LocalDeltaStore>,
    time_source: Arc<dyn TimeSource>,
}

impl DeltaBuilder {
    pub fn new(
        config: DeltaBuilderConfig,
        local_peer_id: PeerId,
        mempool: Arc<dyn MempoolGateway>,
        delta_store: Arc<dyn LocalDeltaStore>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            local_peer_id,
            mempool,
            delta_store,
            time_source,
        })
    }

    pub fn local_peer_id(&self) -> PeerId {
        self.local_peer_id
    }
}

#[async_trait]
impl DeltaBuilderApi for DeltaBuilder {
    async fn build_candidate_delta(&self, previous_delta_hash: Hash) -> Result<CandidateDelta> {
        debug!(
            previous = %short_hex(&previous_delta_hash),
            "Building candidate delta locally"
        );

        let snapshot = tokio::time::timeout(
            self.config.mempool_timeout(),
            self.mempool
                .pending_transactions_by_priority(self.config.max_transactions),
        )
        .await
        .map_err(|_| DeltaBuilderError::MempoolTimeout(self.config.mempool_timeout_ms))?
        .map_err(DeltaBuilderError::MempoolUnavailable)?;

        let (includable, mut rejected) = filter_includable(snapshot);
        let packed = pack_by_gas_price(
            includable,
            self.config.delta_gas_limit,
            self.config.min_transaction_gas_limit,
        );
        rejected.extend(packed.rejected);
        if !rejected.is_empty() {
            debug!(count = rejected.len(), "Delta builder rejected transactions");
            for (tx, reason) in &rejected {
                trace!(fee = tx.fee, gas_limit = tx.gas_limit, ?reason, "Rejected transaction");
            }
        }

        let salt = salt_from_previous_delta(&previous_delta_hash);
        let salted = salted_order(packed.included, &salt);
        let signatures = sorted_signatures(salted.iter().map(|entry| &entry.transaction));
        let summed_fees = salted
            .iter()
            .map(|entry| entry.transaction.fee)
            .fold(0u64, u64::saturating_add);
        let coinbase = CoinbaseEntry::new(summed_fees, *self.local_peer_id.as_bytes());
        let hash = candidate_hash(&salted, &signatures, &coinbase);

        let candidate = CandidateDelta {
            hash,
            producer_id: self.local_peer_id,
            previous_delta_hash,
        };

        let entry_count = salted.len();
        let delta = Delta {
            previous_delta_hash,
            merkle_root: hash,
            coinbase,
            entries: salted
                .into_iter()
                .map(|entry| entry.transaction.entry)
                .collect(),
            signatures,
            timestamp: self.time_source.now_millis(),
        };
        self.delta_store.add_local_delta(&candidate, delta);

        info!(
            candidate = %short_hex(&hash),
            previous = %short_hex(&previous_delta_hash),
            entries = entry_count,
            fees = summed_fees,
            "Built candidate delta"
        );
        Ok(candidate)
    }
}
