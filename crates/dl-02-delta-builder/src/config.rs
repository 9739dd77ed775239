//! Configuration types for delta construction

use serde::Deserialize;
use std::time::Duration;

use crate::error::{DeltaBuilderError, Result};

/// Total gas a single delta may pack.
pub const DEFAULT_DELTA_GAS_LIMIT: u64 = 8_000_000;

/// Gas of the cheapest possible entry; packing stops below this headroom.
pub const MIN_TRANSACTION_ENTRY_GAS_LIMIT: u64 = 21_000;

/// Runtime configuration for candidate construction and ranking
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DeltaBuilderConfig {
    /// Gas budget of one delta
    pub delta_gas_limit: u64,

    /// Packing stops once less than this much gas remains
    pub min_transaction_gas_limit: u64,

    /// Most transactions requested from the mempool per build
    pub max_transactions: usize,

    /// How long a mempool request may take before the build fails
    pub mempool_timeout_ms: u64,

    /// Rankings memoized per previous delta hash
    pub ranking_cache_size: usize,
}

impl Default for DeltaBuilderConfig {
    fn default() -> Self {
        Self {
            delta_gas_limit: DEFAULT_DELTA_GAS_LIMIT,
            min_transaction_gas_limit: MIN_TRANSACTION_ENTRY_GAS_LIMIT,
            max_transactions: 10_000,
            mempool_timeout_ms: 1_000,
            ranking_cache_size: 64,
        }
    }
}

impl DeltaBuilderConfig {
    pub fn mempool_timeout(&self) -> Duration {
        Duration::from_millis(self.mempool_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delta_gas_limit < self.min_transaction_gas_limit {
            return Err(DeltaBuilderError::InvalidConfiguration(format!(
                "delta gas limit {} is below the minimum entry gas {}",
                self.delta_gas_limit, self.min_transaction_gas_limit
            )));
        }
        if self.max_transactions == 0 {
            return Err(DeltaBuilderError::InvalidConfiguration(
                "max_transactions must be greater than zero".into(),
            ));
        }
        if self.mempool_timeout_ms == 0 {
            return Err(DeltaBuilderError::InvalidConfiguration(
                "mempool_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
