//! Value objects for gossip configuration and accounting.

use serde::Deserialize;
use std::time::Duration;

use crate::events::GossipError;

/// Gossip configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GossipConfig {
    /// Number of peers each broadcast reaches (`K`)
    pub fanout: usize,
    /// Lifetime of a correlation id's counters
    #[serde(with = "duration_secs")]
    pub cache_ttl: Duration,
    /// Period of the background sweep of expired entries
    #[serde(with = "duration_secs")]
    pub sweep_interval: Duration,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            fanout: 8,
            cache_ttl: Duration::from_secs(19),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

impl GossipConfig {
    pub fn validate(&self) -> Result<(), GossipError> {
        if self.fanout == 0 {
            return Err(GossipError::InvalidConfiguration(
                "fanout must be at least 1".into(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(GossipError::InvalidConfiguration(
                "cache_ttl must be positive".into(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(GossipError::InvalidConfiguration(
                "sweep_interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Snapshot of one correlation id's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GossipStats {
    pub broadcast_count: u32,
    pub received_count: u32,
}

/// Result of a local broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Peers the message was handed to successfully
    pub sent: usize,
    /// Peers whose send failed
    pub failed: usize,
}

/// Result of handling an inbound gossip message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiveOutcome {
    /// Receipts of this correlation id so far, this one included
    pub received_count: u32,
    /// Whether this was the first receipt within the TTL
    pub first_receipt: bool,
    /// Peers the message was forwarded to (zero unless first receipt)
    pub forwarded: usize,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
