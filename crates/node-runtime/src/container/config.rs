//! # Node Configuration
//!
//! Unified configuration for every subsystem and the runtime itself.
//!
//! ## Sources, in order of precedence
//!
//! 1. Environment: `DL_NODE_ID`, `DL_GOSSIP_FANOUT`, `DL_GOSSIP_TTL_SECS`, `DL_LOG`
//! 2. TOML file named by `DL_CONFIG`
//! 3. Built-in defaults
//!
//! Configuration is static once the node starts; anything that fails
//! [`NodeConfig::validate`] stops the node before a single phase is scheduled.

use dl_01_cycle_events::{CycleConfiguration, CycleError};
use dl_02_delta_builder::{DeltaBuilderConfig, DeltaBuilderError};
use dl_03_gossip::{GossipConfig, GossipError};
use dl_04_consensus::{ConsensusConfig, ConsensusError};
use serde::Deserialize;
use shared_types::PeerId;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "DL_CONFIG";
pub const NODE_ID_VAR: &str = "DL_NODE_ID";
pub const GOSSIP_FANOUT_VAR: &str = "DL_GOSSIP_FANOUT";
pub const GOSSIP_TTL_VAR: &str = "DL_GOSSIP_TTL_SECS";
pub const LOG_VAR: &str = "DL_LOG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid peer id {0:?}: expected 64 hex characters")]
    InvalidPeerId(String),

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Gossip TTL {ttl:?} exceeds the cycle duration {cycle:?}")]
    TtlExceedsCycle { ttl: Duration, cycle: Duration },

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Gossip(#[from] GossipError),

    #[error(transparent)]
    Builder(#[from] DeltaBuilderError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

/// Complete node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Identity, peers and logging.
    pub node: NodeSettings,
    /// Phase durations.
    pub cycle: CycleSettings,
    pub gossip: GossipConfig,
    pub builder: DeltaBuilderConfig,
    pub consensus: ConsensusConfig,
}

/// Identity and membership of this node.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    /// Hex-encoded 32-byte id; a random id is generated when absent.
    pub node_id: Option<String>,
    /// Hex-encoded ids of the other authorised nodes.
    pub peers: Vec<String>,
    /// `tracing` filter directive.
    pub log: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            node_id: None,
            peers: Vec::new(),
            log: "info".to_string(),
        }
    }
}

/// Production and collection time of one phase, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PhaseDurations {
    pub production_ms: u64,
    pub collection_ms: u64,
}

impl PhaseDurations {
    const fn secs(production: u64, collection: u64) -> Self {
        Self {
            production_ms: production * 1_000,
            collection_ms: collection * 1_000,
        }
    }

    fn as_pair(self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.production_ms),
            Duration::from_millis(self.collection_ms),
        )
    }
}

/// Cycle layout; phases run back to back in this order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
    pub construction: PhaseDurations,
    pub campaigning: PhaseDurations,
    pub voting: PhaseDurations,
    pub synchronisation: PhaseDurations,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            construction: PhaseDurations::secs(2, 2),
            campaigning: PhaseDurations::secs(3, 3),
            voting: PhaseDurations::secs(3, 2),
            synchronisation: PhaseDurations::secs(2, 2),
        }
    }
}

impl CycleSettings {
    pub fn to_configuration(&self) -> CycleConfiguration {
        CycleConfiguration::chained([
            self.construction.as_pair(),
            self.campaigning.as_pair(),
            self.voting.as_pair(),
            self.synchronisation.as_pair(),
        ])
    }
}

impl NodeConfig {
    /// Defaults, then the file named by `DL_CONFIG`, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply overrides looked up through `lookup` (normally the process
    /// environment).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(node_id) = lookup(NODE_ID_VAR) {
            self.node.node_id = Some(node_id);
        }
        if let Some(value) = lookup(GOSSIP_FANOUT_VAR) {
            self.gossip.fanout = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: GOSSIP_FANOUT_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(GOSSIP_TTL_VAR) {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: GOSSIP_TTL_VAR,
                value: value.clone(),
            })?;
            self.gossip.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(filter) = lookup(LOG_VAR) {
            self.node.log = filter;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cycle = self.cycle.to_configuration();
        cycle.validate()?;
        self.gossip.validate()?;
        if self.gossip.cache_ttl > cycle.cycle_duration() {
            return Err(ConfigError::TtlExceedsCycle {
                ttl: self.gossip.cache_ttl,
                cycle: cycle.cycle_duration(),
            });
        }
        self.builder.validate()?;
        self.consensus.validate()?;
        self.local_peer_id()?;
        self.peer_ids()?;
        Ok(())
    }

    /// The configured node id, if any.
    pub fn local_peer_id(&self) -> Result<Option<PeerId>, ConfigError> {
        self.node.node_id.as_deref().map(parse_peer_id).transpose()
    }

    pub fn peer_ids(&self) -> Result<Vec<PeerId>, ConfigError> {
        self.node.peers.iter().map(|p| parse_peer_id(p)).collect()
    }
}

/// Parse a 64-character hex peer id.
pub fn parse_peer_id(text: &str) -> Result<PeerId, ConfigError> {
    let bytes = hex::decode(text.trim()).map_err(|_| ConfigError::InvalidPeerId(text.to_string()))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| ConfigError::InvalidPeerId(text.to_string()))?;
    Ok(PeerId::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = NodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.cycle.to_configuration().cycle_duration(),
            Duration::from_secs(19)
        );
    }

    #[test]
    fn test_parse_toml() {
        let config = NodeConfig::from_toml_str(
            r#"
            [node]
            node_id = "0101010101010101010101010101010101010101010101010101010101010101"
            peers = ["0202020202020202020202020202020202020202020202020202020202020202"]
            log = "debug"

            [cycle]
            construction = { production_ms = 1000, collection_ms = 1000 }

            [gossip]
            fanout = 3
            cache_ttl = 10

            [consensus]
            max_producers_per_cycle = 2
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.local_peer_id().expect("id"), Some(PeerId::from([1u8; 32])));
        assert_eq!(config.peer_ids().expect("peers"), vec![PeerId::from([2u8; 32])]);
        assert_eq!(config.node.log, "debug");
        assert_eq!(config.gossip.fanout, 3);
        assert_eq!(config.gossip.cache_ttl, Duration::from_secs(10));
        assert_eq!(config.consensus.max_producers_per_cycle, 2);
        assert_eq!(
            config.cycle.to_configuration().cycle_duration(),
            Duration::from_secs(17)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = NodeConfig::default();
        config
            .apply_overrides(env(&[
                (GOSSIP_FANOUT_VAR, "12"),
                (GOSSIP_TTL_VAR, "5"),
                (LOG_VAR, "warn"),
            ]))
            .expect("overrides");
        assert_eq!(config.gossip.fanout, 12);
        assert_eq!(config.gossip.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.node.log, "warn");
    }

    #[test]
    fn test_bad_env_value_rejected() {
        let mut config = NodeConfig::default();
        let result = config.apply_overrides(env(&[(GOSSIP_FANOUT_VAR, "many")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { var: GOSSIP_FANOUT_VAR, .. })
        ));
    }

    #[test]
    fn test_zero_fanout_rejected() {
        let mut config = NodeConfig::default();
        config.gossip.fanout = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Gossip(_))));
    }

    #[test]
    fn test_ttl_longer_than_cycle_rejected() {
        let mut config = NodeConfig::default();
        config.gossip.cache_ttl = Duration::from_secs(60);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TtlExceedsCycle { .. })
        ));
    }

    #[test]
    fn test_zero_length_cycle_rejected() {
        let mut config = NodeConfig::default();
        let zero = PhaseDurations {
            production_ms: 0,
            collection_ms: 0,
        };
        config.cycle = CycleSettings {
            construction: zero,
            campaigning: zero,
            voting: zero,
            synchronisation: zero,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Cycle(_))));
    }

    #[test]
    fn test_malformed_peer_id_rejected() {
        let mut config = NodeConfig::default();
        config.node.peers = vec!["abcd".into()];
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPeerId(_))));
    }
}
