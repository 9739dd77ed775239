//! Node start-up and lifecycle errors.

use dl_01_cycle_events::CycleError;
use dl_02_delta_builder::DeltaBuilderError;
use dl_03_gossip::GossipError;
use dl_04_consensus::ConsensusError;
use thiserror::Error;

use crate::container::ConfigError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cycle scheduler error: {0}")]
    Cycle(#[from] CycleError),

    #[error("Delta builder error: {0}")]
    Builder(#[from] DeltaBuilderError),

    #[error("Gossip error: {0}")]
    Gossip(#[from] GossipError),

    #[error("Consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("Node already started")]
    AlreadyStarted,
}
