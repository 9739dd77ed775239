//! Driving ports (Inbound API)

use async_trait::async_trait;
use dl_01_cycle_events::Phase;
use shared_types::ConsensusMessage;

use crate::domain::Result;

/// Consensus API
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// React to a phase transition.
    ///
    /// Only `Producing` transitions do work; every other transition is a no-op.
    async fn handle_phase(&self, phase: &Phase) -> Result<()>;

    /// Route a gossiped payload to the voter, the elector or the hash history.
    async fn handle_message(&self, message: ConsensusMessage) -> Result<()>;
}
