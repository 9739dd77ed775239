//! Messages carried by the gossip layer.

use serde::{Deserialize, Serialize};

use crate::deltas::{CandidateDelta, DeltaAddress, FavouriteDelta};
use crate::entities::{CorrelationId, PeerId};

/// Consensus payloads that travel over gossip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusMessage {
    Candidate(CandidateDelta),
    Favourite(FavouriteDelta),
    DeltaAddress(DeltaAddress),
}

impl ConsensusMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ConsensusMessage::Candidate(_) => "candidate",
            ConsensusMessage::Favourite(_) => "favourite",
            ConsensusMessage::DeltaAddress(_) => "delta_address",
        }
    }
}

/// A gossiped message. Every copy of one message shares its correlation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GossipMessage {
    pub correlation_id: CorrelationId,
    /// Node that first broadcast the message.
    pub originator: PeerId,
    pub payload: ConsensusMessage,
}

impl GossipMessage {
    /// Wrap a payload originated by `originator` under a fresh correlation id.
    pub fn new(originator: PeerId, payload: ConsensusMessage) -> Self {
        Self {
            correlation_id: CorrelationId::generate(),
            originator,
            payload,
        }
    }
}
