//! # Wiring
//!
//! Long-running tasks that connect subsystems without a direct port between
//! them:
//!
//! ```text
//! network inbox ──→ BroadcastManager::receive ──payload──→ ConsensusService
//! DeltaHashProvider ──new hash──→ InMemoryMempool::remove_by_signatures
//! ```

pub mod gossip_inbound;
pub mod mempool_pruning;

pub use gossip_inbound::GossipInbound;
pub use mempool_pruning::MempoolPruner;
