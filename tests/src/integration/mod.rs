//! # Integration Tests
//!
//! Nodes share one `NodeEnvironment`: the in-memory network, the delta store
//! and a paused tokio clock, so whole cycles run deterministically and fast.

pub mod gossip;
pub mod rounds;

use node_runtime::NodeConfig;
use shared_types::PeerId;

/// Distinct, reproducible node ids.
pub fn node_ids(count: u8) -> Vec<PeerId> {
    (1..=count).map(|i| PeerId::from([i; 32])).collect()
}

/// Configuration for `local` in a network made of `all`.
pub fn member_config(local: PeerId, all: &[PeerId]) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.node.node_id = Some(hex::encode(local.as_bytes()));
    config.node.peers = all
        .iter()
        .filter(|peer| **peer != local)
        .map(|peer| hex::encode(peer.as_bytes()))
        .collect();
    config
}
