//! # Node Container
//!
//! Builds every subsystem for one node and wires the adapters into their
//! ports.
//!
//! ## Initialization Order
//!
//! ```text
//! DeltaCache ──→ DeltaHashProvider ──→ CycleEventsProvider
//!     │
//!     └──→ DeltaBuilder ←── InMemoryMempool
//! StaticPeerDirectory ──→ ProducerPriorityProvider
//!                     └──→ BroadcastManager ←── InMemoryNetwork
//! all of the above ──→ ConsensusService ←── InMemoryDeltaStore
//! ```
//!
//! Nodes built from the same [`NodeEnvironment`] share its network, delta
//! store and clock, so a whole network can run in one process.

pub mod config;

pub use config::{ConfigError, NodeConfig};

use dl_01_cycle_events::{CycleEventsProvider, SystemTimeSource, TimeSource};
use dl_02_delta_builder::{DeltaBuilder, ProducerPriorityProvider};
use dl_03_gossip::BroadcastManager;
use dl_04_consensus::{ConsensusDependencies, ConsensusService, DeltaCache, DeltaHashProvider};
use shared_types::PeerId;
use std::sync::Arc;
use tracing::info;

use crate::adapters::{InMemoryDeltaStore, InMemoryMempool, InMemoryNetwork, StaticPeerDirectory};
use crate::error::NodeError;

/// Infrastructure shared between the nodes of one process.
#[derive(Clone)]
pub struct NodeEnvironment {
    pub network: Arc<InMemoryNetwork>,
    pub store: Arc<InMemoryDeltaStore>,
    pub time_source: Arc<dyn TimeSource>,
}

impl NodeEnvironment {
    pub fn new(time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            network: Arc::new(InMemoryNetwork::new()),
            store: Arc::new(InMemoryDeltaStore::new()),
            time_source,
        }
    }

    /// A private environment on the system clock.
    pub fn standalone() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }
}

/// Every subsystem instance of one node.
pub struct NodeContainer {
    pub local_peer_id: PeerId,
    pub config: NodeConfig,
    pub network: Arc<InMemoryNetwork>,
    pub mempool: Arc<InMemoryMempool>,
    pub peers: Arc<StaticPeerDirectory>,
    pub ranking: Arc<ProducerPriorityProvider>,
    pub cache: Arc<DeltaCache>,
    pub hash_provider: Arc<DeltaHashProvider>,
    pub cycle: Arc<CycleEventsProvider>,
    pub gossip: Arc<BroadcastManager>,
    pub consensus: Arc<ConsensusService>,
}

impl NodeContainer {
    pub fn new(config: NodeConfig, env: &NodeEnvironment) -> Result<Self, NodeError> {
        config.validate()?;
        let local_peer_id = config
            .local_peer_id()?
            .unwrap_or_else(|| PeerId::from(rand::random::<[u8; 32]>()));
        let peers = Arc::new(StaticPeerDirectory::new(local_peer_id, config.peer_ids()?));

        let cache = Arc::new(DeltaCache::new(config.consensus.delta_cache_capacity));
        let hash_provider = Arc::new(DeltaHashProvider::new(
            Arc::clone(&cache),
            config.consensus.hash_history_capacity,
        ));
        let cycle = Arc::new(CycleEventsProvider::new(
            config.cycle.to_configuration(),
            Arc::clone(&env.time_source),
            hash_provider.clone(),
        )?);

        let mempool = Arc::new(InMemoryMempool::new());
        let builder = Arc::new(DeltaBuilder::new(
            config.builder.clone(),
            local_peer_id,
            mempool.clone(),
            cache.clone(),
            Arc::clone(&env.time_source),
        )?);
        let ranking = Arc::new(ProducerPriorityProvider::new(
            peers.clone(),
            config.builder.ranking_cache_size,
        ));

        let gossip = Arc::new(BroadcastManager::new(
            local_peer_id,
            config.gossip.clone(),
            env.network.clone(),
            peers.clone(),
        )?);

        let consensus = Arc::new(ConsensusService::new(
            local_peer_id,
            config.consensus.clone(),
            ConsensusDependencies {
                builder,
                ranking: ranking.clone(),
                cache: Arc::clone(&cache),
                hash_provider: Arc::clone(&hash_provider),
                store: env.store.clone(),
                gossip: gossip.clone(),
            },
        )?);

        info!(
            node = %local_peer_id,
            peers = config.node.peers.len(),
            fanout = config.gossip.fanout,
            "Node subsystems initialized"
        );

        Ok(Self {
            local_peer_id,
            config,
            network: Arc::clone(&env.network),
            mempool,
            peers,
            ranking,
            cache,
            hash_provider,
            cycle,
            gossip,
            consensus,
        })
    }
}
