//! # Node Runtime
//!
//! Owns a [`NodeContainer`] and the tasks that drive it.
//!
//! ## Startup Sequence
//!
//! 1. Register the node's inbox on the network
//! 2. Subscribe to phases and accepted hashes
//! 3. Spawn consensus, gossip inbound, mempool pruning and the cache sweeper
//! 4. Start the cycle scheduler
//!
//! Shutdown runs the same steps in reverse: the scheduler closes, every task
//! sees the shutdown signal, the inbox is detached and the tasks are joined.

use dl_01_cycle_events::CycleEventsApi;
use parking_lot::Mutex;
use shared_types::{GossipMessage, Hash, PeerId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::container::{NodeConfig, NodeContainer, NodeEnvironment};
use crate::error::NodeError;
use crate::wiring::{GossipInbound, MempoolPruner};

pub struct NodeRuntime {
    container: Arc<NodeContainer>,
    inbox: Mutex<Option<mpsc::Receiver<GossipMessage>>>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig, env: &NodeEnvironment) -> Result<Self, NodeError> {
        let container = Arc::new(NodeContainer::new(config, env)?);
        let inbox = container.network.register(container.local_peer_id);
        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            container,
            inbox: Mutex::new(Some(inbox)),
            shutdown_tx,
            tasks: Mutex::new(Vec::new()),
        })
    }

    pub fn container(&self) -> &Arc<NodeContainer> {
        &self.container
    }

    pub fn local_peer_id(&self) -> PeerId {
        self.container.local_peer_id
    }

    pub fn latest_hash(&self) -> Hash {
        self.container.hash_provider.latest_hash()
    }

    /// Spawn the node's tasks and start the cycle. Fails if called twice.
    pub fn start(&self) -> Result<(), NodeError> {
        let inbox = self.inbox.lock().take().ok_or(NodeError::AlreadyStarted)?;
        let container = &self.container;

        let phases = container.cycle.subscribe();
        let accepted = container.hash_provider.subscribe();

        let mut tasks = self.tasks.lock();

        let consensus = Arc::clone(&container.consensus);
        let mut consensus_shutdown = self.shutdown_tx.subscribe();
        tasks.push(tokio::spawn(async move {
            tokio::select! {
                _ = consensus.run(phases) => {}
                _ = consensus_shutdown.changed() => {
                    info!("Consensus received shutdown signal");
                }
            }
        }));

        let inbound = GossipInbound::new(
            Arc::clone(&container.gossip),
            Arc::clone(&container.consensus),
        );
        tasks.push(tokio::spawn(
            inbound.run(inbox, self.shutdown_tx.subscribe()),
        ));

        let pruner = MempoolPruner::new(Arc::clone(&container.cache), Arc::clone(&container.mempool));
        tasks.push(tokio::spawn(
            pruner.run(accepted, self.shutdown_tx.subscribe()),
        ));

        tasks.push(container.gossip.spawn_sweeper(self.shutdown_tx.subscribe()));

        container.cycle.start()?;
        info!(
            node = %container.local_peer_id,
            next_cycle_in = ?container.cycle.time_until_next_cycle_start(),
            "Node started"
        );
        Ok(())
    }

    /// Stop the cycle and every task. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.container.cycle.close();
        self.shutdown_tx.send_replace(true);
        self.container
            .network
            .disconnect(&self.container.local_peer_id);

        let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Node task ended abnormally");
            }
        }
        info!(node = %self.container.local_peer_id, "Node stopped");
    }
}
