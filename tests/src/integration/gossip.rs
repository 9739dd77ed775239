//! # Gossip Dissemination
//!
//! Broadcast managers wired to the in-memory network with the node runtime's
//! peer directory, without the rest of the node.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dl_03_gossip::{BroadcastManager, GossipApi, GossipConfig};
    use node_runtime::adapters::{InMemoryNetwork, StaticPeerDirectory};
    use shared_types::{CandidateDelta, ConsensusMessage, CorrelationId, PeerId};
    use tokio::task::JoinHandle;

    use crate::integration::node_ids;

    struct Mesh {
        network: Arc<InMemoryNetwork>,
        managers: Vec<Arc<BroadcastManager>>,
        pumps: Vec<JoinHandle<()>>,
    }

    impl Mesh {
        fn new(count: u8, fanout: usize) -> Self {
            let network = Arc::new(InMemoryNetwork::new());
            let ids = node_ids(count);
            let mut managers = Vec::new();
            let mut pumps = Vec::new();
            for id in &ids {
                let config = GossipConfig {
                    fanout,
                    ..GossipConfig::default()
                };
                let directory = Arc::new(StaticPeerDirectory::new(*id, ids.clone()));
                let manager = Arc::new(
                    BroadcastManager::new(*id, config, network.clone(), directory).unwrap(),
                );
                let mut inbox = network.register(*id);
                let receiver = Arc::clone(&manager);
                pumps.push(tokio::spawn(async move {
                    while let Some(message) = inbox.recv().await {
                        receiver.receive(message).await;
                    }
                }));
                managers.push(manager);
            }
            Self {
                network,
                managers,
                pumps,
            }
        }

        fn received_by(&self, correlation_id: &CorrelationId) -> usize {
            self.managers
                .iter()
                .filter(|m| {
                    m.stats(correlation_id)
                        .is_some_and(|stats| stats.received_count > 0)
                })
                .count()
        }

        fn stop(self) {
            for pump in self.pumps {
                pump.abort();
            }
        }
    }

    fn candidate(producer: PeerId) -> ConsensusMessage {
        ConsensusMessage::Candidate(CandidateDelta {
            hash: [0xAB; 32],
            producer_id: producer,
            previous_delta_hash: [0u8; 32],
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_flood_reaches_every_node() {
        let mesh = Mesh::new(30, 4);
        let origin = &mesh.managers[0];
        let (message, outcome) = origin.broadcast_payload(candidate(origin.local_peer_id())).await;
        assert_eq!(outcome.sent, 4);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(mesh.received_by(&message.correlation_id), 29);
        for manager in &mesh.managers {
            let stats = manager.stats(&message.correlation_id).unwrap();
            assert!(stats.broadcast_count <= 4);
        }
        mesh.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_originator_never_hears_its_own_message() {
        let mesh = Mesh::new(12, 3);
        let origin = &mesh.managers[5];
        let (message, _) = origin.broadcast_payload(candidate(origin.local_peer_id())).await;

        tokio::time::sleep(Duration::from_millis(100)).await;

        let stats = origin.stats(&message.correlation_id).unwrap();
        assert_eq!(stats.received_count, 0);
        assert_eq!(stats.broadcast_count, 3);
        mesh.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_peers_do_not_count_as_sent() {
        let mesh = Mesh::new(6, 5);
        let origin = &mesh.managers[0];
        for manager in &mesh.managers[1..3] {
            mesh.network.disconnect(&manager.local_peer_id());
        }

        let (message, outcome) = origin.broadcast_payload(candidate(origin.local_peer_id())).await;
        assert_eq!(outcome.sent, 3);
        assert_eq!(outcome.failed, 2);
        assert_eq!(
            origin.stats(&message.correlation_id).unwrap().broadcast_count,
            3
        );
        mesh.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let mesh = Mesh::new(4, 3);
        let origin = &mesh.managers[0];
        let (message, _) = origin.broadcast_payload(candidate(origin.local_peer_id())).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(mesh.managers[1].stats(&message.correlation_id).is_some());

        tokio::time::sleep(GossipConfig::default().cache_ttl).await;
        for manager in &mesh.managers {
            assert!(manager.stats(&message.correlation_id).is_none());
        }
        mesh.stop();
    }
}
