//! # Production Rounds
//!
//! Several nodes run full cycles over the shared in-memory network:
//!
//! ```text
//! Construction ──→ Campaigning ──→ Voting ──→ Synchronisation
//!   duty            candidates      favourites   elect, publish, accept
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dl_01_cycle_events::TokioTimeSource;
    use dl_02_delta_builder::ProducerRanking;
    use node_runtime::{NodeEnvironment, NodeRuntime};
    use shared_types::{Delta, Hash, MempoolTransaction, PublicEntry, PUBLIC_ENTRY_VERSION};

    use crate::integration::{member_config, node_ids};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const CYCLE: Duration = Duration::from_secs(19);

    fn network(count: u8) -> (NodeEnvironment, Vec<NodeRuntime>) {
        let env = NodeEnvironment::new(Arc::new(TokioTimeSource::starting_at(0)));
        let ids = node_ids(count);
        let nodes = ids
            .iter()
            .map(|id| NodeRuntime::new(member_config(*id, &ids), &env).unwrap())
            .collect();
        (env, nodes)
    }

    fn transaction(seed: u8) -> MempoolTransaction {
        MempoolTransaction {
            entry: PublicEntry {
                sender_public_key: [seed; 32],
                receiver_public_key: [0xEE; 32],
                amount: 100 + seed as u64,
                data: vec![seed],
            },
            signature: [seed; 64],
            lock_time: 0,
            version: PUBLIC_ENTRY_VERSION,
            fee: seed as u64,
            gas_limit: 21_000,
            gas_price: seed as u64,
            timestamp: 0,
        }
    }

    fn latest_hashes(nodes: &[NodeRuntime]) -> Vec<Hash> {
        nodes.iter().map(NodeRuntime::latest_hash).collect()
    }

    async fn shutdown_all(nodes: &[NodeRuntime]) {
        for node in nodes {
            node.shutdown().await;
        }
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_nodes_converge_on_one_delta() {
        let (env, nodes) = network(6);
        for node in &nodes {
            node.start().unwrap();
        }
        tokio::time::sleep(CYCLE * 3).await;

        let hashes = latest_hashes(&nodes);
        assert_ne!(hashes[0], Delta::genesis().hash());
        assert!(hashes.iter().all(|h| *h == hashes[0]));
        assert!(!env.store.is_empty());

        shutdown_all(&nodes).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_cycle_extends_the_chain() {
        let (_env, nodes) = network(4);
        for node in &nodes {
            node.start().unwrap();
        }

        tokio::time::sleep(CYCLE * 2).await;
        let earlier = nodes[0].latest_hash();
        tokio::time::sleep(CYCLE).await;
        let later = nodes[0].latest_hash();
        assert_ne!(earlier, later);

        let delta = nodes[1]
            .container()
            .cache
            .confirmed_delta(&later)
            .expect("accepted delta is cached on every node");
        assert_eq!(delta.previous_delta_hash, earlier);

        shutdown_all(&nodes).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_included_transactions_pruned_everywhere() {
        let (_env, nodes) = network(4);
        for node in &nodes {
            for seed in 1..=5 {
                node.container().mempool.submit(transaction(seed));
            }
            node.start().unwrap();
        }
        tokio::time::sleep(CYCLE * 3).await;

        for node in &nodes {
            assert!(node.container().mempool.is_empty());
        }
        let latest = nodes[0].latest_hash();
        let hashes = latest_hashes(&nodes);
        assert!(hashes.iter().all(|h| *h == latest));

        shutdown_all(&nodes).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rounds_survive_an_offline_peer() {
        let (_env, nodes) = network(5);
        let (offline, online) = nodes.split_first().unwrap();
        offline.shutdown().await;
        for node in online {
            node.start().unwrap();
        }
        tokio::time::sleep(CYCLE * 3).await;

        let hashes = latest_hashes(online);
        assert_ne!(hashes[0], Delta::genesis().hash());
        assert!(hashes.iter().all(|h| *h == hashes[0]));
        assert_eq!(offline.latest_hash(), Delta::genesis().hash());

        shutdown_all(online).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_forwarded_candidates_gain_popularity() {
        let (_env, nodes) = network(4);
        for node in &nodes {
            node.start().unwrap();
        }
        // Past candidate production, before voting.
        tokio::time::sleep(Duration::from_secs(9)).await;

        let genesis = Delta::genesis().hash();
        let producers = nodes[0].container().ranking.get_producers(&genesis);
        for node in &nodes {
            let scored = node.container().consensus.voter().scored_candidates(&genesis);
            assert_eq!(scored.len(), nodes.len());
            for entry in scored {
                let producer = entry.candidate.producer_id;
                let rank = producers.iter().position(|p| *p == producer).unwrap();
                let first_sighting = 100 * (producers.len() - rank) as u64 + 1;
                // A remote candidate arrives from its producer and from both
                // other peers forwarding it.
                let repeats = if producer == node.local_peer_id() { 0 } else { 2 };
                assert_eq!(entry.score, first_sighting + repeats);
            }
        }

        shutdown_all(&nodes).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_window_limits_candidates() {
        let env = NodeEnvironment::new(Arc::new(TokioTimeSource::starting_at(0)));
        let ids = node_ids(6);
        let nodes: Vec<NodeRuntime> = ids
            .iter()
            .map(|id| {
                let mut config = member_config(*id, &ids);
                config.consensus.max_producers_per_cycle = 2;
                NodeRuntime::new(config, &env).unwrap()
            })
            .collect();
        for node in &nodes {
            node.start().unwrap();
        }
        tokio::time::sleep(CYCLE * 3).await;

        let latest = nodes[0].latest_hash();
        assert!(latest_hashes(&nodes).iter().all(|h| *h == latest));

        let delta = nodes[0].container().cache.confirmed_delta(&latest).unwrap();
        let elected_producer = ids
            .iter()
            .find(|id| *id.as_bytes() == delta.coinbase.receiver_public_key)
            .expect("coinbase pays a known node");
        let producers = nodes[0]
            .container()
            .ranking
            .get_producers(&delta.previous_delta_hash);
        let rank = producers.iter().position(|p| p == elected_producer).unwrap();
        assert!(rank < 2);

        shutdown_all(&nodes).await;
    }
}
