//! A lone node that is its own producer, voter and elector.

use dl_01_cycle_events::TokioTimeSource;
use node_runtime::{NodeConfig, NodeEnvironment, NodeRuntime};
use shared_types::{Delta, MempoolTransaction, PublicEntry, PUBLIC_ENTRY_VERSION};
use std::sync::Arc;
use std::time::Duration;

const CYCLE: Duration = Duration::from_secs(19);

fn transaction(fee: u64) -> MempoolTransaction {
    MempoolTransaction {
        entry: PublicEntry {
            sender_public_key: [1u8; 32],
            receiver_public_key: [2u8; 32],
            amount: fee * 10,
            data: vec![],
        },
        signature: [fee as u8; 64],
        lock_time: 0,
        version: PUBLIC_ENTRY_VERSION,
        fee,
        gas_limit: 21_000,
        gas_price: fee,
        timestamp: 0,
    }
}

fn single_node() -> NodeRuntime {
    let env = NodeEnvironment::new(Arc::new(TokioTimeSource::starting_at(0)));
    NodeRuntime::new(NodeConfig::default(), &env).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_lone_node_advances_its_chain() {
    let node = single_node();
    let genesis = Delta::genesis().hash();
    assert_eq!(node.latest_hash(), genesis);

    node.start().unwrap();
    tokio::time::sleep(CYCLE * 3).await;

    let latest = node.latest_hash();
    assert_ne!(latest, genesis);
    let delta = node
        .container()
        .cache
        .confirmed_delta(&latest)
        .expect("accepted delta is cached");
    assert_eq!(delta.hash(), latest);
    assert_eq!(delta.coinbase.receiver_public_key, *node.local_peer_id().as_bytes());

    node.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_included_transactions_leave_the_mempool() {
    let node = single_node();
    let mempool = &node.container().mempool;
    mempool.submit(transaction(3));
    mempool.submit(transaction(4));

    node.start().unwrap();
    tokio::time::sleep(CYCLE * 3).await;

    assert!(mempool.is_empty());
    node.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_chain_stops_after_shutdown() {
    let node = single_node();
    node.start().unwrap();
    tokio::time::sleep(CYCLE * 2).await;
    node.shutdown().await;

    let frozen = node.latest_hash();
    tokio::time::sleep(CYCLE * 3).await;
    assert_eq!(node.latest_hash(), frozen);
}
