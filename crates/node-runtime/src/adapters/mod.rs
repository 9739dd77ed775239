//! # Adapters
//!
//! In-process implementations of the outbound ports the subsystems declare:
//!
//! - [`InMemoryMempool`] serves `MempoolGateway` for the delta builder
//! - [`StaticPeerDirectory`] serves both peer directory ports
//! - [`InMemoryNetwork`] carries gossip between nodes in one process
//! - [`InMemoryDeltaStore`] is the shared content-addressed delta storage

pub mod delta_store;
pub mod mempool;
pub mod network;
pub mod peers;

pub use delta_store::InMemoryDeltaStore;
pub use mempool::InMemoryMempool;
pub use network::InMemoryNetwork;
pub use peers::StaticPeerDirectory;
