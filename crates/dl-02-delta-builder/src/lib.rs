//! # Delta Builder Subsystem (dl-02)
//!
//! Builds the local node's candidate delta for a round and ranks the round's
//! producers.
//!
//! ## Candidate construction
//!
//! ```text
//! mempool ──filter/pack──→ entries ──salted sort──→ ‖ sorted signatures ‖ coinbase
//!                                     ↑                                        │
//!         ISAAC(hex(previous hash)) ──┘                               sha256 ──→ CandidateDelta
//! ```
//!
//! The salt is the first ISAAC output seeded from the previous delta hash, so
//! the entry order is reproducible by every node holding that hash yet cannot
//! be predicted from entry content alone.
//!
//! ## Producer ranking
//!
//! Peers are ordered by `sha256(peer_id ‖ previous_hash)`; the front of the
//! list produces first.

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use config::DeltaBuilderConfig;
pub use domain::*;
pub use error::{DeltaBuilderError, Result};
pub use ports::inbound::{DeltaBuilderApi, ProducerRanking};
pub use ports::outbound::{LocalDeltaStore, MempoolGateway, PeerDirectory};
pub use service::{DeltaBuilder, ProducerPriorityProvider};
