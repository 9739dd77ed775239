//! # Gossip Subsystem (dl-03)
//!
//! Disseminates consensus messages (candidates, votes, delta addresses) using
//! epidemic gossip with a bounded fan-out.
//!
//! ## Message lifecycle
//!
//! ```text
//!  Unseen ──broadcast / first receive──→ Tracked ──TTL elapsed──→ Expired
//!                                          │  ↑
//!                                          └──┘ receive: received_count += 1
//! ```
//!
//! - A node forwards a given correlation id at most once, on its first receipt.
//! - Every receipt is counted, duplicates included.
//! - At most `K` sends are attributed to one correlation id.
//! - After expiry a correlation id is counted from scratch.

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::*;
pub use events::GossipError;
pub use ports::inbound::GossipApi;
pub use ports::outbound::{PeerDirectory, PeerTransport};
pub use service::BroadcastManager;
