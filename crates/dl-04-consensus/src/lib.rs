//! # dl-04-consensus
//!
//! Drives a node through the delta cycle and keeps its view of the chain.
//!
//! ## Round choreography
//!
//! ```text
//!  Construction/Producing   rank producers for `previous`, decide duty
//!  Campaigning/Producing    due producer builds a candidate ──gossip──→ voters
//!  Voting/Producing         favourite candidate ──gossip──→ electors
//!  Synchronisation/Producing
//!                           elected producer publishes the delta (DeltaStore),
//!                           gossips its address, advances the hash history
//! ```
//!
//! Inbound gossip is routed by payload: candidates to the [`DeltaVoter`],
//! favourites to the [`DeltaElector`], addresses to the [`DeltaHashProvider`]
//! once the content has been fetched.
//!
//! The hash provider is also the cycle scheduler's [`DeltaHashSource`], which
//! closes the loop: every phase event carries the hash this crate last accepted.
//!
//! [`DeltaHashSource`]: dl_01_cycle_events::DeltaHashSource

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::inbound::ConsensusApi;
pub use ports::outbound::{ConsensusGossip, DeltaStore};
pub use service::{ConsensusDependencies, ConsensusService};
