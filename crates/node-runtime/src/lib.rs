//! # Delta-Ledger Node Runtime
//!
//! Assembles the cycle scheduler (dl-01), delta builder (dl-02), gossip
//! (dl-03) and consensus (dl-04) subsystems into a running node.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and subsystem construction
//! - `adapters/` - in-process implementations of the outbound ports
//! - `wiring/` - tasks connecting subsystems that share no port
//! - `runtime` - start-up and shutdown of one node
//!
//! ## Round Choreography
//!
//! ```text
//! CycleEventsProvider ──Phase──→ ConsensusService ──build──→ DeltaBuilder
//!                                      │   ↑
//!                          broadcast   │   │ received
//!                                      ↓   │
//!                               BroadcastManager ⇄ InMemoryNetwork ⇄ other nodes
//!                                      │
//!                   elected delta ──→ InMemoryDeltaStore
//!                                      │
//!                   DeltaHashProvider ──next cycle's previous hash──→ CycleEventsProvider
//! ```

pub mod adapters;
pub mod container;
pub mod error;
pub mod runtime;
pub mod wiring;

pub use container::{ConfigError, NodeConfig, NodeContainer, NodeEnvironment};
pub use error::NodeError;
pub use runtime::NodeRuntime;
