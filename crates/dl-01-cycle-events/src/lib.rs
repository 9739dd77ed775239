//! # Cycle Events Subsystem (dl-01)
//!
//! Drives the production cycle every producer runs in lock-step:
//!
//! ```text
//!  cycle start                                                  next cycle
//!  │ Construction │  Campaigning   │   Voting    │ Synchronisation │
//!  │ prod │ coll  │ prod  │ coll   │ prod │ coll │ prod  │  coll   │
//!  0s     2s      4s      7s       10s    13s    15s     17s       19s
//! ```
//!
//! Each phase moves through Producing → Collecting → Idle once per cycle. The
//! twelve transitions are merged into one chronological stream of [`Phase`]
//! events, aligned to wall-clock multiples of the cycle duration so nodes that
//! share a configuration and a loosely synchronised clock agree on every
//! boundary without exchanging messages.
//!
//! ## Usage
//!
//! ```ignore
//! let provider = CycleEventsProvider::new(config, time_source, hash_source)?;
//! let mut phases = provider.subscribe();
//! provider.start()?;
//! while let Some(event) = phases.recv().await {
//!     let phase = event?;
//!     // react to phase.name / phase.status
//! }
//! ```

pub mod domain;
pub mod ports;
pub mod service;
pub mod subscription;

pub use domain::*;
pub use ports::inbound::CycleEventsApi;
pub use ports::outbound::{DeltaHashSource, SystemTimeSource, TimeSource, TokioTimeSource};
pub use service::CycleEventsProvider;
pub use subscription::{PhaseEvent, PhaseSubscription};
