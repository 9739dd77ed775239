//! Domain layer for the cycle scheduler.

pub mod error;
pub mod schedule;
pub mod value_objects;

pub use error::CycleError;
pub use schedule::{time_until_next_cycle_start, CycleSchedule, PhaseTransition, StatefulPhase};
pub use value_objects::{CycleConfiguration, Phase, PhaseName, PhaseStatus, PhaseTimings};
