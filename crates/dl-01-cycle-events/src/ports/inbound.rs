//! Driving port: what the rest of the node uses to follow the cycle.

use std::time::Duration;

use crate::domain::CycleError;
use crate::subscription::PhaseSubscription;

/// Phase event source.
pub trait CycleEventsApi: Send + Sync {
    /// Register a subscriber. Subscribe before `start` to observe the first event.
    fn subscribe(&self) -> PhaseSubscription;

    /// Begin emitting. Starting a running provider is a no-op; starting a
    /// closed one fails with [`CycleError::Closed`].
    fn start(&self) -> Result<(), CycleError>;

    /// Stop all future emissions. Irreversible.
    fn close(&self);

    fn is_closed(&self) -> bool;

    /// Delay from now until the next wall-clock aligned cycle start.
    fn time_until_next_cycle_start(&self) -> Duration;
}
