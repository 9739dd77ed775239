//! Error types for the cycle scheduler.

use thiserror::Error;

/// Cycle scheduler errors.
///
/// Cloneable so a terminal error can be fanned out to every subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CycleError {
    /// Rejected before the scheduler starts.
    #[error("Invalid cycle configuration: {0}")]
    InvalidConfiguration(String),

    /// The delta hash source could not answer; the phase stream ends here.
    #[error("Delta hash unavailable as of {as_of}: {reason}")]
    DeltaHashUnavailable { as_of: u64, reason: String },

    /// The provider was closed and cannot be restarted.
    #[error("Cycle events provider closed")]
    Closed,
}
