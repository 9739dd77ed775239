//! Driven ports (Outbound dependencies)

use shared_types::Hash;

use crate::domain::CycleError;

/// Wall clock used to align cycles and stamp phase events.
pub trait TimeSource: Send + Sync {
    /// Current unix timestamp in milliseconds.
    fn now_millis(&self) -> u64;
}

/// Default time source using system time
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Wall clock that advances with tokio's timer.
///
/// Reads `origin_millis` plus the tokio time elapsed since construction, so a
/// paused runtime (`start_paused = true`) controls it exactly.
pub struct TokioTimeSource {
    origin_millis: u64,
    origin: tokio::time::Instant,
}

impl TokioTimeSource {
    pub fn starting_at(origin_millis: u64) -> Self {
        Self {
            origin_millis,
            origin: tokio::time::Instant::now(),
        }
    }

    /// Anchored to the current system time.
    pub fn from_system_clock() -> Self {
        Self::starting_at(SystemTimeSource.now_millis())
    }
}

impl TimeSource for TokioTimeSource {
    fn now_millis(&self) -> u64 {
        self.origin_millis + self.origin.elapsed().as_millis() as u64
    }
}

/// Supplies the hash of the most recently accepted delta.
pub trait DeltaHashSource: Send + Sync {
    /// Latest accepted delta hash at or before `as_of` (unix millis).
    ///
    /// Failure ends the phase stream with [`CycleError::DeltaHashUnavailable`].
    fn latest_delta_hash(&self, as_of: u64) -> Result<Hash, CycleError>;
}
