//! Error types for the delta builder subsystem

use thiserror::Error;

/// Result type alias for delta builder operations
pub type Result<T> = std::result::Result<T, DeltaBuilderError>;

/// Errors that can occur while building a candidate delta
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeltaBuilderError {
    /// The mempool did not answer; this is an integration fault, not retried
    #[error("Mempool unavailable: {0}")]
    MempoolUnavailable(String),

    /// The mempool did not answer within the configured timeout
    #[error("Mempool timed out after {0} ms")]
    MempoolTimeout(u64),

    /// Builder settings that can never produce a delta
    #[error("Invalid builder configuration: {0}")]
    InvalidConfiguration(String),
}
