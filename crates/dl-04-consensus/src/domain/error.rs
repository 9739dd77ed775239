//! Error types for the consensus subsystem.

use dl_02_delta_builder::DeltaBuilderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Consensus errors.
///
/// Hashes are carried as short hex so the messages stay readable in logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Invalid consensus configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Candidate build failed: {0}")]
    Build(#[from] DeltaBuilderError),

    #[error("Delta store error: {0}")]
    Store(String),

    #[error("Delta not found: {0}")]
    DeltaNotFound(String),

    #[error("Delta content does not hash to its address {0}")]
    AddressMismatch(String),

    #[error("Delta {new} is not a child of {previous}")]
    NotAChild { previous: String, new: String },

    #[error("Delta {new} (t={new_timestamp}) is not newer than its parent (t={previous_timestamp})")]
    NotNewer {
        new: String,
        previous_timestamp: u64,
        new_timestamp: u64,
    },

    #[error("Delta {0} already accepted")]
    AlreadyAccepted(String),
}
