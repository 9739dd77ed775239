//! Domain layer: voting, election and the accepted-delta history.

pub mod bounded;
pub mod cache;
pub mod config;
pub mod elector;
pub mod error;
pub mod hash_provider;
pub mod voter;

pub use bounded::BoundedMap;
pub use cache::DeltaCache;
pub use config::ConsensusConfig;
pub use elector::DeltaElector;
pub use error::{ConsensusError, Result};
pub use hash_provider::DeltaHashProvider;
pub use voter::{DeltaVoter, ScoredCandidate};
