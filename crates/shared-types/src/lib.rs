//! # Shared Types Crate
//!
//! Value types exchanged between the delta-ledger subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary
//!   (hashes, peer identities, transactions, deltas, gossip messages) lives here.
//! - **Canonical bytes**: types that feed a digest expose `to_bytes()` with a
//!   fixed field order so every node hashes the same input.

pub mod deltas;
pub mod entities;
pub mod hashing;
pub mod messages;

pub use deltas::*;
pub use entities::*;
pub use hashing::{sha256, sha256_concat, short_hex};
pub use messages::*;
