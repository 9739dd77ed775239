//! # Delta-Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups per subsystem
//! │   ├── dl_02_delta_builder.rs
//! │   └── dl_04_consensus.rs
//! │
//! └── integration/      # Several nodes in one process
//!     ├── gossip.rs     # Dissemination over the in-memory network
//!     └── rounds.rs     # Full production rounds
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dl-tests
//! cargo test -p dl-tests integration::rounds
//!
//! # Benchmarks
//! cargo bench -p dl-tests
//! ```

pub mod benchmarks;
pub mod integration;
