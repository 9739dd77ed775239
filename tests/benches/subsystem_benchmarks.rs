//! # Delta-Ledger Subsystem Benchmarks
//!
//! | Subsystem | Operation | Runs |
//! |-----------|-----------|------|
//! | dl-02 Delta Builder | salt, salted ordering, candidate hash | once per round per producer |
//! | dl-02 Delta Builder | producer ranking | once per round per node |
//! | dl-04 Consensus | vote tally | once per round per node |

use criterion::{criterion_group, criterion_main};
use dl_tests::benchmarks::{dl_02_delta_builder, dl_04_consensus};

criterion_group!(
    benches,
    dl_02_delta_builder::bench_salt_derivation,
    dl_02_delta_builder::bench_candidate_construction,
    dl_02_delta_builder::bench_producer_ranking,
    dl_04_consensus::bench_election,
);
criterion_main!(benches);
