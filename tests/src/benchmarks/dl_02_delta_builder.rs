//! # DL-02 Delta Builder Benchmarks
//!
//! - Salt derivation: one ISAAC seeding per round
//! - Salted ordering: dominates candidate construction for large mempools
//! - Producer ranking: one digest per known peer

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use dl_02_delta_builder::{
    candidate_hash, pack_by_gas_price, rank_producers, salt_from_previous_delta, salted_order,
    sorted_signatures,
};
use shared_types::CoinbaseEntry;

use super::{peers, transactions};

pub fn bench_salt_derivation(c: &mut Criterion) {
    c.bench_function("dl-02/salt_from_previous_delta", |b| {
        b.iter(|| salt_from_previous_delta(black_box(&[7u8; 32])))
    });
}

pub fn bench_candidate_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("dl-02/candidate_construction");
    for count in [100usize, 1_000, 10_000] {
        let snapshot = transactions(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &snapshot, |b, snapshot| {
            b.iter(|| {
                let packed = pack_by_gas_price(snapshot.clone(), u64::MAX, 21_000);
                let salt = salt_from_previous_delta(&[3u8; 32]);
                let salted = salted_order(packed.included, &salt);
                let signatures = sorted_signatures(salted.iter().map(|e| &e.transaction));
                candidate_hash(&salted, &signatures, &CoinbaseEntry::new(0, [0u8; 32]))
            })
        });
    }
    group.finish();
}

pub fn bench_producer_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("dl-02/rank_producers");
    for count in [10usize, 100, 1_000] {
        let known = peers(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &known, |b, known| {
            b.iter(|| rank_producers(black_box(&[9u8; 32]), known.iter().copied()))
        });
    }
    group.finish();
}
