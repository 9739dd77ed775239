//! # DL-04 Consensus Benchmarks
//!
//! Vote tallying with every producer voting, as in the Synchronisation phase.

use criterion::{BenchmarkId, Criterion};
use dl_04_consensus::DeltaElector;
use shared_types::{CandidateDelta, FavouriteDelta};

use super::peers;

pub fn bench_election(c: &mut Criterion) {
    let mut group = c.benchmark_group("dl-04/most_popular_candidate");
    for producers in [5usize, 50, 500] {
        let ids = peers(producers);
        let previous = [1u8; 32];
        group.bench_with_input(BenchmarkId::from_parameter(producers), &ids, |b, ids| {
            b.iter(|| {
                let elector = DeltaElector::new(4);
                for (i, voter) in ids.iter().enumerate() {
                    let producer = ids[i % 3];
                    elector.on_favourite(
                        FavouriteDelta {
                            candidate: CandidateDelta {
                                hash: *producer.as_bytes(),
                                producer_id: producer,
                                previous_delta_hash: previous,
                            },
                            voter_id: *voter,
                        },
                        ids,
                    );
                }
                elector.most_popular_candidate(&previous, ids.len())
            })
        });
    }
    group.finish();
}
