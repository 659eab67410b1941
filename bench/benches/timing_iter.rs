use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use gammaseq::{EliasGammaSeq, EliasGammaSeqBuilder, DEFAULT_INTERVAL};

const SAMPLE_SIZE: usize = 30;
const WARM_UP_TIME: Duration = Duration::from_secs(5);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const SEED_VALS: u64 = 113;
const SEED_QUERIES: u64 = 114514;
const NUM_VALS: usize = 1 << 20;

fn gen_random_vals(len: usize, max_gap: u64, seed: u64) -> Vec<u64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut cur = 0;
    (0..len)
        .map(|_| {
            cur += rng.gen_range(1..=max_gap);
            cur
        })
        .collect()
}

fn gen_sorted_queries(len: usize, max: u64, seed: u64) -> Vec<u64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut queries: Vec<u64> = (0..len).map(|_| rng.gen_range(0..max)).collect();
    queries.sort_unstable();
    queries
}

fn build(vals: &[u64], interval: usize) -> EliasGammaSeq {
    let mut b = EliasGammaSeqBuilder::with_interval(interval).unwrap();
    b.extend(vals.iter().copied()).unwrap();
    b.build()
}

fn criterion_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_iter");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let vals = gen_random_vals(NUM_VALS, 64, SEED_VALS);
    let seq = build(&vals, DEFAULT_INTERVAL);

    group.bench_function("gammaseq/iter", |b| {
        b.iter(|| {
            if seq.iter().sum::<u64>() == 0 {
                panic!("Should not come.");
            }
        });
    });

    group.bench_function("std/Vec", |b| {
        b.iter(|| {
            if vals.iter().sum::<u64>() == 0 {
                panic!("Should not come.");
            }
        });
    });
}

fn criterion_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_merge");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let vals = gen_random_vals(NUM_VALS, 64, SEED_VALS);
    for num_queries in [1000, 100000] {
        perform_merge(&mut group, &vals, num_queries);
    }
}

fn perform_merge(group: &mut BenchmarkGroup<WallTime>, vals: &[u64], num_queries: usize) {
    let max = vals[vals.len() - 1] + 1;
    let queries = gen_sorted_queries(num_queries, max, SEED_QUERIES);
    let seq = build(vals, DEFAULT_INTERVAL);

    for lookahead in [0, 2048, u64::MAX] {
        group.bench_function(
            format!("gammaseq/merge_iter/queries={num_queries}/lookahead={lookahead}"),
            |b| {
                b.iter(|| {
                    let hits = seq
                        .merge_iter_with_lookahead(queries.iter().copied(), lookahead)
                        .filter(|r| matches!(r, Ok(Some(_))))
                        .count();
                    if hits > queries.len() {
                        panic!("Should not come.");
                    }
                });
            },
        );
    }

    group.bench_function(format!("gammaseq/find_exact/queries={num_queries}"), |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .filter(|&&q| seq.find_exact(q).is_some())
                .count();
            if hits > queries.len() {
                panic!("Should not come.");
            }
        });
    });
}

criterion_group!(benches, criterion_iter, criterion_merge);

criterion_main!(benches);
