use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use gammaseq::{EliasGammaSeq, EliasGammaSeqBuilder};

const SAMPLE_SIZE: usize = 30;
const WARM_UP_TIME: Duration = Duration::from_secs(5);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const SEED_VALS: u64 = 113;
const SEED_QUERIES: u64 = 114514;
const NUM_VALS: usize = 1 << 20;
const NUM_QUERIES: usize = 1000;

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

fn gen_random_ints(len: usize, min: usize, max: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(min..max)).collect()
}

fn build(vals: &[u64], interval: usize) -> EliasGammaSeq {
    let mut b = EliasGammaSeqBuilder::with_interval(interval).unwrap();
    b.extend(vals.iter().copied()).unwrap();
    b.build()
}

fn criterion_get_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_get_dense");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let vals = gen_random_vals(NUM_VALS, 4, SEED_VALS);
    perform_get(&mut group, &vals);
}

fn criterion_get_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_get_sparse");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let vals = gen_random_vals(NUM_VALS, 1 << 16, SEED_VALS);
    perform_get(&mut group, &vals);
}

fn run_queries(seq: &EliasGammaSeq, queries: &[usize]) {
    let mut sum = 0;
    for &q in queries {
        sum += seq.get(q).unwrap();
    }
    if sum == 0 {
        panic!("Should not come.");
    }
}

fn run_queries_two(seq: &EliasGammaSeq, queries: &[usize]) {
    let mut sum = 0;
    for &q in queries {
        let (a, b) = seq.get_two(q).unwrap();
        sum += b - a;
    }
    if sum == 0 {
        panic!("Should not come.");
    }
}

fn perform_get(group: &mut BenchmarkGroup<WallTime>, vals: &[u64]) {
    let queries = gen_random_ints(NUM_QUERIES, 0, vals.len() - 1, SEED_QUERIES);

    for interval in [32, 128, 512] {
        let seq = build(vals, interval);
        group.bench_function(format!("gammaseq/get/interval={interval}"), |b| {
            b.iter(|| run_queries(&seq, &queries));
        });
        group.bench_function(format!("gammaseq/get_two/interval={interval}"), |b| {
            b.iter(|| run_queries_two(&seq, &queries));
        });
    }
}

criterion_group!(benches, criterion_get_dense, criterion_get_sparse);

criterion_main!(benches);
