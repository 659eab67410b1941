use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use gammaseq::{EliasGammaSeq, EliasGammaSeqBuilder};

const SEED_VALS: u64 = 113;
const NUM_VALS: usize = 1 << 20;

fn main() -> anyhow::Result<()> {
    for max_gap in [2, 16, 256, 1 << 16] {
        show_memories(max_gap)?;
    }
    Ok(())
}

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

fn build(vals: &[u64], interval: usize) -> anyhow::Result<EliasGammaSeq> {
    let mut b = EliasGammaSeqBuilder::with_interval(interval)?;
    b.extend(vals.iter().copied())?;
    Ok(b.build())
}

fn show_memories(max_gap: u64) -> anyhow::Result<()> {
    let vals = gen_random_vals(NUM_VALS, max_gap, SEED_VALS);
    println!("[max_gap = {}]", max_gap);

    for interval in [32, 128, 512] {
        let seq = build(&vals, interval)?;
        print_memory(
            &format!("EliasGammaSeq(interval={interval})"),
            seq.size_in_bytes(),
            seq.as_bytes().len(),
        );
    }
    Ok(())
}

fn print_memory(name: &str, bytes: usize, code_bytes: usize) {
    println!(
        "{}: {:.3} bits per value ({:.3} in codewords)",
        name,
        (bytes * 8) as f64 / NUM_VALS as f64,
        (code_bytes * 8) as f64 / NUM_VALS as f64
    );
}
