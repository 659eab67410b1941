//! Example to intersect two sorted posting lists with `EliasGammaSeq::merge_iter`.
//!
//! Run with `RUST_LOG=gammaseq=trace` to see the checkpoint jumps.

use gammaseq::{EliasGammaSeq, EliasGammaSeqBuilder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Multiples of 3 below 100000, compressed.
    let mut b = EliasGammaSeqBuilder::with_interval(64)?;
    b.extend((0..100000).step_by(3))?;
    let threes = b.build();

    // A sparse sorted list, streamed as queries.
    let queries = [5, 9, 10, 33, 999, 1000, 50001, 50004, 99999];

    let hits = threes
        .merge_iter(queries)
        .zip(queries)
        .filter_map(|(found, q)| match found {
            Ok(Some(pos)) => Some(Ok((q, pos))),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (q, pos) in &hits {
        println!("{q} is stored at position {pos}");
    }
    tracing::info!(
        num_queries = queries.len(),
        num_hits = hits.len(),
        bytes = threes.size_in_bytes(),
        "merge join finished"
    );

    let check = EliasGammaSeq::from_slice(&queries)?;
    println!(
        "{} of {} queries found; the queries alone take {} bytes",
        hits.len(),
        check.len(),
        check.size_in_bytes()
    );

    Ok(())
}
