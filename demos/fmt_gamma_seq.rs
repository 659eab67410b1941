//! Example to demonstrate the usage of `fmt::Debug` for `EliasGammaSeq`.

use gammaseq::EliasGammaSeqBuilder;

fn main() -> anyhow::Result<()> {
    let mut b = EliasGammaSeqBuilder::with_interval(4)?;
    b.extend([1, 2, 4, 8, 16, 32, 100000, 100001, 100003])?;
    let seq = b.build();

    // Print the sequence using the default debug format.
    // The output will be
    // "EliasGammaSeq { bits: [65 items], num_bits: 65, checkpoints: [3 items], interval: 4, len: 9 }".
    println!("{:?}", seq);

    // For a more detailed view, use the alternate debug format,
    // which prints codeword bits 16 per row and checkpoint values 8 per row:
    //
    // EliasGammaSeq {
    //     bits: [
    //         0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1,
    //         ...
    //     ],
    //     num_bits: 65,
    //     checkpoints: [
    //         1, 16, 100003,
    //     ],
    //     interval: 4,
    //     len: 9,
    // }
    println!("{:#?}", seq);

    Ok(())
}
