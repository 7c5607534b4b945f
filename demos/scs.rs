//! Example: shortest common supersequence with every kernel.
//!
//! Run with:
//! `cargo run --example scs`

use scs_dp::{Aligner, Alphabet, Metric, Strategy};

fn main() -> scs_dp::Result<()> {
    let x = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let y = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let aligner = Aligner::builder().alphabet(Alphabet::dna()).threads(4).build()?;

    for strategy in Strategy::ALL {
        let lcs = aligner.tabulate_with(x, y, Metric::Lcs, strategy)?;
        let scs = aligner.tabulate_with(x, y, Metric::Scs, strategy)?;
        println!(
            "{:<26} LCS length: {:>3}  SCS length: {:>3}",
            strategy.as_str(),
            lcs.length(),
            scs.length()
        );
    }

    let scs = aligner.scs(x, y)?;
    println!("SCS: {}", String::from_utf8_lossy(&scs));
    Ok(())
}
