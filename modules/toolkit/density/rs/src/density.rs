#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, Result};
use itertools::Itertools;

use prophi_core_rs::genome::Contig;
use prophi_core_rs::loc::IntervalOp;

/// Gene density at a single sampling position.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Sample {
    bin: usize,
    coordinate: usize,
    density: f64,
}

/// Gene density signal along the contig.
///
/// One sample is emitted every `bin_width` bases starting from 0. The density of a sample at
/// coordinate `x` is the number of gene boundaries (starts and ends of gene-like features) inside
/// `[x - window_size / 2, x + window_size / 2)` divided by `window_size`. Windows are truncated at
/// the contig start.
pub fn density(contig: &Contig, window_size: usize, bin_width: usize) -> Result<Vec<Sample>> {
    ensure!(bin_width > 0, "Bin width must be positive");
    ensure!(window_size > 0, "Window size must be positive");

    let boundaries = contig
        .features()
        .iter()
        .filter(|x| x.kind().is_gene())
        .flat_map(|x| [x.interval().start(), x.interval().end()])
        .sorted_unstable()
        .collect_vec();

    let half = window_size / 2;
    let norm = window_size as f64;
    let samples = (0..contig.len())
        .step_by(bin_width)
        .enumerate()
        .map(|(bin, coordinate)| {
            let start = coordinate.saturating_sub(half);
            let end = coordinate + half;
            let count = boundaries.partition_point(|&x| x < end)
                - boundaries.partition_point(|&x| x < start);
            Sample::new(bin, coordinate, count as f64 / norm)
        })
        .collect();
    Ok(samples)
}
