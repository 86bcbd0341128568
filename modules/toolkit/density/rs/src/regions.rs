use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Result};

use prophi_core_rs::num;

use super::density::Sample;

/// Two-level cutoff derived from the density distribution:
/// runs are delimited by `eps` and accepted only if their peak reaches `ceiling`.
#[derive(Clone, Copy, PartialEq, Debug, Dissolve, Getters)]
pub struct Thresholds {
    mean: f64,
    std: f64,
    eps: f64,
    ceiling: f64,
}

impl Thresholds {
    /// Estimate thresholds from the samples. Returns None if the signal is flat (or empty) and
    /// no region can stand out of it.
    pub fn estimate(samples: &[Sample], f: f64, c: f64) -> Option<Self> {
        let densities: Vec<f64> = samples.iter().map(|x| *x.density()).collect();
        let (mean, std) = num::mean_std(&densities)?;
        // Numerically flat signal, rounding noise must not be mistaken for a peak
        if !std.is_finite() || std <= mean.abs() * 1e-12 {
            return None;
        }
        Some(Self {
            mean,
            std,
            eps: mean - f * std,
            ceiling: mean + c * std,
        })
    }
}

/// Maximal run of consecutive samples with density >= eps. Never empty, sorted by coordinate.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct RegionContig {
    samples: Vec<Sample>,
}

impl RegionContig {
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(eyre!("Region contig must have at least one sample"));
        }
        for pair in samples.windows(2) {
            if *pair[1].bin() != *pair[0].bin() + 1 {
                return Err(eyre!(
                    "Region contig samples must be consecutive bins: {:?} -> {:?}",
                    pair[0],
                    pair[1]
                ));
            }
        }
        Ok(Self { samples })
    }

    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Sample with the highest density (the first one if there are ties).
    pub fn peak(&self) -> &Sample {
        self.samples
            .iter()
            .reduce(|best, x| if x.density() > best.density() { x } else { best })
            .unwrap_or(&self.samples[0])
    }
}

/// Gene-dense regions of the density signal.
///
/// Single pass over the samples: consecutive samples with density >= eps are merged into runs,
/// runs are kept only if their peak density reaches the ceiling. Flat signals (e.g. contigs without
/// genes) never produce regions.
pub fn dense_regions(samples: &[Sample], f: f64, c: f64) -> Vec<RegionContig> {
    let thresholds = match Thresholds::estimate(samples, f, c) {
        Some(x) => x,
        None => {
            log::debug!("Flat gene density signal, no dense regions can be called");
            return Vec::new();
        }
    };

    let mut result = Vec::new();
    let mut current: Vec<Sample> = Vec::new();
    let mut flush = |current: &mut Vec<Sample>| {
        if current.is_empty() {
            return;
        }
        let run = std::mem::take(current);
        let peak = run
            .iter()
            .map(|x| *x.density())
            .fold(f64::NEG_INFINITY, f64::max);
        if peak >= thresholds.ceiling {
            result.push(RegionContig { samples: run });
        }
    };

    for sample in samples {
        let contiguous = current
            .last()
            .map(|x| *x.bin() + 1 == *sample.bin())
            .unwrap_or(true);
        if !contiguous || *sample.density() < thresholds.eps {
            flush(&mut current);
        }
        if *sample.density() >= thresholds.eps {
            current.push(*sample);
        }
    }
    flush(&mut current);

    result
}
