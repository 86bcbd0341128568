use derive_getters::{Dissolve, Getters};
use eyre::Result;

use prophi_core_rs::genome::Contig;
use prophi_core_rs::loc::Interval;

use super::config::Config;
use super::density::{density, Sample};
use super::extract::{extract, Region};
use super::regions::{dense_regions, RegionContig};

/// Gene density scanner: flags gene-dense (phage-like) parts of contigs.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Scanner {
    config: Config,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl Scanner {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn samples(&self, contig: &Contig) -> Result<Vec<Sample>> {
        density(contig, self.config.window_size, self.config.bin_width)
    }

    pub fn region_contigs(&self, contig: &Contig) -> Result<Vec<RegionContig>> {
        let samples = self.samples(contig)?;
        Ok(dense_regions(&samples, self.config.f, self.config.c))
    }

    /// Coordinates of gene-dense regions. Each run of dense samples is padded by half of the
    /// scanning window on both sides and clamped to the contig.
    pub fn scan(&self, contig: &Contig) -> Result<Vec<Interval<usize>>> {
        let half = self.config.half_window();
        let bounds = contig.extent();

        let mut result = Vec::new();
        for region in self.region_contigs(contig)? {
            let core = Interval::new(
                *region.first().coordinate(),
                *region.last().coordinate() + 1,
            )?;
            // `core` ends right after the last sample, so pad the right side by one base less
            match core.padded(half, half.saturating_sub(1), &bounds) {
                Some(x) => result.push(x),
                None => log::warn!(
                    "Dense region {} of contig {} vanished after clamping",
                    core,
                    contig.id()
                ),
            }
        }
        log::debug!(
            "Contig {}: {} gene-dense region(s)",
            contig.id(),
            result.len()
        );
        Ok(result)
    }

    /// Scan the contig and cut every gene-dense region out of it.
    pub fn prefilter(&self, contig: &Contig) -> Result<Vec<Region>> {
        self.scan(contig)?
            .into_iter()
            .enumerate()
            .map(|(i, interval)| extract(contig, interval, format!("{}_region_{}", contig.id(), i)))
            .collect()
    }
}
