use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Result};

use prophi_core_rs::genome::{Contig, Feature};
use prophi_core_rs::loc::{Interval, IntervalOp};

/// Part of a contig materialized as a standalone sequence.
/// Features are in local coordinates (0 = `interval.start()`) and sorted by their start.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Region {
    id: String,
    interval: Interval<usize>,
    seq: Vec<u8>,
    features: Vec<Feature>,
}

impl Region {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
}

/// Cut `interval` out of the contig. Only features fully enveloped by the interval are kept.
pub fn extract(contig: &Contig, interval: Interval<usize>, id: impl Into<String>) -> Result<Region> {
    let seq = contig
        .subseq(&interval)
        .ok_or_else(|| {
            eyre!(
                "Region {} is outside of contig {} (length {})",
                interval,
                contig.id(),
                contig.len()
            )
        })?
        .to_vec();

    let mut features: Vec<Feature> = contig
        .features()
        .iter()
        .filter_map(|x| x.relocated(&interval))
        .collect();
    features.sort_by_key(|x| x.interval().start());

    Ok(Region {
        id: id.into(),
        interval,
        seq,
        features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prophi_core_rs::genome::{FeatureKind, Qualifiers};
    use prophi_core_rs::loc::Strand;

    fn cds(start: usize, end: usize, strand: Strand) -> Feature {
        Feature::new(
            Interval::new(start, end).unwrap(),
            strand,
            FeatureKind::Cds,
            Qualifiers::default(),
        )
    }

    fn contig() -> Contig {
        let seq: Vec<u8> = b"ACGT".iter().cycle().take(1_000).copied().collect();
        Contig::new(
            "ctg",
            seq,
            vec![
                cds(400, 480, Strand::Forward),
                cds(50, 150, Strand::Forward),
                cds(90, 210, Strand::Reverse),
                cds(150, 300, Strand::Reverse),
                cds(290, 420, Strand::Forward),
                cds(100, 400, Strand::Forward),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_extract() -> Result<()> {
        let region = extract(&contig(), Interval::new(100, 400)?, "ctg_region_0")?;
        assert_eq!(region.id(), "ctg_region_0");
        assert_eq!(region.len(), 300);
        assert_eq!(region.seq()[..4], *b"ACGT");

        let local: Vec<(usize, usize)> = region
            .features()
            .iter()
            .map(|x| x.interval().as_interval().into())
            .collect();
        // Crossing features (50-150, 90-210, 290-420, 400-480) are dropped
        assert_eq!(local, vec![(0, 300), (50, 200)]);
        assert_eq!(region.features()[1].strand(), &Strand::Reverse);
        Ok(())
    }

    #[test]
    fn test_local_features_within_bounds() -> Result<()> {
        let contig = contig();
        for (start, end) in [(0, 1_000), (50, 480), (120, 330), (0, 10)] {
            let region = extract(&contig, Interval::new(start, end)?, "region")?;
            for feature in region.features() {
                assert!(feature.interval().end() <= region.len());
            }
            for pair in region.features().windows(2) {
                assert!(pair[0].interval().start() <= pair[1].interval().start());
            }
        }
        Ok(())
    }

    #[test]
    fn test_out_of_bounds() -> Result<()> {
        assert!(extract(&contig(), Interval::new(900, 1_001)?, "region").is_err());
        Ok(())
    }
}
