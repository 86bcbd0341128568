#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use super::feature::Feature;
use crate::loc::{Interval, IntervalOp};

/// Annotated contig: a nucleotide sequence and its features.
/// Guarantees:
/// - The ID and the sequence are non-empty.
/// - Every feature lies within the sequence.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Contig {
    id: String,
    seq: Vec<u8>,
    features: Vec<Feature>,
}

impl Contig {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>, features: Vec<Feature>) -> Result<Self> {
        let (id, seq) = (id.into(), seq.into());
        ensure!(!id.is_empty(), "Contig ID cannot be empty");
        ensure!(!seq.is_empty(), "Contig {id} has an empty sequence");
        for feature in &features {
            ensure!(
                feature.interval().end() <= seq.len(),
                "Feature {} is outside of contig {id} (length {})",
                feature.interval(),
                seq.len()
            );
        }
        Ok(Self { id, seq, features })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// The whole contig as an interval [0, len).
    pub fn extent(&self) -> Interval<usize> {
        // Sequences are never empty, so the interval is always valid
        Interval::new(0, self.seq.len()).unwrap_or_default()
    }

    /// Subsequence covered by the interval or None if the interval runs past the contig end.
    pub fn subseq(&self, interval: &Interval<usize>) -> Option<&[u8]> {
        self.seq.get(interval.start()..interval.end())
    }
}
