use derive_getters::{Dissolve, Getters};

use prophi_core_rs::genome::Contig;
use prophi_core_rs::loc::Interval;

use crate::resolve::Resolution;

/// Prophage candidate on a contig.
///
/// The coarse interval is the initial prediction and never changes. The current interval is
/// overwritten by every refinement and always derived from the coarse one.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Prophage<'a> {
    #[getter(skip)]
    contig: &'a Contig,
    id: String,
    coarse: Interval<usize>,
    interval: Interval<usize>,
    resolution: Option<Resolution>,
}

impl<'a> Prophage<'a> {
    /// Bounds are not validated here: a candidate that runs past its contig fails refinement.
    pub fn new(contig: &'a Contig, id: impl Into<String>, coarse: Interval<usize>) -> Self {
        Self {
            contig,
            id: id.into(),
            coarse,
            interval: coarse,
            resolution: None,
        }
    }

    /// Candidates for the predicted intervals of the contig, named `prophi<contig id>-<n>`
    /// with `n` starting from 1.
    pub fn from_predictions(
        contig: &'a Contig,
        predictions: impl IntoIterator<Item = Interval<usize>>,
    ) -> Vec<Self> {
        predictions
            .into_iter()
            .enumerate()
            .map(|(ind, interval)| Self::new(contig, format!("prophi{}-{}", contig.id(), ind + 1), interval))
            .collect()
    }

    /// The contig outlives the candidate, so the reference doesn't borrow `self`.
    pub fn contig(&self) -> &'a Contig {
        self.contig
    }

    pub fn set_resolution(&mut self, interval: Interval<usize>, resolution: Resolution) -> &mut Self {
        self.interval = interval;
        self.resolution = Some(resolution);
        self
    }

    /// Drop the refinement and return to the coarse interval.
    pub fn reset(&mut self) -> &mut Self {
        self.interval = self.coarse;
        self.resolution = None;
        self
    }
}
