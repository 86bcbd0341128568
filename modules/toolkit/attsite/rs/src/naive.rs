use eyre::Result;

use prophi_core_rs::genome::Contig;
use prophi_core_rs::loc::{Interval, IntervalOp};
use prophi_density_rs::Scanner;

use crate::kmer::find_anchor;

/// Coarse prophage predictions without any reference data.
///
/// Each gene-dense region is split in two halves (the two middle bases are dropped) and the
/// halves are searched for a shared exact match of at least `k` bases, starting from their
/// middles. The prediction spans from the left copy to the end of the right copy. Regions without
/// a match are skipped.
pub fn naive_prophages(contig: &Contig, scanner: &Scanner, k: usize) -> Result<Vec<Interval<usize>>> {
    let mut predictions = Vec::new();
    for region in scanner.prefilter(contig)? {
        let half = region.len() / 2;
        if half == 0 {
            continue;
        }
        let (left, right) = (&region.seq()[..half - 1], &region.seq()[half + 1..]);

        let Some(anchor) = find_anchor(left, right, left.len() / 2, right.len() / 2, k) else {
            log::debug!("{}: no shared {k}-mers between the halves", region.id());
            continue;
        };

        let offset = region.interval().start();
        predictions.push(Interval::new(
            offset + anchor.left().start(),
            offset + half + 1 + anchor.right().end(),
        )?);
    }
    log::info!(
        "Contig {}: {} naive prophage prediction(s)",
        contig.id(),
        predictions.len()
    );
    Ok(predictions)
}
