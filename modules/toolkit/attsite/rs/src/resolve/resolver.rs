use std::path::{Path, PathBuf};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, eyre, Result, WrapErr};
use itertools::Itertools;

use prophi_core_rs::genome::Contig;
use prophi_core_rs::loc::{Interval, IntervalOp};
use prophi_io_rs::tabular::Hit;

use super::config::Config;
use crate::homology::{map_references, Aligner, ReferenceMap};
use crate::kmer::{find_anchor, Anchor};
use crate::prophage::Prophage;

/// Evidence behind the refined coordinates of a prophage.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Resolution {
    /// Both flanks hit the same reference and the two alignments overlap on it.
    Homology { reference: String, overlap: usize },
    /// Exact match shared by the flanks.
    Kmer { anchor: Anchor },
    /// Nothing found, the coarse coordinates are kept.
    Unresolved,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Attempt {
    Homology,
    Kmer,
}

/// Attempts in the order of decreasing confidence. If all of them fail, the candidate is unresolved.
const ATTEMPTS: [Attempt; 2] = [Attempt::Homology, Attempt::Kmer];

/// Everything known about a candidate before any resolution attempt.
struct Probe<'a> {
    contig: &'a Contig,
    coarse: Interval<usize>,
    extension: usize,
    left: &'a [u8],
    right: &'a [u8],
    /// Pairs of (left, right) hits to the same reference, best combined e-value first.
    consensus: Vec<(Hit, Hit)>,
}

/// Length of the overlap between two flank alignments on their shared reference. Only pairs of
/// hits with the same orientation are comparable.
fn overlap(left: &Hit, right: &Hit) -> Option<usize> {
    let overlap = match (left.is_forward(), right.is_forward()) {
        (true, true) => left.subject_end().checked_sub(*right.subject_start()),
        (false, false) => right.subject_start().checked_sub(*left.subject_end()),
        _ => None,
    };
    overlap.filter(|x| *x > 0)
}

/// FASTA ID and file stem of a flank query. Whitespace and path separators are replaced with `_`.
fn query_label(id: &str, side: char) -> String {
    let id: String = id
        .chars()
        .map(|x| match x {
            '/' | '\\' => '_',
            x if x.is_whitespace() => '_',
            x => x,
        })
        .collect();
    format!("{id}_{side}_extension")
}

fn consensus(left: ReferenceMap, mut right: ReferenceMap) -> Vec<(Hit, Hit)> {
    left.into_iter()
        .filter_map(|(reference, lhit)| right.remove(&reference).map(|rhit| (lhit, rhit)))
        .sorted_by(|a, b| {
            (a.0.evalue() + a.1.evalue())
                .total_cmp(&(b.0.evalue() + b.1.evalue()))
                .then_with(|| a.0.subject().cmp(b.0.subject()))
        })
        .collect()
}

impl Probe<'_> {
    /// Coordinates on the contig or None if they don't form a valid interval inside of it.
    fn interval(&self, start: Option<usize>, end: Option<usize>) -> Option<Interval<usize>> {
        let interval = Interval::new(start?, end?).ok()?;
        (interval.end() <= self.contig.len()).then_some(interval)
    }

    fn homology(&self, k: usize) -> Option<(Interval<usize>, Resolution)> {
        self.consensus.iter().find_map(|(left, right)| {
            let overlap = overlap(left, right).filter(|x| *x >= k)?;
            let start = self
                .coarse
                .start()
                .checked_add(*left.query_end())
                .and_then(|x| x.checked_sub(overlap));
            let end = self
                .extension
                .checked_sub(*right.query_start())
                .and_then(|x| self.coarse.end().checked_sub(x))
                .and_then(|x| x.checked_add(overlap));

            match self.interval(start, end) {
                Some(interval) => Some((
                    interval,
                    Resolution::Homology {
                        reference: left.subject().clone(),
                        overlap,
                    },
                )),
                None => {
                    log::warn!(
                        "Hits to {} overlap by {} but imply invalid coordinates, skipping",
                        left.subject(),
                        overlap
                    );
                    None
                }
            }
        })
    }

    /// Window-local origins for the anchor search: the middle of the windows, pulled towards the
    /// junction suggested by the best reference pair.
    fn origins(&self) -> (usize, usize) {
        let half = self.extension / 2;
        match self.consensus.first() {
            Some((left, right)) => (half.min(*left.query_end()), half.max(*right.query_start())),
            None => (half, half),
        }
    }

    fn kmer(&self, k: usize) -> Option<(Interval<usize>, Resolution)> {
        let (l_origin, r_origin) = self.origins();
        let anchor = find_anchor(self.left, self.right, l_origin, r_origin, k)?;
        if anchor.len() < k {
            return None;
        }

        let start = self.coarse.start().checked_add(anchor.left().start());
        let end = (self.coarse.end() - self.extension).checked_add(anchor.right().end());
        let interval = self.interval(start, end)?;
        Some((interval, Resolution::Kmer { anchor }))
    }
}

/// Attachment site resolver: refines the boundaries of prophage candidates.
#[derive(Clone, Debug, Dissolve, Getters)]
pub struct Resolver<A> {
    config: Config,
    aligner: A,
    database: PathBuf,
}

impl<A: Aligner> Resolver<A> {
    pub fn new(config: Config, aligner: A, database: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            aligner,
            database: database.into(),
        })
    }

    /// Refine the candidate and return its new coordinates.
    ///
    /// Flanking windows are always taken from the coarse interval, therefore repeated calls with the
    /// same aligner produce the same coordinates. Query and aligner files are placed in `workdir`,
    /// which is owned by the caller. Only malformed candidates and aligner failures are errors.
    pub fn resolve(&self, candidate: &mut Prophage, workdir: &Path) -> Result<Interval<usize>> {
        let probe = self
            .probe(candidate, workdir)
            .wrap_err_with(|| format!("Failed to probe prophage {}", candidate.id()))?;

        let k = self.config.min_kmer_score;
        let (interval, resolution) = ATTEMPTS
            .iter()
            .find_map(|attempt| match attempt {
                Attempt::Homology => probe.homology(k),
                Attempt::Kmer => probe.kmer(k),
            })
            .unwrap_or((probe.coarse, Resolution::Unresolved));

        log::debug!(
            "{}: {} -> {} ({:?})",
            candidate.id(),
            probe.coarse,
            interval,
            resolution
        );
        candidate.set_resolution(interval, resolution);
        Ok(interval)
    }

    fn probe<'a>(&self, candidate: &Prophage<'a>, workdir: &Path) -> Result<Probe<'a>> {
        let contig = candidate.contig();
        let coarse = *candidate.coarse();
        let extension = self.config.extension;

        ensure!(extension > 0, "Extension must be positive");
        ensure!(
            extension <= coarse.len(),
            "Extension {extension} exceeds the length of prophage {} {coarse}",
            candidate.id()
        );
        let seq = contig.subseq(&coarse).ok_or_else(|| {
            eyre!(
                "Prophage {} {coarse} is outside of contig {} (length {})",
                candidate.id(),
                contig.id(),
                contig.len()
            )
        })?;
        let (left, right) = (&seq[..extension], &seq[seq.len() - extension..]);

        let lmap = map_references(
            left,
            &query_label(candidate.id(), 'L'),
            &self.database,
            workdir,
            &self.aligner,
        )?;
        let rmap = map_references(
            right,
            &query_label(candidate.id(), 'R'),
            &self.database,
            workdir,
            &self.aligner,
        )?;

        Ok(Probe {
            contig,
            coarse,
            extension,
            left,
            right,
            consensus: consensus(lmap, rmap),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homology::Precomputed;

    const EXTENSION: usize = 50;

    /// A/C-only sequence followed by G/T-only sequence: flanks of (100, 300) share no k-mers.
    fn contig() -> Contig {
        let mut seq = b"AAC".repeat(67);
        seq.truncate(200);
        seq.extend(b"GGT".repeat(67).into_iter().take(200));
        Contig::new("ctg", seq, vec![]).unwrap()
    }

    fn hit(subject: &str, sstart: usize, send: usize, qstart: usize, qend: usize, evalue: f64) -> Hit {
        Hit::new(subject.to_string(), sstart, send, qstart, qend, evalue)
    }

    #[test]
    fn test_query_label() {
        assert_eq!(query_label("prophictg-1", 'L'), "prophictg-1_L_extension");
        assert_eq!(
            query_label("prophiNC_1 plasmid\tpX/2\\b-1", 'R'),
            "prophiNC_1_plasmid_pX_2_b-1_R_extension"
        );
    }

    fn resolver(aligner: Precomputed) -> Resolver<Precomputed> {
        let mut config = Config::new();
        config.set_extension(EXTENSION).set_min_kmer_score(5);
        Resolver::new(config, aligner, "refs").unwrap()
    }

    fn resolve(aligner: Precomputed) -> Result<(Interval<usize>, Option<Resolution>)> {
        let contig = contig();
        let mut prophage = Prophage::new(&contig, "p", Interval::new(100, 300)?);
        let workdir = tempfile::tempdir()?;
        let interval = resolver(aligner).resolve(&mut prophage, workdir.path())?;
        assert_eq!(prophage.interval(), &interval);
        Ok((interval, prophage.resolution().clone()))
    }

    #[test]
    fn test_forward_overlap() -> Result<()> {
        let mut aligner = Precomputed::new();
        aligner
            .add_hits("p_L_extension", [hit("R1", 1, 500, 10, 50, 1e-20)])
            .add_hits("p_R_extension", [hit("R1", 480, 900, 1, 40, 1e-20)]);

        let (interval, resolution) = resolve(aligner)?;
        // 100 + 50 - 20, 300 - (50 - 1) + 20
        assert_eq!(interval, (130, 271));
        assert_eq!(
            resolution,
            Some(Resolution::Homology {
                reference: "R1".to_string(),
                overlap: 20
            })
        );
        Ok(())
    }

    #[test]
    fn test_reverse_overlap() -> Result<()> {
        let mut aligner = Precomputed::new();
        aligner
            .add_hits("p_L_extension", [hit("R1", 900, 400, 10, 50, 1e-20)])
            .add_hits("p_R_extension", [hit("R1", 420, 100, 1, 40, 1e-20)]);

        let (interval, _) = resolve(aligner)?;
        assert_eq!(interval, (130, 271));
        Ok(())
    }

    #[test]
    fn test_mixed_orientation_is_ignored() -> Result<()> {
        let mut aligner = Precomputed::new();
        aligner
            .add_hits("p_L_extension", [hit("R1", 1, 500, 10, 50, 1e-20)])
            .add_hits("p_R_extension", [hit("R1", 480, 100, 1, 40, 1e-20)]);

        let (interval, resolution) = resolve(aligner)?;
        assert_eq!(interval, (100, 300));
        assert_eq!(resolution, Some(Resolution::Unresolved));
        Ok(())
    }

    #[test]
    fn test_consensus_order() -> Result<()> {
        let mut aligner = Precomputed::new();
        aligner
            .add_hits(
                "p_L_extension",
                [
                    // Best combined e-value, but the overlap is too short
                    hit("R0", 1, 500, 10, 50, 1e-50),
                    // Resolves
                    hit("R1", 1, 500, 10, 48, 1e-20),
                    // Resolves as well, but ranks below R1
                    hit("R2", 1, 500, 10, 45, 1e-10),
                    // Only on the left flank
                    hit("R3", 1, 800, 1, 50, 0.0),
                ],
            )
            .add_hits(
                "p_R_extension",
                [
                    hit("R2", 490, 900, 3, 40, 1e-10),
                    hit("R0", 497, 900, 1, 40, 1e-50),
                    hit("R1", 480, 900, 1, 40, 1e-20),
                ],
            );

        let (interval, resolution) = resolve(aligner)?;
        assert_eq!(interval, (128, 271));
        assert_eq!(
            resolution,
            Some(Resolution::Homology {
                reference: "R1".to_string(),
                overlap: 20
            })
        );
        Ok(())
    }

    #[test]
    fn test_consensus_ties() {
        let mut left = ReferenceMap::default();
        let mut right = ReferenceMap::default();
        for name in ["Rb", "Rc", "Ra"] {
            left.insert(name.to_string(), hit(name, 1, 10, 1, 10, 0.5));
            right.insert(name.to_string(), hit(name, 5, 20, 1, 10, 0.5));
        }
        right.remove("Rc");

        let pairs = consensus(left, right);
        let order: Vec<&str> = pairs.iter().map(|x| x.0.subject().as_str()).collect();
        assert_eq!(order, vec!["Ra", "Rb"]);
    }

    #[test]
    fn test_unresolved() -> Result<()> {
        let (interval, resolution) = resolve(Precomputed::new())?;
        assert_eq!(interval, (100, 300));
        assert_eq!(resolution, Some(Resolution::Unresolved));
        Ok(())
    }

    #[test]
    fn test_malformed_candidates() -> Result<()> {
        let contig = contig();
        let workdir = tempfile::tempdir()?;
        let resolver = resolver(Precomputed::new());

        // Shorter than the extension
        let mut short = Prophage::new(&contig, "short", Interval::new(100, 140)?);
        assert!(resolver.resolve(&mut short, workdir.path()).is_err());
        assert_eq!(short.resolution(), &None);

        // Outside of the contig
        let mut outside = Prophage::new(&contig, "outside", Interval::new(300, 401)?);
        assert!(resolver.resolve(&mut outside, workdir.path()).is_err());
        assert_eq!(outside.interval(), &(300, 401));

        let mut config = Config::new();
        config.set_extension(0);
        assert!(Resolver::new(config, Precomputed::new(), "refs").is_err());
        Ok(())
    }
}
