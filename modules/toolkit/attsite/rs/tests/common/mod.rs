#![allow(dead_code)]

use prophi_core_rs::genome::{Contig, Feature, FeatureKind, Qualifiers};
use prophi_core_rs::loc::{Interval, IntervalOp, Strand};
use prophi_io_rs::tabular::Hit;

pub const MOTIF: &[u8] = b"ACGTTG";

/// Deterministic two-letter sequences (xorshift64). A/C and G/T backgrounds share no k-mers.
pub struct Background(u64);

impl Default for Background {
    fn default() -> Self {
        Self(0x9E3779B97F4A7C15)
    }
}

impl Background {
    pub fn take(&mut self, alphabet: &[u8; 2], len: usize) -> Vec<u8> {
        (0..len)
            .map(|_| {
                self.0 ^= self.0 << 13;
                self.0 ^= self.0 >> 7;
                self.0 ^= self.0 << 17;
                alphabet[((self.0 >> 32) & 1) as usize]
            })
            .collect()
    }
}

/// A/C sequence up to `switch`, G/T sequence after it, with the motif inserted at given positions.
pub fn sequence(len: usize, switch: usize, motifs: &[usize]) -> Vec<u8> {
    let mut background = Background::default();
    let mut seq = background.take(b"AC", switch);
    seq.extend(background.take(b"GT", len - switch));
    for &pos in motifs {
        seq[pos..pos + MOTIF.len()].copy_from_slice(MOTIF);
    }
    seq
}

pub fn hit(subject: &str, sstart: usize, send: usize, qstart: usize, qend: usize, evalue: f64) -> Hit {
    Hit::new(subject.to_string(), sstart, send, qstart, qend, evalue)
}

/// 50kb contig with sparse long genes and one 8kb island of short, tightly packed genes at
/// 20000..28000.
pub fn dense_island(seq: Vec<u8>) -> Contig {
    let mut features = Vec::new();
    for start in (1_000..50_000).step_by(5_000) {
        if !(18_000..30_000).contains(&start) {
            features.push(gene(start, start + 1_500));
        }
    }
    for start in (20_000..28_000).step_by(250) {
        features.push(gene(start, start + 200));
    }
    features.sort_by_key(|x| x.interval().start());
    Contig::new("NC_TEST.1", seq, features).unwrap()
}

fn gene(start: usize, end: usize) -> Feature {
    Feature::new(
        Interval::new(start, end).unwrap(),
        Strand::Forward,
        FeatureKind::Cds,
        Qualifiers::default(),
    )
}
