use std::cmp::Reverse;

use ahash::HashMap;
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};

use prophi_core_rs::loc::{Interval, IntervalOp};

/// Exact match shared by the left and the right flanking windows. Both intervals are local to
/// their windows and have the same length.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Dissolve, Getters)]
pub struct Anchor {
    left: Interval<usize>,
    right: Interval<usize>,
}

impl Anchor {
    pub fn new(left: usize, right: usize, len: usize) -> Option<Self> {
        Some(Self {
            left: Interval::new(left, left.checked_add(len)?).ok()?,
            right: Interval::new(right, right.checked_add(len)?).ok()?,
        })
    }

    /// Length of the match.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.left.len()
    }
}

/// Longest exact match of at least `k` bases between `left` and `right`.
///
/// Every k-mer of `right` is indexed, then each left k-mer hit that can't be extended to the left
/// is extended to the right as far as the sequences agree. Among matches of equal length the one
/// closest to the origins wins (`|left start - l_origin| + |right start - r_origin|`), remaining
/// ties go to the smallest left start and then to the smallest right start. Comparison is ASCII
/// case-insensitive.
///
/// Returns None if `k == 0`, if any sequence is shorter than `k` or if there is no shared k-mer.
pub fn find_anchor(
    left: &[u8],
    right: &[u8],
    l_origin: usize,
    r_origin: usize,
    k: usize,
) -> Option<Anchor> {
    if k == 0 || left.len() < k || right.len() < k {
        return None;
    }
    let (left, right) = (left.to_ascii_uppercase(), right.to_ascii_uppercase());

    let mut index: HashMap<&[u8], Vec<usize>> = HashMap::default();
    for (j, kmer) in right.windows(k).enumerate() {
        index.entry(kmer).or_default().push(j);
    }

    let mut best: Option<(Reverse<usize>, usize, usize, usize)> = None;
    for (i, kmer) in left.windows(k).enumerate() {
        let Some(hits) = index.get(kmer) else {
            continue;
        };
        for &j in hits {
            // Not left-maximal, the same match was already seen from an earlier position
            if i > 0 && j > 0 && left[i - 1] == right[j - 1] {
                continue;
            }
            let len = k + left[i + k..]
                .iter()
                .zip(&right[j + k..])
                .take_while(|(a, b)| a == b)
                .count();
            let key = (
                Reverse(len),
                i.abs_diff(l_origin) + j.abs_diff(r_origin),
                i,
                j,
            );
            if best.is_none_or(|x| key < x) {
                best = Some(key);
            }
        }
    }

    let (Reverse(len), _, i, j) = best?;
    Anchor::new(i, j, len)
}
