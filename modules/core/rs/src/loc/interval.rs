use std::fmt::{Debug, Display};

use crate::num::PrimInt;
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use eyre::{eyre, Result};
use impl_tools::autoimpl;

/// Interval is a half-open genomic region [start, end).
/// It's not represented as a Rust-native Range for a couple of reasons:
/// - Prohibit 'empty' intervals (start == end) or intervals with negative length (start > end)
/// - Implement custom traits (e.g. Dissolve) and methods (e.g. envelops, relocated, padded).
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Interval<Idx: PrimInt> {
    start: Idx,
    end: Idx,
}

/// Trait for types that can be generally viewed as half-open genomic intervals [start, end).
#[autoimpl(for <T: trait + ?Sized> &T)]
#[allow(clippy::len_without_is_empty)]
pub trait IntervalOp {
    type Idx: PrimInt;

    /// Start position of the interval-like object.
    fn start(&self) -> Self::Idx;

    /// End position of the interval-like object.
    fn end(&self) -> Self::Idx;

    /// Length of the interval-like object.
    fn len(&self) -> Self::Idx {
        self.end() - self.start()
    }

    /// Check if the interval-like object contains a given position.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check if the interval-like object fully covers another interval-like object.
    /// Shared boundaries are allowed, i.e. every interval envelops itself.
    fn envelops(&self, other: &Self) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Turn the interval-like object into a basic half-open genomic interval.
    fn as_interval(&self) -> Interval<Self::Idx> {
        Interval {
            start: self.start(),
            end: self.end(),
        }
    }
}

impl<T: PrimInt> IntervalOp for Interval<T> {
    type Idx = T;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.start
    }
    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.end
    }
}

impl<Idx: PrimInt> Interval<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(eyre!("Invalid interval: start >= end ({start:?} >= {end:?})"))
        }
    }

    /// Express the interval in the local frame of `frame`, i.e. shift it by `-frame.start`.
    /// Returns None if the interval is not enveloped by the frame.
    pub fn relocated(&self, frame: &Self) -> Option<Self> {
        if !frame.envelops(self) {
            return None;
        }
        Some(Self {
            start: self.start - frame.start,
            end: self.end - frame.start,
        })
    }

    /// Pad the interval by `left` and `right` positions and clamp the result to `bounds`.
    /// Returns None if nothing is left after clamping.
    pub fn padded(&self, left: Idx, right: Idx, bounds: &Self) -> Option<Self> {
        let start = match self.start.checked_sub(&left) {
            Some(start) => start.max(bounds.start),
            None => bounds.start,
        };
        let end = match self.end.checked_add(&right) {
            Some(end) => end.min(bounds.end),
            None => bounds.end,
        };
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl<Idx: PrimInt> Default for Interval<Idx> {
    fn default() -> Self {
        Self {
            start: Idx::zero(),
            end: Idx::one(),
        }
    }
}

impl<Idx: PrimInt + Display> Display for Interval<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<Idx: PrimInt> From<Interval<Idx>> for (Idx, Idx) {
    fn from(interval: Interval<Idx>) -> Self {
        (interval.start, interval.end)
    }
}

impl<Idx: PrimInt> PartialEq<(Idx, Idx)> for Interval<Idx> {
    fn eq(&self, other: &(Idx, Idx)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}
