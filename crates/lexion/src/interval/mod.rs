//! # Character Interval Algebra
//!
//! Sets of characters represented as intervals of Unicode code points.
//!
//! ## Overview
//!
//! Character classes, automaton transition labels, and the determinizer's
//! alphabet refinement all operate on intervals rather than single
//! characters. Two representations are provided:
//!
//! - [`Interval`]: general bounds, each inclusive, exclusive, or unbounded.
//!   This is what character-class syntax and callers produce.
//! - [`ClassInterval`]: the canonical inclusive form `[lo, hi]` over raw code
//!   points. Automata store and compare these; [`Interval::to_inclusive`]
//!   bridges the two.
//!
//! All operations are total. Empty intervals are legal values and are
//! silently dropped by set-level operations.
//!
//! ## Usage
//!
//! ```rust
//! use lexion::interval::{ClassInterval, Interval, cover};
//!
//! let lower = Interval::closed('a', 'z');
//! assert!(lower.contains('m'));
//! assert!(!lower.contains('A'));
//!
//! // Refine overlapping intervals into a disjoint partition
//! let parts = cover(&[
//!     ClassInterval::of('a', 'z'),
//!     ClassInterval::of('a', 'f'),
//! ]);
//! assert_eq!(parts, vec![ClassInterval::of('a', 'f'), ClassInterval::of('g', 'z')]);
//! ```

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// The highest Unicode code point, `U+10FFFF`
pub const MAX_CODE_POINT: u32 = 0x0010_FFFF;

/// One endpoint of an [`Interval`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Bound {
    /// The endpoint character belongs to the interval
    Included(char),
    /// The endpoint character does not belong to the interval
    Excluded(char),
    /// No endpoint on this side
    Unbounded,
}

/// An interval of characters with general bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    #[must_use]
    pub const fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    /// The closed interval `[lo, hi]`
    #[must_use]
    pub const fn closed(lo: char, hi: char) -> Self {
        Self::new(Bound::Included(lo), Bound::Included(hi))
    }

    /// The interval containing exactly one character
    #[must_use]
    pub const fn single(c: char) -> Self {
        Self::closed(c, c)
    }

    /// The interval containing every character
    #[must_use]
    pub const fn full() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// Membership test
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        let above_lower = match self.lower {
            Bound::Included(l) => c >= l,
            Bound::Excluded(l) => c > l,
            Bound::Unbounded => true,
        };
        let below_upper = match self.upper {
            Bound::Included(u) => c <= u,
            Bound::Excluded(u) => c < u,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }

    /// Canonical inclusive form, or `None` when the interval is empty.
    ///
    /// Exclusive bounds are mapped to the adjacent code point: `(x, ...`
    /// becomes `[x+1, ...` and `..., x)` becomes `..., x-1]`.
    #[must_use]
    pub fn to_inclusive(&self) -> Option<ClassInterval> {
        let lo = match self.lower {
            Bound::Included(l) => l as u32,
            Bound::Excluded(l) => (l as u32).checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let hi = match self.upper {
            Bound::Included(u) => u as u32,
            Bound::Excluded(u) => (u as u32).checked_sub(1)?,
            Bound::Unbounded => MAX_CODE_POINT,
        };
        if lo <= hi && lo <= MAX_CODE_POINT {
            Some(ClassInterval::new(lo, hi.min(MAX_CODE_POINT)))
        } else {
            None
        }
    }

    /// The overlap of two intervals, or `None` when they are disjoint
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<ClassInterval> {
        let a = self.to_inclusive()?;
        let b = other.to_inclusive()?;
        a.intersection(&b)
    }

    /// Whether the union of the two intervals is a single interval
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        match (self.to_inclusive(), other.to_inclusive()) {
            (Some(a), Some(b)) => a.touches(&b),
            // An empty interval adds nothing to a union
            _ => true,
        }
    }
}

/// A canonical inclusive interval `[lo, hi]` of Unicode code points.
///
/// `lo > hi` encodes the empty interval; [`ClassInterval::EMPTY`] is the
/// canonical such value. The raw `u32` form deliberately covers the
/// surrogate gap so that interval arithmetic stays plain integer
/// arithmetic; membership tests take `char` and so can never observe a
/// surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ClassInterval {
    pub lo: u32,
    pub hi: u32,
}

impl ClassInterval {
    /// The canonical empty interval
    pub const EMPTY: Self = Self { lo: 1, hi: 0 };

    /// The interval of all code points
    pub const FULL: Self = Self {
        lo: 0,
        hi: MAX_CODE_POINT,
    };

    #[must_use]
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// The closed interval between two characters
    #[must_use]
    pub const fn of(lo: char, hi: char) -> Self {
        Self::new(lo as u32, hi as u32)
    }

    /// The interval containing exactly one character
    #[must_use]
    pub const fn single(c: char) -> Self {
        Self::of(c, c)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.contains_code_point(c as u32)
    }

    #[must_use]
    pub const fn contains_code_point(&self, cp: u32) -> bool {
        self.lo <= cp && cp <= self.hi
    }

    /// The overlap of two intervals, or `None` when they are disjoint
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let lo = self.lo.max(other.lo);
        let hi = self.hi.min(other.hi);
        (lo <= hi).then_some(Self::new(lo, hi))
    }

    /// Whether the union of the two intervals is a single interval
    /// (they overlap or are adjacent)
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        self.lo <= other.hi.saturating_add(1) && other.lo <= self.hi.saturating_add(1)
    }
}

impl fmt::Display for ClassInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{:#06x}, {:#06x}]", self.lo, self.hi)
        }
    }
}

/// Sort a set of intervals and merge every overlapping or adjacent pair,
/// dropping empty intervals. The result is the canonical form of the union.
#[must_use]
pub fn normalize(intervals: &[ClassInterval]) -> Vec<ClassInterval> {
    let mut sorted: Vec<ClassInterval> = intervals.iter().filter(|iv| !iv.is_empty()).copied().collect();
    sorted.sort_unstable();

    let mut merged: Vec<ClassInterval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = merged.last_mut()
            && last.touches(&iv)
        {
            last.hi = last.hi.max(iv.hi);
            continue;
        }
        merged.push(iv);
    }
    merged
}

/// The complement of a set of intervals against the full code point range
#[must_use]
pub fn complement(intervals: &[ClassInterval]) -> Vec<ClassInterval> {
    let normalized = normalize(intervals);
    let mut result = Vec::with_capacity(normalized.len() + 1);
    let mut next = 0u32;

    for iv in &normalized {
        if iv.lo > next {
            result.push(ClassInterval::new(next, iv.lo - 1));
        }
        match iv.hi.checked_add(1) {
            Some(n) => next = n,
            None => return result,
        }
        if next > MAX_CODE_POINT {
            return result;
        }
    }
    result.push(ClassInterval::new(next, MAX_CODE_POINT));
    result
}

/// The set difference `a \ b`
#[must_use]
pub fn difference(a: &[ClassInterval], b: &[ClassInterval]) -> Vec<ClassInterval> {
    let b_complement = complement(b);
    let mut result = Vec::new();
    for x in normalize(a) {
        for y in &b_complement {
            if let Some(overlap) = x.intersection(y) {
                result.push(overlap);
            }
        }
    }
    normalize(&result)
}

/// The finest partition of the union of `intervals` into pairwise-disjoint
/// parts such that every input interval is an exact union of parts.
///
/// Parts are returned sorted by lower bound. This is the alphabet refinement
/// the determinizer runs at every state: each part either lies entirely
/// inside an input interval or entirely outside it.
#[must_use]
pub fn cover(intervals: &[ClassInterval]) -> Vec<ClassInterval> {
    let mut boundaries: Vec<u32> = Vec::with_capacity(intervals.len() * 2);
    for iv in intervals {
        if iv.is_empty() {
            continue;
        }
        boundaries.push(iv.lo);
        // Half-open upper boundary, clamped so arithmetic stays in range
        boundaries.push(iv.hi.min(MAX_CODE_POINT) + 1);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut parts = Vec::with_capacity(boundaries.len());
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        let covered = intervals.iter().any(|iv| iv.contains_code_point(start));
        if covered {
            parts.push(ClassInterval::new(start, end - 1));
        }
    }
    parts
}
