//! Needles: where live (not yet worked) loops wait to be picked up.
//!
//! A needle hands out the next live stitch from its working side and accepts
//! newly formed stitches on the far side. Two kinds exist:
//! - [`TwoSided`]: a pair of straight needles. Running out of stitches on the
//!   left means the row is done; the work is turned, which flips the
//!   orientation and makes the right needle the new left one.
//! - [`Circular`]: a single loop of cable. Running out on the left tip means
//!   sliding the stitches round from the right tip; nothing is turned and the
//!   orientation is always [`Orientation::Face`].
//!
//! [`AnyNeedle`] chooses between the two at runtime.

use crate::core::{Orientation, StitchId};
use crate::error::KnitError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capability every needle provides.
pub trait Needle {
    /// Removes and returns the next live stitch from the working side.
    ///
    /// Fails with [`KnitError::NeedleExhausted`] only when both sides are empty.
    fn pop_left(&mut self) -> Result<StitchId, KnitError>;

    /// Places a newly formed stitch on the far side.
    fn push_right(&mut self, id: StitchId);

    /// Side of the work currently facing the knitter.
    fn orientation(&self) -> Orientation;

    /// Number of live stitches held on both sides.
    fn live_count(&self) -> usize;
}

/// Straight needles worked back and forth.
///
/// Each side is kept as a stack whose top (the tip of the needle) is the
/// last element of the `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoSided {
    left: Vec<StitchId>,
    right: Vec<StitchId>,
    orientation: Orientation,
}

impl TwoSided {
    /// Empty needles, right side facing.
    pub fn new() -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            orientation: Orientation::Face,
        }
    }

    /// Left needle, tip first.
    pub fn left(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.left.iter().rev().copied()
    }

    /// Right needle, tip first.
    pub fn right(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.right.iter().rev().copied()
    }
}

impl Default for TwoSided {
    fn default() -> Self {
        Self::new()
    }
}

impl Needle for TwoSided {
    fn pop_left(&mut self) -> Result<StitchId, KnitError> {
        if self.left.is_empty() {
            if self.right.is_empty() {
                return Err(KnitError::NeedleExhausted);
            }
            // Turning the work puts the right needle's tip on the left
            // without reordering the loops.
            self.orientation = self.orientation.flip();
            std::mem::swap(&mut self.left, &mut self.right);
            debug!(
                stitches = self.left.len(),
                orientation = ?self.orientation,
                "turned work"
            );
        }
        self.left.pop().ok_or(KnitError::NeedleExhausted)
    }

    fn push_right(&mut self, id: StitchId) {
        self.right.push(id);
    }

    #[inline]
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    fn live_count(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// Circular needle: two tips joined by a cable, worked in the round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Circular {
    left: Vec<StitchId>,
    right: Vec<StitchId>,
}

impl Circular {
    /// Empty needle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Left tip, tip first.
    pub fn left(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.left.iter().rev().copied()
    }

    /// Right tip, tip first.
    pub fn right(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.right.iter().rev().copied()
    }
}

impl Needle for Circular {
    fn pop_left(&mut self) -> Result<StitchId, KnitError> {
        if self.left.is_empty() {
            if self.right.is_empty() {
                return Err(KnitError::NeedleExhausted);
            }
            // Sliding round the cable brings the oldest loop to the left tip.
            std::mem::swap(&mut self.left, &mut self.right);
            self.left.reverse();
            debug!(stitches = self.left.len(), "slid stitches round the cable");
        }
        self.left.pop().ok_or(KnitError::NeedleExhausted)
    }

    fn push_right(&mut self, id: StitchId) {
        self.right.push(id);
    }

    #[inline]
    fn orientation(&self) -> Orientation {
        Orientation::Face
    }

    #[inline]
    fn live_count(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// Which kind of needle to knit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedleKind {
    /// Straight needles, flat knitting.
    #[default]
    TwoSided,
    /// Circular needle, knitting in the round.
    Circular,
}

/// Runtime choice between the two needle kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyNeedle {
    /// Straight needles.
    TwoSided(TwoSided),
    /// Circular needle.
    Circular(Circular),
}

impl AnyNeedle {
    /// Creates an empty needle of the given kind.
    pub fn new(kind: NeedleKind) -> Self {
        match kind {
            NeedleKind::TwoSided => AnyNeedle::TwoSided(TwoSided::new()),
            NeedleKind::Circular => AnyNeedle::Circular(Circular::new()),
        }
    }

    /// Returns the kind of this needle.
    pub fn kind(&self) -> NeedleKind {
        match self {
            AnyNeedle::TwoSided(_) => NeedleKind::TwoSided,
            AnyNeedle::Circular(_) => NeedleKind::Circular,
        }
    }
}

impl From<NeedleKind> for AnyNeedle {
    fn from(kind: NeedleKind) -> Self {
        Self::new(kind)
    }
}

impl Needle for AnyNeedle {
    fn pop_left(&mut self) -> Result<StitchId, KnitError> {
        match self {
            AnyNeedle::TwoSided(n) => n.pop_left(),
            AnyNeedle::Circular(n) => n.pop_left(),
        }
    }

    fn push_right(&mut self, id: StitchId) {
        match self {
            AnyNeedle::TwoSided(n) => n.push_right(id),
            AnyNeedle::Circular(n) => n.push_right(id),
        }
    }

    fn orientation(&self) -> Orientation {
        match self {
            AnyNeedle::TwoSided(n) => n.orientation(),
            AnyNeedle::Circular(n) => n.orientation(),
        }
    }

    fn live_count(&self) -> usize {
        match self {
            AnyNeedle::TwoSided(n) => n.live_count(),
            AnyNeedle::Circular(n) => n.live_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<StitchId> {
        raw.iter().copied().map(StitchId::new).collect()
    }

    #[test]
    fn empty_needles_are_exhausted() {
        assert_eq!(TwoSided::new().pop_left(), Err(KnitError::NeedleExhausted));
        assert_eq!(Circular::new().pop_left(), Err(KnitError::NeedleExhausted));
    }

    #[test]
    fn exhaustion_does_not_turn_the_work() {
        let mut needle = TwoSided::new();
        assert!(needle.pop_left().is_err());
        assert_eq!(needle.orientation(), Orientation::Face);
    }

    #[test]
    fn two_sided_turns_without_reordering() {
        let mut needle = TwoSided::new();
        for id in ids(&[0, 1, 2]) {
            needle.push_right(id);
        }
        assert_eq!(needle.right().collect::<Vec<_>>(), ids(&[2, 1, 0]));
        assert_eq!(needle.orientation(), Orientation::Face);

        // Last stitch cast on is the first one worked after turning.
        assert_eq!(needle.pop_left(), Ok(StitchId::new(2)));
        assert_eq!(needle.orientation(), Orientation::Back);
        assert_eq!(needle.pop_left(), Ok(StitchId::new(1)));
        assert_eq!(needle.pop_left(), Ok(StitchId::new(0)));
        assert_eq!(needle.orientation(), Orientation::Back);
    }

    #[test]
    fn two_sided_flips_back_on_second_turn() {
        let mut needle = TwoSided::new();
        needle.push_right(StitchId::new(0));
        let first = needle.pop_left().unwrap();
        needle.push_right(first);
        assert_eq!(needle.orientation(), Orientation::Back);
        needle.pop_left().unwrap();
        assert_eq!(needle.orientation(), Orientation::Face);
    }

    #[test]
    fn circular_slides_oldest_first() {
        let mut needle = Circular::new();
        for id in ids(&[0, 1, 2]) {
            needle.push_right(id);
        }
        assert_eq!(needle.pop_left(), Ok(StitchId::new(0)));
        assert_eq!(needle.left().collect::<Vec<_>>(), ids(&[1, 2]));
        assert_eq!(needle.pop_left(), Ok(StitchId::new(1)));
        assert_eq!(needle.pop_left(), Ok(StitchId::new(2)));
        assert_eq!(needle.orientation(), Orientation::Face);
    }

    #[test]
    fn any_needle_dispatches_by_kind() {
        for kind in [NeedleKind::TwoSided, NeedleKind::Circular] {
            let mut needle = AnyNeedle::new(kind);
            assert_eq!(needle.kind(), kind);
            needle.push_right(StitchId::new(4));
            assert_eq!(needle.live_count(), 1);
            assert_eq!(needle.pop_left(), Ok(StitchId::new(4)));
            assert_eq!(needle.live_count(), 0);
        }
    }
}
