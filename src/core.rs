//! Core data structures: orientation, stitch records and fabrics.
//!
//! A stitch is an ordered list of references to the loops it was drawn
//! through, each tagged with the side of the work it was formed from. The
//! reference type is generic: while a pattern runs stitches point at
//! permanent [`StitchId`]s, and once resolved they point backward by
//! [`Offset`].

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Which side of the work faces the knitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Right side up.
    Face,
    /// Wrong side up.
    Back,
}

impl Orientation {
    /// Returns the opposite side. Flipping twice is the identity.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Orientation::Face => Orientation::Back,
            Orientation::Back => Orientation::Face,
        }
    }
}

/// Permanent identity of a stitch within one pattern run.
///
/// Identities are handed out in strictly increasing order by the
/// [`Knitter`](crate::knitter::Knitter) and are never reused.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StitchId(u64);

impl StitchId {
    /// Creates a `StitchId` from a raw `u64`.
    ///
    /// Intended for hand-built working fabrics; knitting operations allocate
    /// identities themselves.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` representation.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StitchId({})", self.0)
    }
}

/// Backward distance from a stitch to one of its predecessors in a [`Fabric`].
///
/// `Offset(0)` is the stitch immediately before the referencing one.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offset(pub usize);

impl Offset {
    /// Returns the raw distance.
    #[inline]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// A stitch: the loops it was drawn through, in the order they were entered.
///
/// No validation happens at construction; references are only checked when
/// a working fabric is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stitch<R> {
    refs: Vec<(R, Orientation)>,
}

impl<R> Stitch<R> {
    /// Creates a stitch from its reference list.
    #[inline]
    pub fn new(refs: Vec<(R, Orientation)>) -> Self {
        Self { refs }
    }

    /// Creates a foundation stitch (no predecessor).
    #[inline]
    pub fn foundation() -> Self {
        Self { refs: Vec::new() }
    }

    /// Creates a stitch drawn through a single loop.
    #[inline]
    pub fn through(reference: R, orientation: Orientation) -> Self {
        Self {
            refs: vec![(reference, orientation)],
        }
    }

    /// Returns the references in entry order.
    #[inline]
    pub fn refs(&self) -> &[(R, Orientation)] {
        &self.refs
    }

    /// Checks whether this is a foundation stitch.
    #[inline]
    pub fn is_foundation(&self) -> bool {
        self.refs.is_empty()
    }

    /// Rewrites every reference through `f`, keeping order and orientation.
    pub fn map<T>(&self, mut f: impl FnMut(&R) -> T) -> Stitch<T> {
        Stitch {
            refs: self.refs.iter().map(|(r, o)| (f(r), *o)).collect(),
        }
    }

    /// Rewrites every reference through a fallible translation.
    ///
    /// Stops at the first reference `f` rejects; the partial rewrite is
    /// discarded.
    pub fn try_map<T, E>(&self, mut f: impl FnMut(&R) -> Result<T, E>) -> Result<Stitch<T>, E> {
        let mut refs = Vec::with_capacity(self.refs.len());
        for (r, o) in &self.refs {
            refs.push((f(r)?, *o));
        }
        Ok(Stitch { refs })
    }
}

/// A finished fabric: stitches in creation order, referencing backward by offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fabric {
    stitches: Vec<Stitch<Offset>>,
}

impl Fabric {
    /// Wraps stitches already in creation order.
    ///
    /// Offsets are not checked here; the resolver is the intended producer.
    pub fn from_stitches(stitches: Vec<Stitch<Offset>>) -> Self {
        Self { stitches }
    }

    /// Number of stitches.
    #[inline]
    pub fn len(&self) -> usize {
        self.stitches.len()
    }

    /// Checks whether the fabric has no stitches at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stitches.is_empty()
    }

    /// Stitch at `position`, if any.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&Stitch<Offset>> {
        self.stitches.get(position)
    }

    /// Iterates stitches in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Stitch<Offset>> {
        self.stitches.iter()
    }

    /// Returns the stitches as a slice.
    #[inline]
    pub fn stitches(&self) -> &[Stitch<Offset>] {
        &self.stitches
    }

    /// Number of foundation stitches.
    pub fn foundation_count(&self) -> usize {
        self.stitches.iter().filter(|s| s.is_foundation()).count()
    }

    /// Absolute positions of the loops the stitch at `position` was drawn through.
    ///
    /// Returns `None` if `position` is out of range or an offset reaches past
    /// the start of the fabric.
    pub fn predecessors(&self, position: usize) -> Option<Vec<(usize, Orientation)>> {
        let stitch = self.stitches.get(position)?;
        stitch
            .refs()
            .iter()
            .map(|(offset, o)| {
                position
                    .checked_sub(offset.get())
                    .and_then(|p| p.checked_sub(1))
                    .map(|abs| (abs, *o))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Fabric {
    type Item = &'a Stitch<Offset>;
    type IntoIter = std::slice::Iter<'a, Stitch<Offset>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stitches.iter()
    }
}

/// The in-progress fabric of a run, most recently created stitch first.
///
/// # Invariants
/// - Built by the knitter, identities strictly decrease from front to back.
/// - Only ever grows during a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkingFabric {
    entries: VecDeque<(StitchId, Stitch<StitchId>)>,
}

impl WorkingFabric {
    /// Creates an empty working fabric.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Builds a working fabric from entries listed newest first.
    ///
    /// Nothing is validated; malformed input surfaces when resolving.
    pub fn from_newest_first(entries: Vec<(StitchId, Stitch<StitchId>)>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Records a newly created stitch in front of all older ones.
    #[inline]
    pub fn push_front(&mut self, id: StitchId, stitch: Stitch<StitchId>) {
        self.entries.push_front((id, stitch));
    }

    /// Number of recorded stitches.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &(StitchId, Stitch<StitchId>)> {
        self.entries.iter()
    }

    /// Looks up a stitch by identity.
    pub fn get(&self, id: StitchId) -> Option<&Stitch<StitchId>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, stitch)| stitch)
    }

    /// Entries strictly older than the one at `position` (newest first).
    pub(crate) fn window(&self, position: usize) -> impl Iterator<Item = &(StitchId, Stitch<StitchId>)> {
        self.entries.iter().skip(position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_is_involutive() {
        for o in [Orientation::Face, Orientation::Back] {
            assert_ne!(o.flip(), o);
            assert_eq!(o.flip().flip(), o);
        }
    }

    #[test]
    fn try_map_aborts_on_first_failure() {
        let stitch = Stitch::new(vec![
            (StitchId::new(1), Orientation::Face),
            (StitchId::new(7), Orientation::Back),
            (StitchId::new(2), Orientation::Face),
        ]);
        let mut seen = Vec::new();
        let result: Result<Stitch<u64>, StitchId> = stitch.try_map(|id| {
            seen.push(*id);
            if id.as_u64() < 5 {
                Ok(id.as_u64())
            } else {
                Err(*id)
            }
        });
        assert_eq!(result, Err(StitchId::new(7)));
        // The third reference is never visited.
        assert_eq!(seen, vec![StitchId::new(1), StitchId::new(7)]);
    }

    #[test]
    fn map_preserves_order_and_orientation() {
        let stitch = Stitch::new(vec![
            (StitchId::new(3), Orientation::Back),
            (StitchId::new(1), Orientation::Face),
        ]);
        let mapped = stitch.map(|id| id.as_u64() * 10);
        assert_eq!(
            mapped.refs(),
            &[(30, Orientation::Back), (10, Orientation::Face)]
        );
    }

    #[test]
    fn predecessors_are_absolute_positions() {
        let fabric = Fabric::from_stitches(vec![
            Stitch::foundation(),
            Stitch::foundation(),
            Stitch::new(vec![(Offset(0), Orientation::Face), (Offset(1), Orientation::Back)]),
        ]);
        assert_eq!(fabric.foundation_count(), 2);
        assert_eq!(
            fabric.predecessors(2),
            Some(vec![(1, Orientation::Face), (0, Orientation::Back)])
        );
        assert_eq!(fabric.predecessors(0), Some(vec![]));
        assert_eq!(fabric.predecessors(3), None);
    }

    #[test]
    fn predecessors_reject_offsets_past_the_start() {
        let fabric = Fabric::from_stitches(vec![Stitch::through(Offset(0), Orientation::Face)]);
        assert_eq!(fabric.predecessors(0), None);
    }

    #[test]
    fn predecessors_reject_huge_offsets() {
        let fabric = Fabric::from_stitches(vec![
            Stitch::foundation(),
            Stitch::through(Offset(usize::MAX), Orientation::Face),
        ]);
        assert_eq!(fabric.predecessors(1), None);
    }

    #[test]
    fn working_fabric_is_newest_first() {
        let mut wf = WorkingFabric::new();
        wf.push_front(StitchId::new(0), Stitch::foundation());
        wf.push_front(StitchId::new(1), Stitch::through(StitchId::new(0), Orientation::Face));
        let ids: Vec<_> = wf.iter().map(|(id, _)| id.as_u64()).collect();
        assert_eq!(ids, vec![1, 0]);
        assert!(wf.get(StitchId::new(1)).is_some());
        assert!(wf.get(StitchId::new(2)).is_none());
        let window: Vec<_> = wf.window(0).map(|(id, _)| id.as_u64()).collect();
        assert_eq!(window, vec![0]);
    }
}
