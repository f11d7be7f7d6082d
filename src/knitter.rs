//! The knitter: working fabric, needle and identity counter of one run.

use crate::core::{Fabric, Orientation, Stitch, StitchId, WorkingFabric};
use crate::error::KnitError;
use crate::needle::{AnyNeedle, Needle, NeedleKind};
use crate::resolve::resolve;

/// Mutable state threaded through a pattern run.
///
/// # Invariants
/// - Identities are allocated in strictly increasing order, starting at 0.
/// - Every allocated identity is recorded exactly once in the working fabric.
#[derive(Debug, Clone)]
pub struct Knitter<N = AnyNeedle> {
    fabric: WorkingFabric,
    needle: N,
    /// Next identity to hand out; one past the running maximum.
    next_id: u64,
}

impl<N: Needle> Knitter<N> {
    /// Casts `count` foundation stitches onto `needle`.
    ///
    /// Identities `0..count` are pushed in ascending order, so the last one
    /// cast on sits nearest the working tip.
    pub fn initialize(count: usize, mut needle: N) -> Self {
        let mut fabric = WorkingFabric::new();
        let mut next_id = 0;
        for _ in 0..count {
            let id = StitchId::new(next_id);
            next_id += 1;
            needle.push_right(id);
            fabric.push_front(id, Stitch::foundation());
        }
        Self {
            fabric,
            needle,
            next_id,
        }
    }

    /// Returns the working fabric, newest stitch first.
    #[inline]
    pub fn working_fabric(&self) -> &WorkingFabric {
        &self.fabric
    }

    /// Returns the needle.
    #[inline]
    pub fn needle(&self) -> &N {
        &self.needle
    }

    /// Largest identity allocated so far, `None` before any stitch exists.
    #[inline]
    pub fn max_id(&self) -> Option<StitchId> {
        self.next_id.checked_sub(1).map(StitchId::new)
    }

    /// Number of live stitches on the needle.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.needle.live_count()
    }

    /// Side of the work currently facing the knitter.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.needle.orientation()
    }

    /// Resolves the working fabric into a finished [`Fabric`].
    pub fn finish(&self) -> Result<Fabric, KnitError> {
        resolve(&self.fabric)
    }

    pub(crate) fn needle_mut(&mut self) -> &mut N {
        &mut self.needle
    }

    /// Allocates a fresh identity.
    pub(crate) fn fresh_id(&mut self) -> StitchId {
        let id = StitchId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Records a stitch without validation.
    pub(crate) fn record_raw(&mut self, id: StitchId, stitch: Stitch<StitchId>) {
        self.fabric.push_front(id, stitch);
    }
}

impl Knitter<AnyNeedle> {
    /// Casts `count` foundation stitches onto an empty needle of `kind`.
    pub fn with_kind(count: usize, kind: NeedleKind) -> Self {
        Self::initialize(count, AnyNeedle::new(kind))
    }
}
