//! Patterns: ordered sequences of primitive operations, and full runs.
//!
//! A run casts on, works every operation in order and resolves the result.
//! The first failing operation aborts the run; nothing partial is returned.
//!
//! # Example
//!
//! ```
//! use knitgraph::prelude::*;
//!
//! // Two rows of two stitches on straight needles.
//! let pattern = Pattern::new().plain(2).reverse(2);
//! let fabric = run(2, NeedleKind::TwoSided, &pattern).unwrap();
//! assert_eq!(fabric.len(), 6);
//! assert_eq!(fabric.foundation_count(), 2);
//! ```

use crate::config::RunConfig;
use crate::core::{Fabric, StitchId};
use crate::error::KnitError;
use crate::knitter::Knitter;
use crate::needle::{Needle, NeedleKind};
use crate::operations::{plain_stitch, reverse_stitch};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A primitive stitch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// See [`plain_stitch`].
    Plain,
    /// See [`reverse_stitch`].
    Reverse,
}

impl Op {
    /// Applies this operation to `knitter`.
    pub fn apply<N: Needle>(self, knitter: &mut Knitter<N>) -> Result<StitchId, KnitError> {
        match self {
            Op::Plain => plain_stitch(knitter),
            Op::Reverse => reverse_stitch(knitter),
        }
    }
}

/// An ordered sequence of operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    ops: Vec<Op>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Creates a pattern from a list of operations.
    pub fn from_ops(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Appends `count` plain stitches.
    pub fn plain(self, count: usize) -> Self {
        self.push_n(Op::Plain, count)
    }

    /// Appends `count` reverse stitches.
    pub fn reverse(self, count: usize) -> Self {
        self.push_n(Op::Reverse, count)
    }

    /// Appends all operations of `other`.
    pub fn then(mut self, other: &Pattern) -> Self {
        self.ops.extend_from_slice(&other.ops);
        self
    }

    /// Repeats this pattern `times` times end to end.
    pub fn repeat(&self, times: usize) -> Self {
        if self.ops.is_empty() {
            return Self::new();
        }
        let ops = std::iter::repeat(&self.ops)
            .take(times)
            .flatten()
            .copied()
            .collect();
        Self { ops }
    }

    /// Returns the operations in order.
    #[inline]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of operations.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Checks whether the pattern has no operations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Works every operation on `knitter`, stopping at the first failure.
    ///
    /// On failure the knitter holds whatever was formed before the failing
    /// operation; callers treat it as spent.
    pub fn execute<N: Needle>(&self, knitter: &mut Knitter<N>) -> Result<(), KnitError> {
        for (step, op) in self.ops.iter().enumerate() {
            if let Err(e) = op.apply(knitter) {
                debug!(step, ?op, error = %e, "pattern aborted");
                return Err(e);
            }
        }
        Ok(())
    }

    fn push_n(mut self, op: Op, count: usize) -> Self {
        self.ops.extend(std::iter::repeat(op).take(count));
        self
    }
}

impl FromIterator<Op> for Pattern {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// Casts on `cast_on` stitches onto a needle of `kind`, works `pattern` and
/// resolves the result.
pub fn run(cast_on: usize, kind: NeedleKind, pattern: &Pattern) -> Result<Fabric, KnitError> {
    debug!(cast_on, ?kind, ops = pattern.len(), "starting run");
    let mut knitter = Knitter::with_kind(cast_on, kind);
    pattern.execute(&mut knitter)?;
    let fabric = knitter.finish()?;
    debug!(stitches = fabric.len(), "run finished");
    Ok(fabric)
}

/// Like [`run`], taking cast-on count and needle kind from `config`.
pub fn run_with_config(config: &RunConfig, pattern: &Pattern) -> Result<Fabric, KnitError> {
    run(config.cast_on, config.needle, pattern)
}
