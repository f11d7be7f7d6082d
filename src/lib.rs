//! Knitgraph: a combinatorial simulator of knitted fabric construction.
//!
//! Stitches are formed by drawing new loops through previously formed ones.
//! This crate tracks that process through the live loops on a needle and
//! produces a finished dependency graph, a [`Fabric`], describing which loops
//! each stitch was drawn through and from which side of the work.
//!
//! The pieces, leaves first:
//! - [`core`]: orientation, stitch records, working and finished fabrics.
//! - [`needle`]: straight (two-sided) and circular needles.
//! - [`knitter`]: the state of one run; hands out permanent stitch identities.
//! - [`operations`]: the plain and reverse stitch primitives.
//! - [`resolve`]: rewrites identities into backward offsets.
//! - [`pattern`]: sequences of operations and full runs.
//!
//! # Example
//!
//! ```
//! use knitgraph::prelude::*;
//!
//! let mut knitter = Knitter::with_kind(1, NeedleKind::TwoSided);
//! plain_stitch(&mut knitter).unwrap();
//! let fabric = knitter.finish().unwrap();
//!
//! // The lone cast-on stitch is picked up after turning the work.
//! assert_eq!(fabric.len(), 2);
//! assert_eq!(fabric.get(1).unwrap().refs(), &[(Offset(0), Orientation::Back)]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod fingerprint;
pub mod knitter;
pub mod needle;
pub mod operations;
pub mod pattern;
pub mod resolve;

pub use crate::config::RunConfig;
pub use crate::core::{Fabric, Offset, Orientation, Stitch, StitchId, WorkingFabric};
pub use crate::error::KnitError;
pub use crate::knitter::Knitter;
pub use crate::needle::{AnyNeedle, Circular, Needle, NeedleKind, TwoSided};
pub use crate::pattern::{run, Op, Pattern};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::core::{Fabric, Offset, Orientation, Stitch, StitchId, WorkingFabric};
    pub use crate::error::KnitError;
    pub use crate::fingerprint::{Canonicalizable, HashValue};
    pub use crate::knitter::Knitter;
    pub use crate::needle::{AnyNeedle, Circular, Needle, NeedleKind, TwoSided};
    pub use crate::operations::{plain_stitch, reverse_stitch};
    pub use crate::pattern::{run, run_with_config, Op, Pattern};
    pub use crate::resolve::resolve;
}
