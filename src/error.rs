//! Error type shared by needle operations, the resolver and pattern runs.
//!
//! Both failure kinds are terminal for the run in which they occur: there is
//! no partial-success mode, a failing run yields no fabric at all.

use crate::core::StitchId;
use thiserror::Error;

/// Failure of a knitting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KnitError {
    /// A stitch was requested but neither side of the needle holds a live loop.
    #[error("needle exhausted: no live stitch on either side")]
    NeedleExhausted,
    /// A recorded reference does not name any stitch created before its owner.
    ///
    /// Self references, forward references and dangling references all land
    /// here without further distinction.
    #[error("stitch {stitch} references {reference}, which is not among its predecessors")]
    Unresolved {
        /// Stitch carrying the bad reference.
        stitch: StitchId,
        /// The reference that could not be resolved.
        reference: StitchId,
    },
}
