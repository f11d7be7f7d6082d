//! Primitive stitch-forming operations.
//!
//! Each operation picks up the next live loop, draws a new loop through it
//! and leaves the new loop on the far side of the needle. The only difference
//! between the two is which side of the work the new loop is pulled towards.

use crate::core::{Stitch, StitchId};
use crate::error::KnitError;
use crate::knitter::Knitter;
use crate::needle::Needle;
use tracing::trace;

/// Forms a plain stitch through the next live loop.
///
/// The new stitch is tagged with the orientation facing the knitter.
/// Returns the identity of the new stitch.
pub fn plain_stitch<N: Needle>(knitter: &mut Knitter<N>) -> Result<StitchId, KnitError> {
    form_stitch(knitter, false)
}

/// Forms a reverse stitch through the next live loop.
///
/// Identical to [`plain_stitch`] except that the recorded orientation is
/// flipped.
pub fn reverse_stitch<N: Needle>(knitter: &mut Knitter<N>) -> Result<StitchId, KnitError> {
    form_stitch(knitter, true)
}

fn form_stitch<N: Needle>(knitter: &mut Knitter<N>, reverse: bool) -> Result<StitchId, KnitError> {
    let source = knitter.needle_mut().pop_left()?;
    // Read after the pop: a turn that just happened decides the side.
    let facing = knitter.orientation();
    let orientation = if reverse { facing.flip() } else { facing };
    let id = knitter.fresh_id();
    trace!(%id, %source, ?orientation, reverse, "formed stitch");
    knitter.record_raw(id, Stitch::through(source, orientation));
    knitter.needle_mut().push_right(id);
    Ok(id)
}
