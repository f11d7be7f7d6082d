//! Resolution of a working fabric into a finished [`Fabric`].
//!
//! Permanent identities are replaced by backward offsets. For the stitch at
//! some position in the newest-first working fabric, only stitches further
//! back in that list are eligible targets; a reference is rewritten to the
//! zero-based position of its target within that window.
//!
//! Linear scans make this `O(n·w·k)` for `n` stitches, window size `w` and
//! `k` references per stitch.

use crate::core::{Fabric, Offset, StitchId, WorkingFabric};
use crate::error::KnitError;
use tracing::debug;

/// Converts `working` into a fabric in creation order.
///
/// Fails with [`KnitError::Unresolved`] on the first reference that does not
/// name an older stitch. Nothing is dropped or truncated on failure.
pub fn resolve(working: &WorkingFabric) -> Result<Fabric, KnitError> {
    let mut stitches = Vec::with_capacity(working.len());
    for (position, (id, stitch)) in working.iter().enumerate() {
        let resolved = stitch.try_map(|reference| {
            offset_in_window(working, position, *reference).ok_or(KnitError::Unresolved {
                stitch: *id,
                reference: *reference,
            })
        });
        match resolved {
            Ok(s) => stitches.push(s),
            Err(e) => {
                debug!(error = %e, "resolution failed");
                return Err(e);
            }
        }
    }
    stitches.reverse();
    Ok(Fabric::from_stitches(stitches))
}

fn offset_in_window(working: &WorkingFabric, position: usize, target: StitchId) -> Option<Offset> {
    working
        .window(position)
        .position(|(id, _)| *id == target)
        .map(Offset)
}
