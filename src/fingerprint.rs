//! Deterministic content hashing of finished fabrics.
//!
//! Hashes are SHA-256 over a canonical byte encoding with domain separation
//! and length prefixing, so equal fabrics hash equally across builds and
//! platforms.

use crate::core::{Fabric, Offset, Orientation, Stitch};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A 256-bit hash value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    /// Creates a zero hash (all zeros).
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns the raw byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of `data` with domain separation.
    ///
    /// Hashed input is `b"KNIT:" || domain || b":v1" || len(data) as u64 LE || data`.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"KNIT:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 4 bytes are enough to tell hashes apart at a glance.
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Types with a deterministic canonical byte encoding.
pub trait Canonicalizable {
    /// Serialize to canonical byte representation.
    fn to_canonical_bytes(&self) -> Vec<u8>;

    /// Compute domain-separated hash of canonical bytes.
    fn fingerprint_with_domain(&self, domain: &[u8]) -> HashValue {
        HashValue::hash_with_domain(domain, &self.to_canonical_bytes())
    }
}

fn orientation_byte(o: Orientation) -> u8 {
    match o {
        Orientation::Face => 0,
        Orientation::Back => 1,
    }
}

impl Canonicalizable for Stitch<Offset> {
    /// `ref_count u64 LE`, then per reference `offset u64 LE || orientation u8`.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.refs().len() * 9);
        out.extend_from_slice(&(self.refs().len() as u64).to_le_bytes());
        for (offset, o) in self.refs() {
            out.extend_from_slice(&(offset.get() as u64).to_le_bytes());
            out.push(orientation_byte(*o));
        }
        out
    }
}

impl Canonicalizable for Fabric {
    /// `stitch_count u64 LE` followed by each stitch's canonical bytes in order.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        for stitch in self {
            out.extend_from_slice(&stitch.to_canonical_bytes());
        }
        out
    }
}

impl Fabric {
    /// Content hash of this fabric.
    pub fn fingerprint(&self) -> HashValue {
        self.fingerprint_with_domain(b"FABRIC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::needle::NeedleKind;
    use crate::pattern::{run, Pattern};

    #[test]
    fn domain_separates() {
        let a = HashValue::hash_with_domain(b"A", b"data");
        let b = HashValue::hash_with_domain(b"B", b"data");
        assert_ne!(a, b);
        assert_eq!(a, HashValue::hash_with_domain(b"A", b"data"));
    }

    #[test]
    fn same_run_same_fingerprint() {
        let pattern = Pattern::new().plain(4).reverse(4);
        let a = run(4, NeedleKind::TwoSided, &pattern).unwrap();
        let b = run(4, NeedleKind::TwoSided, &pattern).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn needle_kind_changes_fingerprint() {
        let pattern = Pattern::new().plain(4);
        let flat = run(2, NeedleKind::TwoSided, &pattern).unwrap();
        let round = run(2, NeedleKind::Circular, &pattern).unwrap();
        assert_ne!(flat.fingerprint(), round.fingerprint());
    }

    #[test]
    fn orientation_is_hashed() {
        let face = Fabric::from_stitches(vec![
            Stitch::foundation(),
            Stitch::through(Offset(0), Orientation::Face),
        ]);
        let back = Fabric::from_stitches(vec![
            Stitch::foundation(),
            Stitch::through(Offset(0), Orientation::Back),
        ]);
        assert_ne!(face.fingerprint(), back.fingerprint());
    }

    #[test]
    fn display_is_abbreviated() {
        let shown = HashValue::zero().to_string();
        assert_eq!(shown, "HashValue(00000000…)");
    }
}
