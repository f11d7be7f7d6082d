//! Run configuration.
//!
//! Stored as CBOR; missing fields fall back to their defaults.

use crate::needle::NeedleKind;
use serde::{Deserialize, Serialize};

/// How a run is set up before the pattern is worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of foundation stitches cast on.
    pub cast_on: usize,
    /// Needle to knit on.
    pub needle: NeedleKind,
}

impl RunConfig {
    /// Creates a configuration.
    pub fn new(cast_on: usize, needle: NeedleKind) -> Self {
        Self { cast_on, needle }
    }

    /// Serializes the configuration to CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let bytes = serde_cbor::to_vec(self)?;
        Ok(bytes)
    }

    /// Deserializes a configuration from CBOR bytes.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_cbor::from_slice(bytes)?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = self.to_cbor()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a configuration from a file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        Self::from_cbor(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn defaults_to_flat_knitting_with_nothing_cast_on() {
        let config = RunConfig::default();
        assert_eq!(config.cast_on, 0);
        assert_eq!(config.needle, NeedleKind::TwoSided);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut partial = BTreeMap::new();
        partial.insert("cast_on", 12u64);
        let bytes = serde_cbor::to_vec(&partial).expect("encode map");
        let config = RunConfig::from_cbor(&bytes).expect("decode config");
        assert_eq!(config, RunConfig::new(12, NeedleKind::TwoSided));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.cbor");
        let config = RunConfig::new(24, NeedleKind::Circular);
        config.save_to_file(&path).expect("save");
        assert_eq!(RunConfig::load_from_file(&path).expect("load"), config);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(RunConfig::load_from_file(&dir.path().join("absent.cbor")).is_err());
    }
}
