use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::stitching::StitchMethod;

/// Stitching settings, read from a TOML file and overridden by CLI flags.
///
/// ```toml
/// method = "offset"
/// offset = 12.5
/// sort_scans = true
/// excitation_wavelength = 532.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StitchConfig {
    /// Pairwise strategy used for every fold step.
    pub method: StitchMethod,
    /// Constant added to later scans (offset method only).
    pub offset: Option<f64>,
    /// Sort scans by their first wavelength before stitching.
    pub sort_scans: bool,
    /// Convert the result to Raman shift against this laser line (nm).
    pub excitation_wavelength: Option<f64>,
}

impl StitchConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing stitch configuration")
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = StitchConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, StitchConfig::default());
        assert_eq!(cfg.method, StitchMethod::Simple);
    }

    #[test]
    fn full_document() {
        let cfg = StitchConfig::from_toml_str(
            r#"
            method = "weighted-average"
            offset = 0.5
            sort_scans = true
            excitation_wavelength = 785.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.method, StitchMethod::WeightedAverage);
        assert_eq!(cfg.offset, Some(0.5));
        assert!(cfg.sort_scans);
        assert_eq!(cfg.excitation_wavelength, Some(785.0));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(StitchConfig::from_toml_str("methd = \"simple\"").is_err());
    }
}
