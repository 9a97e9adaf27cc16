use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StitchError, StitchResult};

// ---------------------------------------------------------------------------
// Spectrum – paired wavelength / intensity sequences
// ---------------------------------------------------------------------------

/// A single spectrum: wavelengths `x` and their intensities `y`.
///
/// Raw spectra coming from a detector may be descending or contain repeated
/// wavelengths; the stitching strategies normalise their own copies and never
/// touch the caller's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Wavelength axis (x).
    pub x: Vec<f64>,
    /// Intensity axis (y) – same length as `x`.
    pub y: Vec<f64>,
}

impl Spectrum {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Spectrum { x, y }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Spectrum {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Number of samples (length of `x`).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the spectrum holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// First wavelength, if any.
    pub fn first_x(&self) -> Option<f64> {
        self.x.first().copied()
    }

    /// Last wavelength, if any.
    pub fn last_x(&self) -> Option<f64> {
        self.x.last().copied()
    }

    /// Check the input contract shared by every stitching strategy:
    /// at least one sample, `x`/`y` of equal length and finite wavelengths.
    pub fn validate(&self) -> StitchResult<()> {
        if self.x.is_empty() {
            return Err(StitchError::empty_input("spectrum has no wavelength samples"));
        }
        if self.x.len() != self.y.len() {
            return Err(StitchError::invalid_format(self.x.len(), self.y.len()));
        }
        if let Some((index, &value)) = self.x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StitchError::invalid_wavelength(index, value));
        }
        Ok(())
    }

    /// Iterate over `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Spectrum {
    fn from((x, y): (Vec<f64>, Vec<f64>)) -> Self {
        Spectrum { x, y }
    }
}

// ---------------------------------------------------------------------------
// MetadataValue – a single metadata cell attached to a scan
// ---------------------------------------------------------------------------

/// Loosely-typed metadata value read alongside a scan (grating, center
/// wavelength, exposure, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v:.4}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan / ScanList – the raw input of a stitching run
// ---------------------------------------------------------------------------

/// One acquired window of a range scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    pub spectrum: Spectrum,
    /// Dynamic metadata columns: column_name → value.
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl From<Spectrum> for Scan {
    fn from(spectrum: Spectrum) -> Self {
        Scan {
            spectrum,
            metadata: BTreeMap::new(),
        }
    }
}

/// One-line summary used in debug logs:
/// `12 samples, 400.0000..405.5000, center_wavelength=402.7500 grating=g2`.
impl fmt::Display for Scan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples", self.spectrum.len())?;
        let (lo, hi) = self
            .spectrum
            .x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo <= hi {
            write!(f, ", {lo:.4}..{hi:.4}")?;
        }
        for (i, (key, value)) in self.metadata.iter().enumerate() {
            let sep = if i == 0 { ", " } else { " " };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Ordered list of scans. Stitching follows list order, not wavelength
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanList {
    pub scans: Vec<Scan>,
}

impl ScanList {
    pub fn new(scans: Vec<Scan>) -> Self {
        ScanList { scans }
    }

    /// Number of scans.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Whether the list holds no scans.
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Append all scans of `other`, keeping order.
    pub fn extend(&mut self, other: ScanList) {
        self.scans.extend(other.scans);
    }

    /// Sort scans by the smallest wavelength they contain (stable, NaN-safe).
    ///
    /// Detectors may report a window in descending order, so the minimum is
    /// used rather than the first element.
    pub fn sort_by_start_wavelength(&mut self) {
        self.scans.sort_by(|a, b| {
            start_wavelength(&a.spectrum).total_cmp(&start_wavelength(&b.spectrum))
        });
    }

    /// The bare spectra, in list order.
    pub fn spectra(&self) -> Vec<Spectrum> {
        self.scans.iter().map(|s| s.spectrum.clone()).collect()
    }
}

impl From<Vec<Spectrum>> for ScanList {
    fn from(spectra: Vec<Spectrum>) -> Self {
        ScanList {
            scans: spectra.into_iter().map(Scan::from).collect(),
        }
    }
}

fn start_wavelength(spectrum: &Spectrum) -> f64 {
    spectrum
        .x
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min)
}
