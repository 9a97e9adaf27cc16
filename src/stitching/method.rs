use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::pipeline::{
    AverageSpectraStitch, LabSpec6SpectraStitch, LinearSpectraStitch, OffsetSpectraStitch,
    SimpleCutSpectraStitch, SimpleSpectraStitch, WeightedAverageSpectraStitch,
};

/// Stitching strategy chosen at runtime (configuration file or CLI).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum StitchMethod {
    /// Keep the first spectrum, append the rest past its end.
    #[default]
    Simple,
    /// Like `simple`, with a constant added to later spectra.
    Offset,
    /// Nearest-neighbour mean inside the overlap.
    Average,
    /// Position-weighted mean inside the overlap.
    WeightedAverage,
    /// Nearest-neighbour mean over the overlap interval (requires overlap).
    Linear,
    /// Interpolated, position-weighted blend (requires overlap).
    #[value(name = "labspec6")]
    #[serde(rename = "labspec6")]
    LabSpec6,
    /// Right spectrum replaces the overlap (requires overlap).
    SimpleCut,
}

impl StitchMethod {
    pub const ALL: [StitchMethod; 7] = [
        StitchMethod::Simple,
        StitchMethod::Offset,
        StitchMethod::Average,
        StitchMethod::WeightedAverage,
        StitchMethod::Linear,
        StitchMethod::LabSpec6,
        StitchMethod::SimpleCut,
    ];

    /// Whether the method fails on spectra that do not overlap.
    pub fn requires_overlap(self) -> bool {
        matches!(
            self,
            StitchMethod::Linear | StitchMethod::LabSpec6 | StitchMethod::SimpleCut
        )
    }

    /// Stitch `spectra` in list order. `offset` only affects
    /// [`StitchMethod::Offset`].
    pub fn stitch(self, spectra: &[Spectrum], offset: Option<f64>) -> StitchResult<Spectrum> {
        if offset.is_some() && self != StitchMethod::Offset {
            log::warn!("Offset is ignored by the {self} method");
        }
        let stitched = match self {
            StitchMethod::Simple => SimpleSpectraStitch::from_spectra(spectra)?.into_spectrum(),
            StitchMethod::Offset => {
                OffsetSpectraStitch::with_offset(spectra, offset)?.into_spectrum()
            }
            StitchMethod::Average => AverageSpectraStitch::from_spectra(spectra)?.into_spectrum(),
            StitchMethod::WeightedAverage => {
                WeightedAverageSpectraStitch::from_spectra(spectra)?.into_spectrum()
            }
            StitchMethod::Linear => LinearSpectraStitch::from_spectra(spectra)?.into_spectrum(),
            StitchMethod::LabSpec6 => {
                LabSpec6SpectraStitch::from_spectra(spectra)?.into_spectrum()
            }
            StitchMethod::SimpleCut => {
                SimpleCutSpectraStitch::from_spectra(spectra)?.into_spectrum()
            }
        };
        Ok(stitched)
    }
}

impl fmt::Display for StitchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StitchMethod::Simple => "simple",
            StitchMethod::Offset => "offset",
            StitchMethod::Average => "average",
            StitchMethod::WeightedAverage => "weighted-average",
            StitchMethod::Linear => "linear",
            StitchMethod::LabSpec6 => "labspec6",
            StitchMethod::SimpleCut => "simple-cut",
        };
        write!(f, "{name}")
    }
}
