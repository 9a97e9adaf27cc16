use crate::data::model::Spectrum;
use crate::error::{StitchError, StitchResult};

use super::normalize::normalize;
use super::{
    Average, LabSpec6, Linear, Offset, Simple, SimpleCut, StitchStrategy, WeightedAverage,
};

/// A stitched composite and the strategy that produced it.
///
/// Construction performs the whole left fold eagerly; the result is read-only
/// afterwards. Composites of the same strategy kind are merged with
/// [`SpectraStitch::stitch_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpectraStitch<S> {
    strategy: S,
    stitched: Spectrum,
}

pub type SimpleSpectraStitch = SpectraStitch<Simple>;
pub type OffsetSpectraStitch = SpectraStitch<Offset>;
pub type AverageSpectraStitch = SpectraStitch<Average>;
pub type WeightedAverageSpectraStitch = SpectraStitch<WeightedAverage>;
pub type LinearSpectraStitch = SpectraStitch<Linear>;
pub type LabSpec6SpectraStitch = SpectraStitch<LabSpec6>;
pub type SimpleCutSpectraStitch = SpectraStitch<SimpleCut>;

impl<S: StitchStrategy + Clone> SpectraStitch<S> {
    /// Stitch `spectra` in list order with `strategy`.
    ///
    /// The composite starts as the (normalised) first spectrum and every
    /// following spectrum is merged into it.
    pub fn new(strategy: S, spectra: &[Spectrum]) -> StitchResult<Self> {
        let Some((first, rest)) = spectra.split_first() else {
            return Err(StitchError::empty_input("No spectra to stitch"));
        };
        for spectrum in spectra {
            spectrum.validate()?;
        }

        log::debug!(
            "Stitching {} spectra with the {} strategy",
            spectra.len(),
            strategy.name()
        );

        let mut stitched = normalize(first)?;
        for (i, spectrum) in rest.iter().enumerate() {
            stitched = strategy.stitch_pair(&stitched, spectrum)?;
            log::trace!("After scan {}: {} samples", i + 2, stitched.len());
        }

        Ok(SpectraStitch { strategy, stitched })
    }

    /// The stitched composite.
    pub fn stitched_spectra(&self) -> &Spectrum {
        &self.stitched
    }

    pub fn into_spectrum(self) -> Spectrum {
        self.stitched
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Merge this composite with `other`'s into a new stitch.
    pub fn stitch_with(&self, other: &SpectraStitch<S>) -> StitchResult<Self> {
        let stitched = self
            .strategy
            .stitch_pair(&self.stitched, &other.stitched)?;
        Ok(SpectraStitch {
            strategy: self.strategy.clone(),
            stitched,
        })
    }
}

impl<S: StitchStrategy + Clone + Default> SpectraStitch<S> {
    /// Stitch with the strategy's default configuration.
    pub fn from_spectra(spectra: &[Spectrum]) -> StitchResult<Self> {
        Self::new(S::default(), spectra)
    }
}

impl OffsetSpectraStitch {
    /// Stitch with `offset` added to every later spectrum's intensities.
    pub fn with_offset(spectra: &[Spectrum], offset: Option<f64>) -> StitchResult<Self> {
        Self::new(Offset::new(offset)?, spectra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stitching::test_util::{assert_spectrum, spectrum};

    #[test]
    fn empty_list_is_rejected() {
        let err = AverageSpectraStitch::from_spectra(&[]).unwrap_err();
        assert_eq!(err, StitchError::EmptyInput("No spectra to stitch".into()));
    }

    #[test]
    fn any_malformed_scan_fails_construction() {
        let spectra = [
            spectrum(&[1.0, 2.0], &[1.0, 2.0]),
            spectrum(&[3.0, 4.0], &[3.0]),
        ];
        assert!(matches!(
            SimpleSpectraStitch::from_spectra(&spectra),
            Err(StitchError::InvalidFormat { x_len: 2, y_len: 1 })
        ));
    }

    #[test]
    fn single_scan_is_normalised() {
        let spectra = [spectrum(&[3.0, 1.0, 1.0], &[30.0, 10.0, 11.0])];
        let stitch = SimpleSpectraStitch::from_spectra(&spectra).unwrap();
        assert_spectrum(stitch.stitched_spectra(), &[1.0, 3.0], &[10.0, 30.0]);
    }

    #[test]
    fn folds_in_list_order() {
        let spectra = [
            spectrum(&[1.0, 2.0], &[10.0, 20.0]),
            spectrum(&[3.0, 4.0], &[30.0, 40.0]),
            spectrum(&[5.0, 6.0], &[50.0, 60.0]),
        ];
        let stitch = AverageSpectraStitch::from_spectra(&spectra).unwrap();
        assert_spectrum(
            stitch.stitched_spectra(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        );
    }

    #[test]
    fn stitch_with_keeps_offset() {
        let a = OffsetSpectraStitch::with_offset(&[spectrum(&[0.0, 1.0], &[1.0, 2.0])], Some(1.0))
            .unwrap();
        let b = OffsetSpectraStitch::with_offset(&[spectrum(&[2.0, 3.0], &[3.0, 4.0])], Some(1.0))
            .unwrap();
        let merged = a.stitch_with(&b).unwrap();
        assert_eq!(merged.strategy().offset(), Some(1.0));
        assert_spectrum(
            merged.stitched_spectra(),
            &[0.0, 1.0, 2.0, 3.0],
            &[1.0, 2.0, 4.0, 5.0],
        );
    }

    #[test]
    fn failing_step_returns_no_partial_result() {
        let spectra = [
            spectrum(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]),
            spectrum(&[2.5, 4.0], &[2.5, 4.0]),
            spectrum(&[10.0, 11.0], &[10.0, 11.0]),
        ];
        assert!(matches!(
            LinearSpectraStitch::from_spectra(&spectra),
            Err(StitchError::NoOverlap { .. })
        ));
    }
}
