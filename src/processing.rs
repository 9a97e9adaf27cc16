//! Post-processing applied to acquired or stitched spectra.

use crate::data::model::Spectrum;
use crate::error::{StitchError, StitchResult};

/// Convert wavelengths (nm) to Raman shift (cm⁻¹) relative to the
/// excitation wavelength (nm).
pub fn raman_shift(wavelengths: &[f64], excitation_wavelength: f64) -> StitchResult<Vec<f64>> {
    if !(excitation_wavelength.is_finite() && excitation_wavelength > 0.0) {
        return Err(StitchError::invalid_parameter(format!(
            "excitation wavelength must be a positive number of nm, got {excitation_wavelength}"
        )));
    }
    if let Some(bad) = wavelengths.iter().find(|&&w| w <= 0.0) {
        return Err(StitchError::invalid_parameter(format!(
            "wavelengths must be positive, got {bad}"
        )));
    }
    Ok(wavelengths
        .iter()
        .map(|&w| (1.0 / excitation_wavelength - 1.0 / w) * 1e7)
        .collect())
}

/// Copy of `spectrum` with its x axis converted to Raman shift.
pub fn to_raman_shift(spectrum: &Spectrum, excitation_wavelength: f64) -> StitchResult<Spectrum> {
    Ok(Spectrum {
        x: raman_shift(&spectrum.x, excitation_wavelength)?,
        y: spectrum.y.clone(),
    })
}

/// Subtract a dark (shutter-closed) frame from a signal frame, sample by
/// sample. Both frames must share the same x axis length.
pub fn subtract_dark(signal: &Spectrum, dark: &Spectrum) -> StitchResult<Spectrum> {
    signal.validate()?;
    dark.validate()?;
    if signal.len() != dark.len() {
        return Err(StitchError::invalid_parameter(format!(
            "dark frame has {} samples but signal has {}",
            dark.len(),
            signal.len()
        )));
    }
    Ok(Spectrum {
        x: signal.x.clone(),
        y: signal
            .y
            .iter()
            .zip(&dark.y)
            .map(|(s, d)| s - d)
            .collect(),
    })
}
