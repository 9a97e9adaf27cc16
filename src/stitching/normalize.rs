//! Spectrum normalisation: sort by wavelength and drop repeated wavelengths.

use crate::data::model::Spectrum;
use crate::error::{StitchError, StitchResult};

/// Stable-sort paired sequences by wavelength, ascending.
pub fn sort_by_wavelength(x: &mut [f64], y: &mut [f64]) -> StitchResult<()> {
    if x.len() != y.len() {
        return Err(StitchError::invalid_format(x.len(), y.len()));
    }

    let mut xy: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    xy.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (i, (xv, yv)) in xy.into_iter().enumerate() {
        x[i] = xv;
        y[i] = yv;
    }
    Ok(())
}

/// Collapse runs of equal wavelengths to their first sample.
///
/// Expects sorted input. Empty input is left untouched.
pub fn remove_duplicates(x: &mut Vec<f64>, y: &mut Vec<f64>) -> StitchResult<()> {
    if x.len() != y.len() {
        return Err(StitchError::invalid_format(x.len(), y.len()));
    }
    if x.is_empty() {
        log::warn!("Spectra are empty");
        return Ok(());
    }

    let mut write_idx = 0;
    for read_idx in 1..x.len() {
        if x[read_idx] != x[write_idx] {
            write_idx += 1;
            x[write_idx] = x[read_idx];
            y[write_idx] = y[read_idx];
        }
    }

    x.truncate(write_idx + 1);
    y.truncate(write_idx + 1);
    Ok(())
}

/// Sorted, duplicate-free copy of `spectrum`.
pub fn normalize(spectrum: &Spectrum) -> StitchResult<Spectrum> {
    let mut x = spectrum.x.clone();
    let mut y = spectrum.y.clone();
    sort_by_wavelength(&mut x, &mut y)?;
    remove_duplicates(&mut x, &mut y)?;
    Ok(Spectrum { x, y })
}

/// Whether `x` is strictly increasing.
pub fn is_strictly_increasing(x: &[f64]) -> bool {
    x.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending_detector_output() {
        let mut x = vec![3.0, 1.0, 2.0];
        let mut y = vec![30.0, 10.0, 20.0];
        sort_by_wavelength(&mut x, &mut y).unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(y, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn sort_is_stable_for_equal_wavelengths() {
        let mut x = vec![2.0, 1.0, 2.0];
        let mut y = vec![1.0, 0.0, 2.0];
        sort_by_wavelength(&mut x, &mut y).unwrap();
        assert_eq!(y, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn duplicates_keep_first_sample() {
        let mut x = vec![1.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let mut y = vec![10.0, 11.0, 20.0, 30.0, 31.0, 32.0];
        remove_duplicates(&mut x, &mut y).unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(y, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut x: Vec<f64> = Vec::new();
        let mut y: Vec<f64> = Vec::new();
        remove_duplicates(&mut x, &mut y).unwrap();
        assert!(x.is_empty() && y.is_empty());
    }

    #[test]
    fn length_mismatch_is_invalid_format() {
        let mut x = vec![1.0, 2.0];
        let mut y = vec![1.0];
        assert_eq!(
            sort_by_wavelength(&mut x, &mut y),
            Err(StitchError::InvalidFormat { x_len: 2, y_len: 1 })
        );
        assert_eq!(
            remove_duplicates(&mut x, &mut y),
            Err(StitchError::InvalidFormat { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let raw = Spectrum::new(vec![5.0, 1.0, 3.0, 3.0], vec![50.0, 10.0, 30.0, 31.0]);
        let once = normalize(&raw).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
        assert!(is_strictly_increasing(&once.x));
        assert_eq!(raw.x, vec![5.0, 1.0, 3.0, 3.0]);
    }
}
