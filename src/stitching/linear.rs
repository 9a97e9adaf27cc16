use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::normalize::sort_by_wavelength;
use super::overlap::{closest_index, require_overlap};
use super::{prepare_pair, StitchStrategy};

/// Overlap samples of the left spectrum averaged with their nearest
/// right-hand sample; left data before the overlap, right data after it.
///
/// Requires a genuine overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear;

impl StitchStrategy for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, right) = prepare_pair(first, second)?;
        let interval = require_overlap(&left.x, &right.x)?;

        let mut out = Spectrum::with_capacity(left.len() + right.len());
        for (x, y) in left.points().filter(|&(x, _)| x < interval.start) {
            out.push(x, y);
        }
        for (x, y1) in left.points().filter(|&(x, _)| interval.contains(x)) {
            let j = closest_index(&right.x, x);
            out.push(x, (y1 + right.y[j]) / 2.0);
        }
        for (x, y) in right.points().filter(|&(x, _)| x > interval.end) {
            out.push(x, y);
        }

        sort_by_wavelength(&mut out.x, &mut out.y)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StitchError;
    use crate::stitching::test_util::{assert_spectrum, spectrum};

    #[test]
    fn overlap_is_averaged_on_left_grid() {
        let s1 = spectrum(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0]);
        let s2 = spectrum(&[2.9, 4.1, 5.0, 6.0], &[100.0, 200.0, 300.0, 400.0]);
        // interval [2.9, 4.0]: x = 3 pairs with 2.9, x = 4 with 4.1
        assert_spectrum(
            &Linear.stitch_pair(&s1, &s2).unwrap(),
            &[1.0, 2.0, 3.0, 4.0, 4.1, 5.0, 6.0],
            &[10.0, 20.0, 65.0, 120.0, 200.0, 300.0, 400.0],
        );
    }

    #[test]
    fn swapped_input_gives_same_result() {
        let s1 = spectrum(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0]);
        let s2 = spectrum(&[3.0, 4.0, 5.0], &[32.0, 42.0, 52.0]);
        let forward = Linear.stitch_pair(&s1, &s2).unwrap();
        let backward = Linear.stitch_pair(&s2, &s1).unwrap();
        assert_eq!(forward, backward);
        assert_spectrum(&forward, &[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 31.0, 41.0, 52.0]);
    }

    #[test]
    fn disjoint_spectra_are_rejected() {
        let s1 = spectrum(&[1.0, 2.0], &[10.0, 20.0]);
        let s2 = spectrum(&[3.0, 4.0], &[50.0, 100.0]);
        assert!(matches!(
            Linear.stitch_pair(&s1, &s2),
            Err(StitchError::NoOverlap { .. })
        ));
    }
}
