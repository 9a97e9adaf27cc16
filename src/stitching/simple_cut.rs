use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::overlap::require_overlap;
use super::{prepare_pair, StitchStrategy};

/// Left data up to the overlap, right data from the overlap on.
///
/// Everything the left spectrum holds inside and after the overlap is
/// dropped. Requires a genuine overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimpleCut;

impl StitchStrategy for SimpleCut {
    fn name(&self) -> &'static str {
        "simple-cut"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, right) = prepare_pair(first, second)?;
        let interval = require_overlap(&left.x, &right.x)?;

        let mut out = Spectrum::with_capacity(left.len() + right.len());
        for (x, y) in left.points().filter(|&(x, _)| x < interval.start) {
            out.push(x, y);
        }
        for (x, y) in right.points().filter(|&(x, _)| x >= interval.start) {
            out.push(x, y);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StitchError;
    use crate::stitching::test_util::{assert_spectrum, spectrum};

    #[test]
    fn right_spectrum_replaces_overlap() {
        let s1 = spectrum(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0]);
        let s2 = spectrum(&[2.5, 3.5, 5.0], &[250.0, 350.0, 500.0]);
        assert_spectrum(
            &SimpleCut.stitch_pair(&s1, &s2).unwrap(),
            &[1.0, 2.0, 2.5, 3.5, 5.0],
            &[10.0, 20.0, 250.0, 350.0, 500.0],
        );
    }

    #[test]
    fn nested_right_spectrum_drops_left_tail() {
        let s1 = spectrum(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 30.0, 40.0, 50.0]);
        let s2 = spectrum(&[2.5, 3.0, 3.5], &[25.0, 35.0, 45.0]);
        assert_spectrum(
            &SimpleCut.stitch_pair(&s1, &s2).unwrap(),
            &[1.0, 2.0, 2.5, 3.0, 3.5],
            &[10.0, 20.0, 25.0, 35.0, 45.0],
        );
    }

    #[test]
    fn disjoint_spectra_are_rejected() {
        let s1 = spectrum(&[1.0, 2.0], &[10.0, 20.0]);
        let s2 = spectrum(&[3.0, 4.0], &[50.0, 100.0]);
        assert!(matches!(
            SimpleCut.stitch_pair(&s1, &s2),
            Err(StitchError::NoOverlap { .. })
        ));
    }
}
