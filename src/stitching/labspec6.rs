use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::overlap::{interpolate, require_overlap};
use super::{prepare_pair, StitchStrategy};

/// Interpolating blend over the union of both grids inside the overlap.
///
/// For every wavelength `x` of the union, both spectra are linearly
/// interpolated and mixed with position weights
/// `A = (x - start) / (end - start)` and `B = (end - x) / (end - start)`:
/// `y = (y1 * A + y2 * B) / (A + B)`. Left data is kept before the overlap,
/// right data after it. Requires a genuine overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabSpec6;

impl StitchStrategy for LabSpec6 {
    fn name(&self) -> &'static str {
        "labspec6"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, right) = prepare_pair(first, second)?;
        let interval = require_overlap(&left.x, &right.x)?;
        let width = interval.width();

        // union of both grids inside the interval; shared samples kept once
        let mut x_overlap: Vec<f64> = left
            .x
            .iter()
            .chain(&right.x)
            .copied()
            .filter(|&x| interval.contains(x))
            .collect();
        x_overlap.sort_by(f64::total_cmp);
        x_overlap.dedup();

        let mut out = Spectrum::with_capacity(left.len() + right.len());
        for (x, y) in left.points().filter(|&(x, _)| x < interval.start) {
            out.push(x, y);
        }
        for &x in &x_overlap {
            let y1 = interpolate(x, &left.x, &left.y);
            let y2 = interpolate(x, &right.x, &right.y);
            let a = (x - interval.start) / width;
            let b = (interval.end - x) / width;
            out.push(x, (y1 * a + y2 * b) / (a + b));
        }
        for (x, y) in right.points().filter(|&(x, _)| x > interval.end) {
            out.push(x, y);
        }

        Ok(out)
    }
}
