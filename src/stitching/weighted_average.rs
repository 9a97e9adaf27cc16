use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::average::{stitch_zoned, Zoning};
use super::{prepare_pair, StitchStrategy};

/// Same zoning as [`super::Average`], but the overlap is a position-weighted
/// blend: full weight on the left spectrum at B, full weight on the right
/// spectrum at C.
///
/// A missing bound is replaced by the matching end of the overlap interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedAverage;

impl StitchStrategy for WeightedAverage {
    fn name(&self) -> &'static str {
        "weighted-average"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, right) = prepare_pair(first, second)?;
        Ok(stitch_zoned(left, &right, weight_average))
    }
}

fn weight_average(zoning: &Zoning, x: f64, y1: f64, y2: f64) -> f64 {
    let lo = zoning.b.unwrap_or(zoning.interval.start);
    let hi = zoning.c.unwrap_or(zoning.interval.end);
    let span = hi - lo;
    if span.is_nan() || span <= 0.0 {
        return (y1 + y2) / 2.0;
    }

    let w1 = ((hi - x) / span).clamp(0.0, 1.0);
    let w2 = ((x - lo) / span).clamp(0.0, 1.0);
    if w1 + w2 == 0.0 {
        return (y1 + y2) / 2.0;
    }
    (y1 * w1 + y2 * w2) / (w1 + w2)
}
