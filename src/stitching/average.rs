use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::overlap::{closest_index, lower_bound_b, overlap_interval, upper_bound_c, OverlapInterval};
use super::{concatenate, is_disjoint, prepare_pair, StitchStrategy};

/// Average the overlap sample-by-sample against the nearest right-hand
/// sample; outside the overlap each side is copied verbatim.
///
/// The overlap is blended on the left spectrum's grid without interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Average;

impl StitchStrategy for Average {
    fn name(&self) -> &'static str {
        "average"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, right) = prepare_pair(first, second)?;
        Ok(stitch_zoned(left, &right, |_, _, y1, y2| average(y1, y2)))
    }
}

fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Bounds B and C of an overlap, plus the overlap interval they sit in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Zoning {
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub interval: OverlapInterval,
}

/// Shared zoning of the boundary-based strategies.
///
/// * `x <= B`: left samples verbatim.
/// * overlap: left samples blended with the nearest right sample through
///   `blend(zoning, x, y_left, y_right)`.
/// * `x >= C`: right samples verbatim, or without C the left samples past the
///   end of the right spectrum.
///
/// Both spectra must already be normalised and ordered left-first.
pub(crate) fn stitch_zoned<F>(left: Spectrum, right: &Spectrum, blend: F) -> Spectrum
where
    F: Fn(&Zoning, f64, f64, f64) -> f64,
{
    if is_disjoint(&left, right) {
        return concatenate(left, right);
    }

    log::debug!("Computing lower bound B and upper bound C of overlap");
    let zoning = Zoning {
        b: lower_bound_b(&left.x, &right.x),
        c: upper_bound_c(&left.x, &right.x),
        interval: overlap_interval(&left.x, &right.x),
    };
    log::debug!("Overlap bounds: B = {:?}, C = {:?}", zoning.b, zoning.c);

    let right_last = right.x[right.x.len() - 1];
    let in_overlap = |x: f64| match (zoning.b, zoning.c) {
        (None, None) => x <= right_last,
        (Some(b), None) => x > b && x <= right_last,
        (None, Some(c)) => x < c,
        (Some(b), Some(c)) => x > b && x < c,
    };

    let mut out = Spectrum::with_capacity(left.len() + right.len());

    // 1) left part, up to and including B
    if let Some(b) = zoning.b {
        for (x, y) in left.points().filter(|&(x, _)| x <= b) {
            out.push(x, y);
        }
    }

    // 2) overlap zone on the left grid
    for (x, y1) in left.points().filter(|&(x, _)| in_overlap(x)) {
        let j = closest_index(&right.x, x);
        out.push(x, blend(&zoning, x, y1, right.y[j]));
    }

    // 3) right part, from C on; without C the left tail past the right end
    match zoning.c {
        Some(c) => {
            for (x, y) in right.points().filter(|&(x, _)| x >= c) {
                out.push(x, y);
            }
        }
        None => {
            for (x, y) in left.points().filter(|&(x, _)| x > right_last) {
                out.push(x, y);
            }
        }
    }

    out
}
