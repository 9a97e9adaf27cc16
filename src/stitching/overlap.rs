//! Overlap analysis between two normalised spectra.
//!
//! ```text
//!   x1: ●───●───●───●───●───●
//!   x2:             ○───○───○───○───○
//!                 B │         │ C
//!   start = x2[0] ──┘         └── end = x1[last]
//! ```
//!
//! * The overlap interval is `[max(fronts), min(backs)]`.
//! * B is the last x1 sample strictly before the first x2 sample.
//! * C is the first x2 sample strictly after the last x1 sample.

use crate::error::{StitchError, StitchResult};

/// Wavelength range shared by two spectra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapInterval {
    pub start: f64,
    pub end: f64,
}

impl OverlapInterval {
    /// `false` when the spectra do not overlap (or only touch at one point).
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `x` lies inside the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }
}

/// Overlap of two sorted, non-empty wavelength axes.
pub fn overlap_interval(x1: &[f64], x2: &[f64]) -> OverlapInterval {
    let (front1, back1) = ends(x1);
    let (front2, back2) = ends(x2);
    OverlapInterval {
        start: front1.max(front2),
        end: back1.min(back2),
    }
}

/// Overlap interval, or [`StitchError::NoOverlap`] when it is empty.
pub fn require_overlap(x1: &[f64], x2: &[f64]) -> StitchResult<OverlapInterval> {
    let interval = overlap_interval(x1, x2);
    if !interval.is_valid() {
        return Err(StitchError::no_overlap(interval.start, interval.end));
    }
    Ok(interval)
}

/// Bound B: the greatest `x1` value strictly less than `x2[0]`.
///
/// `None` when every `x1` sample is at or after the start of `x2`.
pub fn lower_bound_b(x1: &[f64], x2: &[f64]) -> Option<f64> {
    let first2 = x2.first().copied()?;
    let idx = x1.partition_point(|&v| v < first2);
    if idx == 0 {
        log::warn!("No valid lower bound B found: all x1 values are >= first x2 value");
        return None;
    }
    Some(x1[idx - 1])
}

/// Bound C: the least `x2` value strictly greater than the last `x1` value.
///
/// `None` when every `x2` sample is at or before the end of `x1`.
pub fn upper_bound_c(x1: &[f64], x2: &[f64]) -> Option<f64> {
    let last1 = x1.last().copied()?;
    let idx = x2.partition_point(|&v| v <= last1);
    if idx == x2.len() {
        log::warn!("No valid upper bound C found: all x2 values are <= last x1 value");
        return None;
    }
    Some(x2[idx])
}

/// Index of the sample in `sorted_xs` nearest to `target`.
///
/// The left neighbour wins only when it is strictly closer; on an exact tie
/// the sample at the insertion point is returned. Targets past the end map
/// to the last index.
pub fn closest_index(sorted_xs: &[f64], target: f64) -> usize {
    let j = sorted_xs.partition_point(|&v| v < target);
    if j == sorted_xs.len() {
        return sorted_xs.len().saturating_sub(1);
    }
    if j > 0 && (sorted_xs[j - 1] - target).abs() < (sorted_xs[j] - target).abs() {
        return j - 1;
    }
    j
}

/// Linear interpolation of `ys` over `xs` at `x`, clamped to the end values
/// outside `xs`.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let i = xs.partition_point(|&v| v < x);
    if i == xs.len() {
        return ys.last().copied().unwrap_or(f64::NAN);
    }
    if i == 0 {
        return ys[0];
    }
    let (x_lo, x_hi) = (xs[i - 1], xs[i]);
    let (y_lo, y_hi) = (ys[i - 1], ys[i]);
    y_lo + (y_hi - y_lo) * (x - x_lo) / (x_hi - x_lo)
}

fn ends(xs: &[f64]) -> (f64, f64) {
    match (xs.first(), xs.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (f64::NAN, f64::NAN),
    }
}
