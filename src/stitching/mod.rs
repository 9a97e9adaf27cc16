/// Stitching engine: merge overlapping scans into one spectrum.
///
/// Architecture:
/// ```text
///  raw scans (any order, any direction)
///        │
///        ▼
///   ┌────────────┐
///   │ normalize   │  sort by x, drop repeated x
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │  overlap    │  interval / bounds B, C / nearest index
///   └────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │  StitchStrategy   │  one of seven pairwise policies
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │  SpectraStitch    │  left fold over the scan list
///   └──────────────────┘
/// ```
pub mod average;
pub mod labspec6;
pub mod linear;
pub mod method;
pub mod normalize;
pub mod offset;
pub mod overlap;
pub mod pipeline;
pub mod simple;
pub mod simple_cut;
pub mod weighted_average;

use crate::data::model::Spectrum;
use crate::error::StitchResult;

pub use average::Average;
pub use labspec6::LabSpec6;
pub use linear::Linear;
pub use method::StitchMethod;
pub use offset::Offset;
pub use pipeline::{
    AverageSpectraStitch, LabSpec6SpectraStitch, LinearSpectraStitch, OffsetSpectraStitch,
    SimpleCutSpectraStitch, SimpleSpectraStitch, SpectraStitch, WeightedAverageSpectraStitch,
};
pub use simple::Simple;
pub use simple_cut::SimpleCut;
pub use weighted_average::WeightedAverage;

/// A policy for merging two spectra into one.
///
/// Implementations receive raw spectra: they validate, normalise and order
/// their own copies before resolving the overlap.
pub trait StitchStrategy {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Merge `first` and `second` into a single spectrum.
    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum>;
}

/// Validate and normalise both inputs, then order them so that the returned
/// left spectrum does not start after the right one.
///
/// Normalised spectra are never empty here, so indexing the ends is safe.
pub(crate) fn prepare_pair(
    first: &Spectrum,
    second: &Spectrum,
) -> StitchResult<(Spectrum, Spectrum)> {
    first.validate()?;
    second.validate()?;

    let left = normalize::normalize(first)?;
    let right = normalize::normalize(second)?;

    // On a shared first wavelength the spectrum that ends first goes left.
    let left_key = (left.x[0], left.x[left.x.len() - 1]);
    let right_key = (right.x[0], right.x[right.x.len() - 1]);
    if left_key.0 > right_key.0 || (left_key.0 == right_key.0 && left_key.1 > right_key.1) {
        log::debug!("Spectra swapped for stitching (ensure left-first)");
        return Ok((right, left));
    }
    Ok((left, right))
}

/// `true` when the left spectrum ends before the right one begins.
pub(crate) fn is_disjoint(left: &Spectrum, right: &Spectrum) -> bool {
    match (left.last_x(), right.first_x()) {
        (Some(back), Some(front)) => back < front,
        _ => true,
    }
}

/// `left` followed by `right`.
pub(crate) fn concatenate(left: Spectrum, right: &Spectrum) -> Spectrum {
    let Spectrum { mut x, mut y } = left;
    x.extend_from_slice(&right.x);
    y.extend_from_slice(&right.y);
    Spectrum { x, y }
}


#[cfg(test)]
mod tests {
    use super::test_util::spectrum;
    use super::*;
    use crate::error::StitchError;

    #[test]
    fn prepare_pair_swaps_late_starting_first_input() {
        let a = spectrum(&[5.0, 6.0], &[50.0, 60.0]);
        let b = spectrum(&[2.0, 1.0], &[20.0, 10.0]);
        let (left, right) = prepare_pair(&a, &b).unwrap();
        assert_eq!(left.x, vec![1.0, 2.0]);
        assert_eq!(right.x, vec![5.0, 6.0]);
    }

    #[test]
    fn prepare_pair_rejects_bad_shapes() {
        let ok = spectrum(&[1.0], &[1.0]);
        let empty = spectrum(&[], &[]);
        let bad = spectrum(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            prepare_pair(&ok, &empty),
            Err(StitchError::EmptyInput(_))
        ));
        assert!(matches!(
            prepare_pair(&bad, &ok),
            Err(StitchError::InvalidFormat { .. })
        ));
    }
}
