use crate::data::model::Spectrum;
use crate::error::{StitchError, StitchResult};

use super::{concatenate, is_disjoint, prepare_pair, StitchStrategy};

/// Keep the whole left spectrum and append the right one from its first
/// sample past the left's end.
///
/// An optional constant is added to every intensity of the right spectrum
/// before merging (baseline correction between detector windows).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    offset: Option<f64>,
}

impl Offset {
    pub fn new(offset: Option<f64>) -> StitchResult<Self> {
        if let Some(value) = offset {
            if !value.is_finite() {
                return Err(StitchError::invalid_parameter(format!(
                    "offset must be finite, got {value}"
                )));
            }
        }
        Ok(Offset { offset })
    }

    /// Offset-free variant.
    pub fn none() -> Self {
        Offset { offset: None }
    }

    pub fn offset(&self) -> Option<f64> {
        self.offset
    }
}

impl StitchStrategy for Offset {
    fn name(&self) -> &'static str {
        "offset"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        let (left, mut right) = prepare_pair(first, second)?;

        if let Some(offset) = self.offset {
            log::debug!("Applying offset of {offset} to second spectrum");
            right.y.iter_mut().for_each(|y| *y += offset);
        }

        if is_disjoint(&left, &right) {
            return Ok(concatenate(left, &right));
        }

        let last_left = left.x[left.x.len() - 1];
        let cut = right.x.partition_point(|&x| x <= last_left);
        if cut == right.x.len() {
            log::debug!("Second spectrum lies inside the first, nothing appended");
            return Ok(left);
        }

        let tail = Spectrum::new(right.x[cut..].to_vec(), right.y[cut..].to_vec());
        Ok(concatenate(left, &tail))
    }
}
