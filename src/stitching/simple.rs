use crate::data::model::Spectrum;
use crate::error::StitchResult;

use super::offset::Offset;
use super::StitchStrategy;

/// Baseline strategy: [`Offset`] without any intensity shift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Simple {
    inner: Offset,
}

impl Simple {
    pub fn new() -> Self {
        Simple {
            inner: Offset::none(),
        }
    }
}

impl StitchStrategy for Simple {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn stitch_pair(&self, first: &Spectrum, second: &Spectrum) -> StitchResult<Spectrum> {
        self.inner.stitch_pair(first, second)
    }
}
