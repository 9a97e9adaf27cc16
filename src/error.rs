use thiserror::Error;

/// Result alias used throughout the stitching engine.
pub type StitchResult<T> = std::result::Result<T, StitchError>;

/// Failures raised by the stitching engine and the spectral post-processing
/// helpers.
///
/// A missing bound B or C is not an error; the boundary-based strategies
/// handle it as a structural case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StitchError {
    /// Empty scan list, or a spectrum without samples.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// `x` and `y` of one spectrum differ in length.
    #[error(
        "Invalid spectra format: spectra must have x and y data of the same size. Got {x_len} and {y_len}"
    )]
    InvalidFormat { x_len: usize, y_len: usize },

    /// A wavelength sample is NaN or infinite.
    #[error("Invalid wavelength: x[{index}] = {value} is not a finite number")]
    InvalidWavelength { index: usize, value: f64 },

    /// An overlap-interval strategy was given two disjoint spectra.
    #[error("No overlapping region between spectra (overlap start {start}, end {end})")]
    NoOverlap { start: f64, end: f64 },

    /// A numeric parameter is outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl StitchError {
    /// Build an [`StitchError::InvalidFormat`] and log it at the point of
    /// detection.
    pub(crate) fn invalid_format(x_len: usize, y_len: usize) -> Self {
        let err = StitchError::InvalidFormat { x_len, y_len };
        log::error!("{err}");
        err
    }

    pub(crate) fn invalid_wavelength(index: usize, value: f64) -> Self {
        let err = StitchError::InvalidWavelength { index, value };
        log::error!("{err}");
        err
    }

    pub(crate) fn empty_input(message: impl Into<String>) -> Self {
        let err = StitchError::EmptyInput(message.into());
        log::error!("{err}");
        err
    }

    pub(crate) fn no_overlap(start: f64, end: f64) -> Self {
        let err = StitchError::NoOverlap { start, end };
        log::error!("{err}");
        err
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        let err = StitchError::InvalidParameter(message.into());
        log::error!("{err}");
        err
    }
}
