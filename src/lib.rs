//! Spectra stitching for spectrometer range scans.
//!
//! A range scan moves the grating through several positions and acquires a
//! detector frame at each one. The resulting windows overlap slightly; this
//! crate merges them into one continuous spectrum using one of seven
//! pairwise strategies, folded over the scan list.
//!
//! ```
//! use rusty_stitch::{AverageSpectraStitch, Spectrum};
//!
//! let scans = [
//!     Spectrum::new(vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 20.0, 30.0, 40.0]),
//!     Spectrum::new(vec![3.5, 4.0, 5.0, 6.0], vec![35.0, 45.0, 55.0, 65.0]),
//! ];
//! let stitch = AverageSpectraStitch::from_spectra(&scans)?;
//! assert_eq!(stitch.stitched_spectra().x, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! # Ok::<(), rusty_stitch::StitchError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod stitching;

pub use config::StitchConfig;
pub use data::model::{MetadataValue, Scan, ScanList, Spectrum};
pub use error::{StitchError, StitchResult};
pub use stitching::{
    AverageSpectraStitch, LabSpec6SpectraStitch, LinearSpectraStitch, OffsetSpectraStitch,
    SimpleCutSpectraStitch, SimpleSpectraStitch, SpectraStitch, StitchMethod, StitchStrategy,
    WeightedAverageSpectraStitch,
};
