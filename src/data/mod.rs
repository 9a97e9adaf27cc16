/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv / ICL acquisition JSON
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ScanList
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ ScanList  │  Vec<Scan>, each a Spectrum + metadata
///   └──────────┘
///        │   (stitching)
///        ▼
///   ┌──────────┐
///   │  export   │  Spectrum → .csv / .json
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
