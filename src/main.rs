//! `rusty-stitch` – stitch overlapping range-scan windows into one spectrum.
//!
//! ```bash
//! # Stitch all scans of a parquet file with the average strategy
//! rusty-stitch --method average scans.parquet -o stitched.csv
//!
//! # Offset-correct later windows and convert the result to Raman shift
//! rusty-stitch --method offset --offset 12.5 --excitation 532 scans.json
//!
//! # Use a configuration file, CLI flags still win
//! rusty-stitch --config stitch.toml --sort a.json b.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;

use rusty_stitch::data::{export, loader};
use rusty_stitch::{processing, ScanList, Spectrum, StitchConfig, StitchMethod};

/// Stitch overlapping spectrometer scans into one continuous spectrum
#[derive(Parser, Debug)]
#[command(name = "rusty-stitch", version, long_about = None)]
struct Args {
    /// Scan files (.parquet, .json, .csv); scans are stitched in argument order
    #[arg(value_name = "SCAN_FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Stitching strategy
    #[arg(short, long, value_enum)]
    method: Option<StitchMethod>,

    /// Intensity offset added to later scans (offset method)
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f64>,

    /// Sort scans by their first wavelength before stitching
    #[arg(long)]
    sort: bool,

    /// Convert the stitched x axis to Raman shift for this laser line (nm)
    #[arg(long, value_name = "NM")]
    excitation: Option<f64>,

    /// Dark frame file; its first scan is subtracted from every scan
    #[arg(long, value_name = "FILE")]
    dark: Option<PathBuf>,

    /// Output file (.csv or .json); CSV on stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    log::info!("Stitching with the {} method", config.method);

    let mut scans = loader::load_files(&args.inputs)?;
    if scans.is_empty() {
        bail!("No scans found in the given files");
    }
    if let Some(dark_path) = &args.dark {
        scans = subtract_dark(scans, &loader::load_file(dark_path)?)?;
    }
    if config.sort_scans {
        scans.sort_by_start_wavelength();
    }
    for (i, scan) in scans.scans.iter().enumerate() {
        log::debug!("Scan {i}: {scan}");
    }

    let stitched = config
        .method
        .stitch(&scans.spectra(), config.offset)
        .context("stitching scans")?;
    log::info!(
        "Stitched {} scans into {} samples",
        scans.len(),
        stitched.len()
    );

    let (stitched, x_label) = match config.excitation_wavelength {
        Some(excitation) => (
            processing::to_raman_shift(&stitched, excitation)?,
            "raman_shift",
        ),
        None => (stitched, "wavelength"),
    };

    match &args.output {
        Some(path) => export::write_file(path, &stitched, x_label)?,
        None => export::write_csv_to(std::io::stdout().lock(), &stitched, x_label)?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

/// Configuration file values overridden by explicit CLI flags.
fn resolve_config(args: &Args) -> Result<StitchConfig> {
    let mut config = match &args.config {
        Some(path) => StitchConfig::load(path)?,
        None => StitchConfig::default(),
    };
    if let Some(method) = args.method {
        config.method = method;
    }
    if args.offset.is_some() {
        config.offset = args.offset;
    }
    if args.excitation.is_some() {
        config.excitation_wavelength = args.excitation;
    }
    config.sort_scans |= args.sort;
    Ok(config)
}

fn subtract_dark(scans: ScanList, dark_scans: &ScanList) -> Result<ScanList> {
    let dark: &Spectrum = dark_scans
        .scans
        .first()
        .map(|s| &s.spectrum)
        .context("dark frame file contains no scan")?;

    let mut corrected = ScanList::default();
    for (i, mut scan) in scans.scans.into_iter().enumerate() {
        scan.spectrum = processing::subtract_dark(&scan.spectrum, dark)
            .with_context(|| format!("subtracting dark frame from scan {i}"))?;
        corrected.scans.push(scan);
    }
    Ok(corrected)
}
