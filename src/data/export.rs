use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::Spectrum;

/// Write a spectrum to `path`, choosing the format by extension
/// (`.csv` or `.json`).
pub fn write_file(path: &Path, spectrum: &Spectrum, x_label: &str) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let written = match ext.as_str() {
        "csv" => write_csv(path, spectrum, x_label),
        "json" => write_json(path, spectrum),
        other => bail!("Unsupported output extension: .{other}"),
    };
    written.with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} samples to {}", spectrum.len(), path.display());
    Ok(())
}

/// Two-column CSV: `<x_label>,intensity`, one row per sample.
pub fn write_csv(path: &Path, spectrum: &Spectrum, x_label: &str) -> Result<()> {
    let file = File::create(path).context("creating CSV file")?;
    write_csv_to(file, spectrum, x_label)
}

/// CSV writer over any sink (used for stdout output).
pub fn write_csv_to<W: Write>(sink: W, spectrum: &Spectrum, x_label: &str) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record([x_label, "intensity"])?;
    for (x, y) in spectrum.points() {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// `{"x": [...], "y": [...]}`
pub fn write_json(path: &Path, spectrum: &Spectrum) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, spectrum).context("serializing spectrum")?;
    writer.flush().context("flushing JSON output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_header_and_rows() {
        let spectrum = Spectrum::new(vec![1.0, 2.5], vec![10.0, 20.0]);
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &spectrum, "wavelength").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "wavelength,intensity\n1,10\n2.5,20\n");
    }

    #[test]
    fn json_output_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stitched.json");
        let spectrum = Spectrum::new(vec![1.0, 2.0], vec![3.0, 4.0]);
        write_file(&path, &spectrum, "wavelength").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: Spectrum = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spectrum);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let spectrum = Spectrum::new(vec![1.0], vec![1.0]);
        assert!(write_file(&dir.path().join("out.xlsx"), &spectrum, "x").is_err());
    }
}
