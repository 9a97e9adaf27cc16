//! Write a synthetic range scan (overlapping detector windows over a
//! Gaussian-peak spectrum) to `sample_scans.parquet` and `sample_scans.json`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, Int64Array, ListBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One detector window: `pixels` samples centred on `center`, reported in
/// descending wavelength order like the CCD does.
struct Window {
    center: f64,
    x: Vec<f64>,
    y: Vec<f64>,
}

fn acquire_window(
    center: f64,
    pixels: usize,
    dispersion: f64,
    peaks: &[(f64, f64, f64)],
    baseline: f64,
    rng: &mut SimpleRng,
) -> Window {
    let half = (pixels as f64 - 1.0) / 2.0;
    let x: Vec<f64> = (0..pixels)
        .rev()
        .map(|p| center + (p as f64 - half) * dispersion)
        .collect();
    let y = x
        .iter()
        .map(|&wl| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
                .sum();
            baseline + signal + rng.gauss(0.0, 2.0)
        })
        .collect();
    Window { center, x, y }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // 400 → 600 nm, 256-pixel windows at 0.25 nm/pixel, 10 pixels of overlap
    let (start, end) = (400.0, 600.0);
    let pixels = 256;
    let dispersion = 0.25;
    let pixel_overlap = 10;
    let step = (pixels - pixel_overlap) as f64 * dispersion;
    let first_center = start + (pixels as f64 - 1.0) / 2.0 * dispersion;

    let peaks = [
        (435.8, 0.8, 900.0),
        (487.7, 1.5, 400.0),
        (546.1, 0.6, 1200.0),
        (577.0, 1.0, 650.0),
    ];

    let mut windows = Vec::new();
    let mut center = first_center;
    let mut index = 0_u32;
    while center - (pixels as f64 / 2.0) * dispersion < end {
        // each grating position drifts the baseline a little
        let baseline = 100.0 + 5.0 * f64::from(index);
        windows.push(acquire_window(center, pixels, dispersion, &peaks, baseline, &mut rng));
        center += step;
        index += 1;
    }

    write_parquet("sample_scans.parquet", &windows)?;
    write_json("sample_scans.json", &windows)?;

    println!(
        "Wrote {} windows ({} pixels each) to sample_scans.parquet and sample_scans.json",
        windows.len(),
        pixels
    );
    Ok(())
}

fn write_parquet(path: &str, windows: &[Window]) -> Result<()> {
    let mut x_builder = ListBuilder::new(Float64Builder::new());
    let mut y_builder = ListBuilder::new(Float64Builder::new());
    for w in windows {
        x_builder.values().append_slice(&w.x);
        x_builder.append(true);
        y_builder.values().append_slice(&w.y);
        y_builder.append(true);
    }

    let centers = Float64Array::from(windows.iter().map(|w| w.center).collect::<Vec<_>>());
    let ids = Int64Array::from((0..windows.len() as i64).collect::<Vec<_>>());

    let item = Arc::new(Field::new("item", DataType::Float64, true));
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::List(item.clone()), false),
        Field::new("y", DataType::List(item), false),
        Field::new("center_wavelength", DataType::Float64, false),
        Field::new("scan_id", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(x_builder.finish()),
            Arc::new(y_builder.finish()),
            Arc::new(centers),
            Arc::new(ids),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_json(path: &str, windows: &[Window]) -> Result<()> {
    let records: Vec<_> = windows
        .iter()
        .enumerate()
        .map(|(i, w)| json!({ "x": w.x, "y": w.y, "center_wavelength": w.center, "scan_id": i }))
        .collect();
    let text = serde_json::to_string(&records).context("serializing scans")?;
    std::fs::write(path, text).context("writing JSON output")?;
    Ok(())
}
