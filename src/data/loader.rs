use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeListArray, ListArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{MetadataValue, Scan, ScanList, Spectrum};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a list of scans from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with `x` and `y` list columns, one scan per row
/// * `.json`    – `[{ "x": [...], "y": [...], ...meta }, ...]` or ICL
///   acquisition-data payloads (see [`parse_acquisition_data`])
/// * `.csv`     – columns `x` and `y` containing semicolon-separated floats
pub fn load_file(path: &Path) -> Result<ScanList> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let scans = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading scans from {}", path.display()))?;

    log::info!("Loaded {} scan(s) from {}", scans.len(), path.display());
    Ok(scans)
}

/// Load and concatenate scans from several files, in argument order.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<ScanList> {
    let mut all = ScanList::default();
    for path in paths {
        all.extend(load_file(path.as_ref())?);
    }
    Ok(all)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Two JSON layouts are accepted.
///
/// Records (one object per scan, extra keys become metadata):
///
/// ```json
/// [
///   { "x": [400.0, 400.5, ...], "y": [12.0, 14.0, ...], "center_wavelength": 420.0 },
///   ...
/// ]
/// ```
///
/// ICL acquisition data, as returned by a CCD acquisition (a single payload
/// or an array of payloads, one per grating position):
///
/// ```json
/// [ { "roi": [ { "xData": [...], "yData": [[...]] } ] } ]
/// ```
fn load_json(path: &Path) -> Result<ScanList> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    parse_json_scans(&root)
}

fn parse_json_scans(root: &JsonValue) -> Result<ScanList> {
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut scans = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        match rec {
            JsonValue::Object(obj) if obj.contains_key("roi") => {
                scans.push(Scan::from(acquisition_spectrum(obj, i)?));
            }
            JsonValue::Object(obj) => scans.push(record_scan(obj, i)?),
            JsonValue::Array(_) => {
                let spectra = parse_acquisition_data(rec)
                    .with_context(|| format!("Row {i}: invalid acquisition payload"))?;
                scans.extend(spectra.into_iter().map(Scan::from));
            }
            _ => bail!("Row {i} is neither a JSON object nor an acquisition payload"),
        }
    }

    Ok(ScanList::new(scans))
}

/// Extract one spectrum per acquisition from ICL acquisition data: the first
/// region of interest, its `xData` and the first row of `yData`.
pub fn parse_acquisition_data(value: &JsonValue) -> Result<Vec<Spectrum>> {
    let acquisitions = value
        .as_array()
        .context("acquisition data must be a JSON array")?;
    acquisitions
        .iter()
        .enumerate()
        .map(|(i, acq)| {
            let obj = acq
                .as_object()
                .with_context(|| format!("Acquisition {i} is not a JSON object"))?;
            acquisition_spectrum(obj, i)
        })
        .collect()
}

fn acquisition_spectrum(obj: &Map<String, JsonValue>, row: usize) -> Result<Spectrum> {
    let roi = obj
        .get("roi")
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .and_then(|r| r.as_object())
        .with_context(|| format!("Acquisition {row}: missing region of interest"))?;

    let x = json_array_to_f64(roi.get("xData"), row, "xData")?;
    let y = json_array_to_f64(
        roi.get("yData")
            .and_then(|y| y.as_array())
            .and_then(|rows| rows.first()),
        row,
        "yData",
    )?;

    if x.len() != y.len() {
        bail!("Acquisition {row}: xData has {} values but yData has {}", x.len(), y.len());
    }
    Ok(Spectrum::new(x, y))
}

fn record_scan(obj: &Map<String, JsonValue>, row: usize) -> Result<Scan> {
    let x = json_array_to_f64(obj.get("x"), row, "x")?;
    let y = json_array_to_f64(obj.get("y"), row, "y")?;

    if x.len() != y.len() {
        bail!("Row {row}: x has {} values but y has {}", x.len(), y.len());
    }

    let metadata = obj
        .iter()
        .filter(|(key, _)| key.as_str() != "x" && key.as_str() != "y")
        .map(|(key, val)| (key.clone(), json_to_metadata(val)))
        .collect();

    Ok(Scan {
        spectrum: Spectrum::new(x, y),
        metadata,
    })
}

fn json_array_to_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<Vec<f64>> {
    let arr = val
        .and_then(|v| v.as_array())
        .with_context(|| format!("Row {row}: missing or invalid '{col}' array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| {
            v.as_f64()
                .with_context(|| format!("Row {row}, {col}[{j}]: not a number"))
        })
        .collect()
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one scan per row.
/// `x` and `y` columns contain semicolon-separated floats:
///   `"400.0;400.5;401.0"`, `"12;14;11"`
/// All other columns are treated as metadata.
fn load_csv(path: &Path) -> Result<ScanList> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let x_idx = headers
        .iter()
        .position(|h| h == "x")
        .context("CSV missing 'x' column")?;
    let y_idx = headers
        .iter()
        .position(|h| h == "y")
        .context("CSV missing 'y' column")?;

    let mut scans = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let x = parse_semicolon_floats(record.get(x_idx).unwrap_or(""), row_no, "x")?;
        let y = parse_semicolon_floats(record.get(y_idx).unwrap_or(""), row_no, "y")?;

        if x.len() != y.len() {
            bail!(
                "CSV row {row_no}: x has {} values but y has {}",
                x.len(),
                y.len()
            );
        }

        let metadata = record
            .iter()
            .enumerate()
            .filter(|(col_idx, _)| *col_idx != x_idx && *col_idx != y_idx)
            .filter_map(|(col_idx, value)| {
                headers
                    .get(col_idx)
                    .map(|name| (name.clone(), guess_metadata_type(value)))
            })
            .collect();

        scans.push(Scan {
            spectrum: Spectrum::new(x, y),
            metadata,
        });
    }

    Ok(ScanList::new(scans))
}

fn parse_semicolon_floats(s: &str, row: usize, col: &str) -> Result<Vec<f64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, {col}[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return MetadataValue::Float(f);
    }
    if s == "true" || s == "false" {
        return MetadataValue::Bool(s == "true");
    }
    MetadataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one scan per row.
///
/// Expected schema:
/// - `x`: List<Float64> or LargeList<Float64> – wavelength arrays
/// - `y`: List<Float64> or LargeList<Float64> – intensity arrays
/// - Any other columns are treated as metadata (strings, ints, floats, bools)
fn load_parquet(path: &Path) -> Result<ScanList> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut scans = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        let x_col = batch.column(x_idx);
        let y_col = batch.column(y_idx);

        let meta_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != x_idx && *i != y_idx)
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let x = extract_f64_list(x_col, row)
                .with_context(|| format!("Row {row}: failed to read 'x'"))?;
            let y = extract_f64_list(y_col, row)
                .with_context(|| format!("Row {row}: failed to read 'y'"))?;

            if x.len() != y.len() {
                bail!("Row {row}: x has {} values but y has {}", x.len(), y.len());
            }

            let metadata: BTreeMap<String, MetadataValue> = meta_cols
                .iter()
                .map(|(col_idx, col_name)| {
                    (
                        col_name.clone(),
                        extract_metadata_value(batch.column(*col_idx), row),
                    )
                })
                .collect();

            scans.push(Scan {
                spectrum: Spectrum::new(x, y),
                metadata,
            });
        }
    }

    Ok(ScanList::new(scans))
}

// -- Parquet / Arrow helpers --

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
/// Null list elements are rejected.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }

    let values_array = match col.data_type() {
        DataType::List(_) => col
            .as_any()
            .downcast_ref::<ListArray>()
            .context("expected ListArray")?
            .value(row),
        DataType::LargeList(_) => col
            .as_any()
            .downcast_ref::<LargeListArray>()
            .context("expected LargeListArray")?
            .value(row),
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        f64_arr
            .iter()
            .enumerate()
            .map(|(j, v)| v.with_context(|| format!("null element at index {j}")))
            .collect()
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        f32_arr
            .iter()
            .enumerate()
            .map(|(j, v)| {
                v.map(f64::from)
                    .with_context(|| format!("null element at index {j}"))
            })
            .collect()
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}

/// Extract a single metadata value from an Arrow column at a given row.
fn extract_metadata_value(col: &Arc<dyn Array>, row: usize) -> MetadataValue {
    if col.is_null(row) {
        return MetadataValue::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| MetadataValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => Some(MetadataValue::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| MetadataValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| MetadataValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| MetadataValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| MetadataValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| MetadataValue::Bool(a.value(row))),
        _ => None,
    };
    value.unwrap_or_else(|| MetadataValue::String(format!("{:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{
        ArrayRef, Float32Builder, Float64Builder, LargeListBuilder, ListBuilder,
    };
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_parquet(columns: Vec<(&str, ArrayRef)>) -> tempfile::NamedTempFile {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let sink = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(sink, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn json_records_with_metadata() {
        let file = write_temp(
            ".json",
            r#"[
                {"x": [1.0, 2.0], "y": [10.0, 20.0], "center_wavelength": 1.5, "grating": "g2"},
                {"x": [3.0, 4.0], "y": [30.0, 40.0]}
            ]"#,
        );
        let scans = load_file(file.path()).unwrap();
        assert_eq!(scans.len(), 2);
        assert_eq!(scans.scans[0].spectrum.y, vec![10.0, 20.0]);
        assert_eq!(
            scans.scans[0].metadata.get("grating"),
            Some(&MetadataValue::String("g2".into()))
        );
        assert!(scans.scans[1].metadata.is_empty());
    }

    #[test]
    fn json_acquisition_payloads() {
        let file = write_temp(
            ".json",
            r#"[
                [{"roi": [{"xData": [3.0, 2.0, 1.0], "yData": [[30.0, 20.0, 10.0]]}]}],
                [{"roi": [{"xData": [5.0, 4.0], "yData": [[50.0, 40.0]]}]}]
            ]"#,
        );
        let scans = load_file(file.path()).unwrap();
        assert_eq!(scans.len(), 2);
        assert_eq!(scans.scans[0].spectrum.x, vec![3.0, 2.0, 1.0]);
        assert_eq!(scans.scans[1].spectrum.y, vec![50.0, 40.0]);
    }

    #[test]
    fn json_length_mismatch_is_reported() {
        let file = write_temp(".json", r#"[{"x": [1.0, 2.0], "y": [10.0]}]"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("x has 2 values but y has 1"));
    }

    #[test]
    fn csv_rows_become_scans() {
        let file = write_temp(
            ".csv",
            "x,y,exposure\n\"1;2;3\",\"10;20;30\",100\n\"3;4\",\"30;40\",\n",
        );
        let scans = load_file(file.path()).unwrap();
        assert_eq!(scans.len(), 2);
        assert_eq!(scans.scans[0].spectrum.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            scans.scans[0].metadata.get("exposure"),
            Some(&MetadataValue::Integer(100))
        );
        assert_eq!(scans.scans[1].metadata.get("exposure"), Some(&MetadataValue::Null));
    }

    #[test]
    fn every_format_loads_the_same_scans() {
        // x as List<Float64>, y as LargeList<Float32>
        let mut x = ListBuilder::new(Float64Builder::new());
        x.values().append_slice(&[402.0, 401.5, 401.0]);
        x.append(true);
        x.values().append_slice(&[401.25, 402.5]);
        x.append(true);
        let mut y = LargeListBuilder::new(Float32Builder::new());
        y.values().append_slice(&[12.5, 14.0, 11.0]);
        y.append(true);
        y.values().append_slice(&[-3.0, 20.25]);
        y.append(true);
        let centers = Float64Array::from(vec![401.5, 401.875]);
        let ids = Int64Array::from(vec![0, 1]);
        let gratings = StringArray::from(vec!["g1", "g2"]);
        let parquet = write_parquet(vec![
            ("x", Arc::new(x.finish()) as ArrayRef),
            ("y", Arc::new(y.finish()) as ArrayRef),
            ("center_wavelength", Arc::new(centers) as ArrayRef),
            ("scan_id", Arc::new(ids) as ArrayRef),
            ("grating", Arc::new(gratings) as ArrayRef),
        ]);

        let json = write_temp(
            ".json",
            r#"[
                {"x": [402.0, 401.5, 401.0], "y": [12.5, 14.0, 11.0],
                 "center_wavelength": 401.5, "scan_id": 0, "grating": "g1"},
                {"x": [401.25, 402.5], "y": [-3.0, 20.25],
                 "center_wavelength": 401.875, "scan_id": 1, "grating": "g2"}
            ]"#,
        );
        let csv = write_temp(
            ".csv",
            "x,y,center_wavelength,scan_id,grating\n\
             \"402;401.5;401\",\"12.5;14;11\",401.5,0,g1\n\
             \"401.25;402.5\",\"-3;20.25\",401.875,1,g2\n",
        );

        let from_parquet = load_file(parquet.path()).unwrap();
        assert_eq!(from_parquet.len(), 2);
        assert_eq!(from_parquet.scans[1].spectrum.y, vec![-3.0, 20.25]);
        assert_eq!(
            from_parquet.scans[0].metadata.get("scan_id"),
            Some(&MetadataValue::Integer(0))
        );
        assert_eq!(load_file(json.path()).unwrap(), from_parquet);
        assert_eq!(load_file(csv.path()).unwrap(), from_parquet);
    }

    #[test]
    fn parquet_null_wavelength_is_rejected() {
        let mut x = ListBuilder::new(Float64Builder::new());
        x.values().append_value(400.0);
        x.values().append_null();
        x.append(true);
        let mut y = ListBuilder::new(Float64Builder::new());
        y.values().append_slice(&[1.0, 2.0]);
        y.append(true);
        let file = write_parquet(vec![
            ("x", Arc::new(x.finish()) as ArrayRef),
            ("y", Arc::new(y.finish()) as ArrayRef),
        ]);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("null element at index 1"));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".txt", "");
        assert!(load_file(file.path()).is_err());
    }
}
