use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::{
    LaunchDataset, LaunchOutcome, LaunchRecord, COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
};

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the launch columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv_reader(file)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} launches from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.launch_sites.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a headed CSV stream into a dataset. Rows are mapped to
/// [`LaunchRecord`] by column name.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: serde_json::Value = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if let Some(column) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
            return Err(LoadError::MissingColumn(*column))
                .with_context(|| format!("JSON row {i}"));
        }
        let record: LaunchRecord =
            serde_json::from_value(row.clone()).with_context(|| format!("JSON row {i}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch field.
///
/// Accepted column types:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32 or Float64 holding 0/1
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column(batch, COL_LAUNCH_SITE)?;
    let payloads = column(batch, COL_PAYLOAD_MASS)?;
    let classes = column(batch, COL_CLASS)?;
    let boosters = column(batch, COL_BOOSTER_CATEGORY)?;

    let offset = records.len();
    for row in 0..batch.num_rows() {
        let outcome =
            outcome_value(classes, row).with_context(|| format!("Row {}", offset + row))?;
        records.push(LaunchRecord {
            launch_site: string_value(sites, COL_LAUNCH_SITE, row)?,
            payload_mass_kg: numeric_value(payloads, COL_PAYLOAD_MASS, row)?,
            outcome,
            booster_version_category: string_value(boosters, COL_BOOSTER_CATEGORY, row)?,
        });
    }
    Ok(())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

fn string_value(col: &Arc<dyn Array>, name: &'static str, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => return Err(unsupported(name, other).into()),
    };
    Ok(value.to_string())
}

/// Nulls read as NaN, the way a numeric Pandas column would hold them.
fn numeric_value(col: &Arc<dyn Array>, name: &'static str, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        other => return Err(unsupported(name, other).into()),
    };
    Ok(value)
}

/// Floats must be exactly 0.0 or 1.0; null reads as NaN and is rejected too.
fn outcome_value(col: &Arc<dyn Array>, row: usize) -> Result<LaunchOutcome> {
    let class = numeric_value(col, COL_CLASS, row)?;
    if !class.is_finite() || class.fract() != 0.0 {
        return Err(LoadError::NonIntegralOutcome(class).into());
    }
    Ok(LaunchOutcome::try_from(class as i64)?)
}

fn unsupported(column: &'static str, data_type: &DataType) -> LoadError {
    LoadError::UnsupportedColumnType {
        column,
        data_type: format!("{data_type:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn root_cause(err: &anyhow::Error) -> Option<&LoadError> {
        err.chain().find_map(|e| e.downcast_ref::<LoadError>())
    }

    #[test]
    fn csv_ignores_extra_columns() {
        let csv = "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category,Booster Version\n\
                   1,CCAFS LC-40,0,0.0,v1.0,F9 v1.0  B0003\n\
                   2,KSC LC-39A,1,2490,FT,F9 FT B1031.1\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].launch_site, "KSC LC-39A");
        assert_eq!(ds.records[1].payload_mass_kg, 2490.0);
        assert_eq!(ds.records[1].outcome, LaunchOutcome::Success);
        assert_eq!(ds.records[1].booster_version_category, "FT");
    }

    #[test]
    fn csv_missing_column_is_reported_by_name() {
        let csv = "Launch Site,class,Booster Version Category\nKSC LC-39A,1,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            root_cause(&err),
            Some(LoadError::MissingColumn("Payload Mass (kg)"))
        ));
    }

    #[test]
    fn csv_rejects_non_binary_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   KSC LC-39A,100,1,FT\n\
                   KSC LC-39A,100,3,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn csv_malformed_payload_names_the_row() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   KSC LC-39A,heavy,1,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600, "class": 1,
             "Booster Version Category": "B5", "Flight Number": 50},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 4990.0, "class": 0,
             "Booster Version Category": "FT"}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].payload_mass_kg, 9600.0);
        assert_eq!(ds.records[1].outcome, LaunchOutcome::Failure);
    }

    #[test]
    fn json_missing_column_is_reported() {
        let json = r#"[{"Launch Site": "VAFB SLC-4E", "class": 1, "Booster Version Category": "B5"}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(matches!(
            root_cause(&err),
            Some(LoadError::MissingColumn("Payload Mass (kg)"))
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(
            root_cause(&err),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    fn write_parquet(name: &str, batch: &RecordBatch) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "launch-dashboard-{name}-{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        path
    }

    fn float_class_batch(classes: Vec<Option<f64>>) -> RecordBatch {
        let n = classes.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Float64, true),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"; n])),
                Arc::new(Float64Array::from(vec![500.0; n])),
                Arc::new(Float64Array::from(classes)),
                Arc::new(StringArray::from(vec!["FT"; n])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn parquet_float_class_accepts_whole_values() {
        let path = write_parquet("float-class", &float_class_batch(vec![Some(1.0), Some(0.0)]));
        let ds = load_file(&path);
        std::fs::remove_file(&path).ok();
        let outcomes: Vec<LaunchOutcome> =
            ds.unwrap().records.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, vec![LaunchOutcome::Success, LaunchOutcome::Failure]);
    }

    #[test]
    fn parquet_rejects_fractional_class() {
        let path = write_parquet("fractional-class", &float_class_batch(vec![Some(0.9)]));
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            root_cause(&err),
            Some(LoadError::NonIntegralOutcome(v)) if *v == 0.9
        ));
        assert!(format!("{err:#}").contains("Row 0"));
    }

    #[test]
    fn parquet_rejects_null_class() {
        let path = write_parquet("null-class", &float_class_batch(vec![Some(1.0), None]));
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            root_cause(&err),
            Some(LoadError::NonIntegralOutcome(v)) if v.is_nan()
        ));
        assert!(format!("{err:#}").contains("Row 1"));
    }

    #[test]
    fn parquet_file_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
                Arc::new(Float64Array::from(vec![5300.0, 500.0])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(StringArray::from(vec!["FT", "v1.1"])),
            ],
        )
        .unwrap();

        let path = write_parquet("loader", &batch);
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.launch_sites, vec!["KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(ds.records[0].outcome, LaunchOutcome::Failure);
        assert_eq!(ds.records[1].payload_mass_kg, 500.0);
        assert_eq!(ds.payload_bounds.unwrap().max, 5300.0);
    }
}
