use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{PitchRecord, PitchTable};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// Columns every source file must carry. The four angle columns follow the
/// order of [`AngleFeature::ALL`](super::model::AngleFeature::ALL).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Pitcher",
    "TaggedPitchType",
    "VertRelAngle",
    "HorzRelAngle",
    "VertApprAngle",
    "HorzApprAngle",
];

/// Cell contents read as "missing": blanks and the common NA markers.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a pitch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`            – comma-delimited with a header row
/// * `.tsv` / `.tab`   – tab-delimited with a header row
/// * `.json`           – `[{ "Pitcher": "...", "TaggedPitchType": "...", ... }, ...]`
/// * `.parquet` / `.pq`
///
/// Rows missing any required field are dropped; the count is kept on the table.
pub fn load_file(path: &Path) -> Result<PitchTable, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} pitches from {} ({} rows dropped for missing values)",
        table.len(),
        path.display(),
        table.dropped_rows()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// A source row before validation; `None` marks a missing cell.
#[derive(Debug, Default)]
struct RawRow {
    pitcher: Option<String>,
    pitch_type: Option<String>,
    angles: [Option<f64>; 4],
}

impl RawRow {
    fn into_record(self) -> Option<PitchRecord> {
        let [vert_rel, horz_rel, vert_appr, horz_appr] = self.angles;
        Some(PitchRecord {
            pitcher: self.pitcher?,
            pitch_type: self.pitch_type?,
            vert_rel_angle: vert_rel?,
            horz_rel_angle: horz_rel?,
            vert_appr_angle: vert_appr?,
            horz_appr_angle: horz_appr?,
        })
    }
}

#[derive(Debug, Default)]
struct RowCollector {
    records: Vec<PitchRecord>,
    dropped: usize,
}

impl RowCollector {
    fn push(&mut self, row: RawRow) {
        match row.into_record() {
            Some(record) => self.records.push(record),
            None => self.dropped += 1,
        }
    }

    fn finish(self) -> PitchTable {
        if self.dropped > 0 {
            log::debug!("dropped {} incomplete rows", self.dropped);
        }
        PitchTable::new(self.records, self.dropped)
    }
}

/// Resolve the position of every required column, or name the ones absent.
fn required_positions<F>(position: F) -> Result<[usize; 6], DataLoadError>
where
    F: Fn(&str) -> Option<usize>,
{
    let found = REQUIRED_COLUMNS.map(|name| position(name));
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(found.iter())
        .filter(|(_, pos)| pos.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }
    Ok(found.map(|pos| pos.unwrap_or_default()))
}

fn parse_text(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if NA_VALUES.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_angle(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if NA_VALUES.contains(&trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; extra columns are ignored and short rows
/// are padded with missing cells.
fn load_delimited(path: &Path, delimiter: u8) -> Result<PitchTable, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    let [pitcher, pitch_type, vert_rel, horz_rel, vert_appr, horz_appr] =
        required_positions(|name| headers.iter().position(|h| h.trim() == name))?;

    let mut rows = RowCollector::default();
    for result in reader.records() {
        let record = result?;
        let text = |idx: usize| record.get(idx).and_then(parse_text);
        let angle = |idx: usize| record.get(idx).and_then(parse_angle);

        rows.push(RawRow {
            pitcher: text(pitcher),
            pitch_type: text(pitch_type),
            angles: [angle(vert_rel), angle(horz_rel), angle(vert_appr), angle(horz_appr)],
        });
    }

    Ok(rows.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Pitcher": "Smith, John", "TaggedPitchType": "Slider",
///     "VertRelAngle": -1.2, "HorzRelAngle": 2.8,
///     "VertApprAngle": -6.1, "HorzApprAngle": 0.4 },
///   ...
/// ]
/// ```
///
/// A column counts as present when at least one record carries the key.
fn load_json(path: &Path) -> Result<PitchTable, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataLoadError::Malformed("expected a top-level JSON array".into()))?;

    let objects: Vec<&Map<String, JsonValue>> = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .ok_or_else(|| DataLoadError::Malformed(format!("row {i} is not a JSON object")))
        })
        .collect::<Result<_, _>>()?;

    let keys: BTreeSet<&str> = objects
        .iter()
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();
    required_positions(|name| keys.contains(name).then_some(0))?;

    let [pitcher, pitch_type, vert_rel, horz_rel, vert_appr, horz_appr] = REQUIRED_COLUMNS;
    let mut rows = RowCollector::default();
    for obj in objects {
        let angle = |key: &str| obj.get(key).and_then(json_to_angle);
        rows.push(RawRow {
            pitcher: obj.get(pitcher).and_then(json_to_text),
            pitch_type: obj.get(pitch_type).and_then(json_to_text),
            angles: [angle(vert_rel), angle(horz_rel), angle(vert_appr), angle(horz_appr)],
        });
    }

    Ok(rows.finish())
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => parse_text(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_to_angle(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        JsonValue::String(s) => parse_angle(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of pitch rows.
///
/// Text columns may be any type castable to Utf8 (numeric pitcher ids work);
/// angle columns any type castable to Float64. Nulls and NaN are missing.
fn load_parquet(path: &Path) -> Result<PitchTable, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = builder.schema().clone();
    let [pitcher, pitch_type, vert_rel, horz_rel, vert_appr, horz_appr] =
        required_positions(|name| schema.index_of(name).ok())?;
    let reader = builder.build()?;

    let mut rows = RowCollector::default();
    for batch_result in reader {
        let batch = batch_result?;

        let pitchers = cast(batch.column(pitcher), &DataType::Utf8)?;
        let pitch_types = cast(batch.column(pitch_type), &DataType::Utf8)?;
        let angles = [vert_rel, horz_rel, vert_appr, horz_appr]
            .map(|idx| cast(batch.column(idx), &DataType::Float64));
        let [a0, a1, a2, a3] = angles;
        let angles = [a0?, a1?, a2?, a3?];

        let pitchers = pitchers.as_string::<i32>();
        let pitch_types = pitch_types.as_string::<i32>();
        let angles = angles.each_ref().map(|a| a.as_primitive::<Float64Type>());

        for row in 0..batch.num_rows() {
            let text = |col: &arrow::array::StringArray| {
                (!col.is_null(row)).then(|| col.value(row)).and_then(parse_text)
            };
            let angle = |i: usize| {
                let col = angles[i];
                (!col.is_null(row))
                    .then(|| col.value(row))
                    .filter(|v| v.is_finite())
            };

            rows.push(RawRow {
                pitcher: text(pitchers),
                pitch_type: text(pitch_types),
                angles: [angle(0), angle(1), angle(2), angle(3)],
            });
        }
    }

    Ok(rows.finish())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Pitcher,TaggedPitchType,VertRelAngle,HorzRelAngle,VertApprAngle,HorzApprAngle";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_rows_with_missing_required_fields_are_dropped() {
        let csv = format!(
            "{},Extra\n\
             \"Smith, John\",Fastball,-1.0,2.0,-5.0,0.5,x\n\
             \"Smith, John\",,-1.0,2.0,-5.0,0.5,x\n\
             Jones,Slider,NaN,2.0,-5.0,0.5,x\n\
             Jones,Slider,-1.2,NA,-5.0,0.5,x\n\
             ,Slider,-1.2,1.0,-5.0,0.5,x\n\
             Jones,Slider,-1.2,1.0,-5.5,0.25,\n\
             Jones,Cutter,-1.2,1.0\n",
            HEADER
        );
        let file = write_temp(".csv", &csv);

        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows(), 5);
        assert_eq!(table.len() + table.dropped_rows(), 7);
        assert_eq!(table.records()[0].pitcher, "Smith, John");
        assert_eq!(table.records()[1].horz_appr_angle, 0.25);
    }

    #[test]
    fn unparseable_angle_counts_as_missing() {
        let csv = format!("{}\nSmith,Slider,abc,1,2,3\nSmith,Slider,0,1,2,3\n", HEADER);
        let file = write_temp(".csv", &csv);

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_rows(), 1);
    }

    #[test]
    fn tab_delimited_files_are_supported() {
        let tsv = format!("{}\nSmith\tSinker\t1\t2\t3\t4\n", HEADER.replace(',', "\t"));
        let file = write_temp(".tsv", &tsv);

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].pitch_type, "Sinker");
        assert_eq!(table.records()[0].horz_appr_angle, 4.0);
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let file = write_temp(
            ".csv",
            "Pitcher,TaggedPitchType,VertRelAngle,HorzRelAngle,VertApprAngle\nA,B,1,2,3\n",
        );

        match load_file(file.path()) {
            Err(DataLoadError::MissingColumns(cols)) => assert_eq!(cols, vec!["HorzApprAngle"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here/pitches.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("pitches.csv"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn json_records_load_with_nulls_dropped() {
        let json = r#"[
            {"Pitcher": "Smith", "TaggedPitchType": "Slider", "VertRelAngle": -1.0,
             "HorzRelAngle": 2.0, "VertApprAngle": -5.0, "HorzApprAngle": 0.5},
            {"Pitcher": 1234, "TaggedPitchType": "Cutter", "VertRelAngle": "-1.5",
             "HorzRelAngle": 2.0, "VertApprAngle": -5.0, "HorzApprAngle": 0.5},
            {"Pitcher": "Smith", "TaggedPitchType": null, "VertRelAngle": -1.0,
             "HorzRelAngle": 2.0, "VertApprAngle": -5.0, "HorzApprAngle": 0.5},
            {"Pitcher": "Smith", "TaggedPitchType": "Slider", "VertRelAngle": -1.0,
             "HorzRelAngle": 2.0, "VertApprAngle": -5.0}
        ]"#;
        let file = write_temp(".json", json);

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows(), 2);
        assert_eq!(table.records()[1].pitcher, "1234");
        assert_eq!(table.records()[1].vert_rel_angle, -1.5);
    }

    #[test]
    fn json_without_required_key_anywhere_is_a_load_error() {
        let file = write_temp(".json", r#"[{"Pitcher": "Smith"}]"#);
        match load_file(file.path()) {
            Err(DataLoadError::MissingColumns(cols)) => assert_eq!(cols.len(), 5),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let file = write_temp(".json", r#"{"Pitcher": "Smith"}"#);
        assert!(matches!(load_file(file.path()), Err(DataLoadError::Malformed(_))));
    }

    #[test]
    fn parquet_nulls_and_nan_are_dropped() {
        let schema = Arc::new(Schema::new(
            REQUIRED_COLUMNS
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let dtype = if i < 2 { DataType::Utf8 } else { DataType::Float64 };
                    Field::new(*name, dtype, true)
                })
                .collect::<Vec<_>>(),
        ));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Smith"), Some("Smith"), None])),
                Arc::new(StringArray::from(vec![Some("Slider"), Some("Sinker"), Some("Slider")])),
                Arc::new(Float64Array::from(vec![Some(-1.0), Some(f64::NAN), Some(0.0)])),
                Arc::new(Float64Array::from(vec![Some(2.0), Some(1.0), Some(0.0)])),
                Arc::new(Float64Array::from(vec![Some(-5.0), Some(-4.0), Some(0.0)])),
                Arc::new(Float64Array::from(vec![Some(0.5), None, Some(0.0)])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_rows(), 2);
        assert_eq!(table.records()[0].pitch_type, "Slider");
        assert_eq!(table.records()[0].horz_appr_angle, 0.5);
    }
}
