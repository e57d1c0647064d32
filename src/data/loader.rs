use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    Cell, Column, ColumnKind, Dataset, PassengerRecord, Schema, AGE, EMBARKED, FARE, PCLASS,
    REQUIRED_COLUMNS, SEX, SURVIVED,
};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the passenger dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (or no extension) – comma-delimited with a header row
/// * `.tsv`                   – tab-delimited with a header row
/// * `.json`                  – `[{ "Sex": "male", "Pclass": 3, ... }, ...]`
/// * `.parquet` / `.pq`       – flat columns, as written by `df.to_parquet()`
///
/// A path that does not exist yields [`DataError::MissingDataSource`].
pub fn load_file(path: &Path) -> Result<Dataset> {
    if !path.is_file() {
        return Err(DataError::MissingDataSource {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    let dataset = build_dataset(table)?;
    log::info!(
        "Loaded {} passengers from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset
            .schema()
            .columns()
            .iter()
            .map(|c| format!("{}:{:?}", c.name, c.kind))
            .collect::<Vec<_>>()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// RawTable – untyped rows shared by every reader
// ---------------------------------------------------------------------------

/// Header plus rows of loosely-typed cells, before the schema is applied.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

static MISSING: Cell = Cell::Missing;

/// Apply the passenger schema to a raw table.
///
/// Column kinds are inferred over the whole table. Required columns must be
/// present and their cells must fit the typed fields of [`PassengerRecord`].
pub fn build_dataset(table: RawTable) -> Result<Dataset> {
    let position = |name: &str| {
        table
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let sex_idx = position(SEX)?;
    let pclass_idx = position(PCLASS)?;
    let age_idx = position(AGE)?;
    let fare_idx = position(FARE)?;
    let embarked_idx = position(EMBARKED)?;
    let survived_idx = position(SURVIVED)?;

    // Delimited readers hand over text; numbers are recognised here so that
    // text columns can keep their cells exactly as written.
    let typed: Vec<Vec<Cell>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(typed_cell).collect())
        .collect();

    let columns: Vec<Column> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column {
            name: name.clone(),
            kind: ColumnKind::infer(typed.iter().filter_map(|r| r.get(i))),
        })
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for (index, (raw, row)) in table.rows.iter().zip(&typed).enumerate() {
        let row_no = index + 1;
        let cell = |i: usize| row.get(i).unwrap_or(&MISSING);
        let text = |i: usize| source_text(raw.get(i).unwrap_or(&MISSING));

        let sex = match cell(sex_idx) {
            c if c.is_missing() => return Err(invalid(row_no, SEX, c)),
            _ => text(sex_idx),
        };

        let pclass = match cell(pclass_idx) {
            Cell::Integer(i) => *i,
            Cell::Float(f) if f.fract() == 0.0 => *f as i64,
            c => return Err(invalid(row_no, PCLASS, c)),
        };

        let age = match cell(age_idx) {
            c if c.is_missing() => None,
            c => Some(c.as_f64().ok_or_else(|| invalid(row_no, AGE, c))?),
        };

        let fare = cell(fare_idx)
            .as_f64()
            .ok_or_else(|| invalid(row_no, FARE, cell(fare_idx)))?;

        let embarked = match cell(embarked_idx) {
            c if c.is_missing() => None,
            _ => Some(text(embarked_idx)),
        };

        let survived = match cell(survived_idx).as_f64() {
            Some(v) if v == 0.0 => false,
            Some(v) if v == 1.0 => true,
            _ => return Err(invalid(row_no, SURVIVED, cell(survived_idx))),
        };

        let extra: BTreeMap<String, Cell> = columns
            .iter()
            .enumerate()
            .filter(|(_, col)| !REQUIRED_COLUMNS.contains(&col.name.as_str()))
            .map(|(i, col)| {
                let value = match (col.kind, cell(i)) {
                    (ColumnKind::Text, c) if !c.is_missing() => Cell::Text(text(i)),
                    (_, c) if c.is_missing() => Cell::Missing,
                    (_, c) => c.clone(),
                };
                (col.name.clone(), value)
            })
            .collect();

        records.push(PassengerRecord {
            index,
            sex,
            pclass,
            age,
            fare,
            embarked,
            survived,
            extra,
        });
    }

    Ok(Dataset::new(Schema::new(columns), records))
}

/// Numeric reading of a text cell; other cells are already typed.
fn typed_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(s) => Cell::parse(s),
        c => c.clone(),
    }
}

/// The cell as it appeared in the file, for columns stored as text.
fn source_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Float(v) => v.to_string(),
        c => c.to_string(),
    }
}

fn invalid(row: usize, column: &str, cell: &Cell) -> DataError {
    DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: match cell {
            Cell::Missing => String::new(),
            c => c.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one passenger per line.
/// Empty cells (and the literal `NaN`) are missing values.
fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(raw_text_cell).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Empty cells and the literal `NaN` are missing; anything else is kept
/// verbatim (trimmed) until the schema is applied.
fn raw_text_cell(s: &str) -> Cell {
    match Cell::parse(s) {
        Cell::Missing => Cell::Missing,
        _ => Cell::Text(s.trim().to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Survived": 0, "Pclass": 3, "Sex": "male", "Age": 22.0, "Fare": 7.25, "Embarked": "S" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys over all records; a key absent from a
/// record is a missing value.
fn read_json(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let root: JsonValue = serde_json::from_reader(BufReader::new(file))?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::Malformed("expected top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::Malformed(format!("row {} is not a JSON object", i + 1)))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map_or(Cell::Missing, json_to_cell))
                .collect::<Vec<Cell>>()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => raw_text_cell(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Integer(i64::from(*b)),
        JsonValue::Null => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per attribute.
///
/// Integer, float, string and boolean columns map onto [`Cell`] directly;
/// anything else (dictionary-encoded categoricals, dates) is rendered to text.
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect::<Result<Vec<_>>>()?,
            );
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Missing);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| raw_text_cell(a.value(row))),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| raw_text_cell(a.value(row))),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| Cell::Integer(i64::from(a.value(row)))),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| Cell::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| Cell::Float(f64::from(a.value(row)))),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| Cell::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map(|a| Cell::Integer(i64::from(a.value(row)))),
        _ => None,
    };
    match cell {
        Some(c) => Ok(c),
        None => Ok(raw_text_cell(&array_value_to_string(col.as_ref(), row)?)),
    }
}
