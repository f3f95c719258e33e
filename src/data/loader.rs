use std::path::Path;

use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::Matrix;
use crate::error::{Result, StripError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an expression matrix from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – first field holds row labels, the rest are numeric
/// * anything else      – delimited text, split on `delimiter`
///
/// Either way the first column is the row label and is kept as text.
pub fn load_file(path: &Path, delimiter: u8) -> Result<Matrix> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let matrix = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        _ => load_delimited(path, delimiter)?,
    };

    if matrix.n_rows() == 0 {
        return Err(StripError::DataFormat(format!(
            "{}: no data rows",
            path.display()
        )));
    }
    log::info!(
        "Loaded {} rows x {} columns from {}",
        matrix.n_rows(),
        matrix.n_columns(),
        path.display()
    );
    Ok(matrix)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Layout: header row, then one row per feature. Labels and headers are
/// kept exactly as written.
///
/// ```text
/// id      A1   A2   B1   B2
/// gene1   1.0  2.0  3.0  4.0
/// ```
fn load_delimited(path: &Path, delimiter: u8) -> Result<Matrix> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(StripError::DataFormat(format!(
            "{}: header needs a label column and at least one sample column",
            path.display()
        )));
    }
    let column_labels: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut row_labels = Vec::new();
    let mut values = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Unequal record lengths surface here as csv errors.
        let record = result.map_err(|e| StripError::DataFormat(format!("row {row_no}: {e}")))?;

        let mut fields = record.iter();
        let label = fields.next().unwrap_or("").to_string();
        for (col_no, cell) in fields.enumerate() {
            values.push(parse_cell(cell, row_no, &column_labels[col_no])?);
        }
        row_labels.push(label);
    }

    Matrix::new(row_labels, column_labels, values)
}

fn open_error(path: &Path, e: csv::Error) -> StripError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StripError::Io(io),
        other => StripError::DataFormat(format!("{}: {other:?}", path.display())),
    }
}

/// Parse one intensity cell. Blank cells and NA tokens become NaN.
fn parse_cell(s: &str, row: usize, col: &str) -> Result<f64> {
    let s = s.trim();
    match s {
        "" | "NA" | "NaN" | "nan" | "null" => Ok(f64::NAN),
        _ => s.parse::<f64>().map_err(|_| {
            StripError::DataFormat(format!("row {row}, column '{col}': '{s}' is not a number"))
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet expression matrix.
///
/// The first field is the row label column and may have any type; its
/// values are rendered to text. Every other field must be castable to
/// Float64. Nulls become NaN.
fn load_parquet(path: &Path) -> Result<Matrix> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_error)?;
    let reader = builder.build().map_err(parquet_error)?;

    let mut column_labels: Option<Vec<String>> = None;
    let mut row_labels = Vec::new();
    let mut values = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(parquet_error)?;
        let schema = batch.schema();

        if column_labels.is_none() {
            if schema.fields().len() < 2 {
                return Err(StripError::DataFormat(
                    "parquet file needs a label column and at least one sample column".to_string(),
                ));
            }
            column_labels = Some(schema.fields().iter().skip(1).map(|f| f.name().clone()).collect());
        }

        let label_col = batch.column(0);
        let mut casted = Vec::with_capacity(batch.num_columns() - 1);
        for idx in 1..batch.num_columns() {
            let col = cast(batch.column(idx).as_ref(), &DataType::Float64).map_err(|e| {
                StripError::DataFormat(format!("column '{}': {e}", schema.field(idx).name()))
            })?;
            casted.push(col);
        }
        let numeric: Vec<&Float64Array> = casted
            .iter()
            .map(|col| {
                col.as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| StripError::DataFormat("expected Float64 column".to_string()))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let label = array_value_to_string(label_col.as_ref(), row).map_err(parquet_error)?;
            row_labels.push(label);
            for arr in &numeric {
                values.push(if arr.is_null(row) { f64::NAN } else { arr.value(row) });
            }
        }
    }

    Matrix::new(row_labels, column_labels.unwrap_or_default(), values)
}

fn parquet_error(e: impl std::fmt::Display) -> StripError {
    StripError::DataFormat(format!("parquet: {e}"))
}
