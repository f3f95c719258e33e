use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, StripError};

// ---------------------------------------------------------------------------
// Matrix – the loaded wide table
// ---------------------------------------------------------------------------

/// A feature × sample intensity table.
///
/// Values are stored row-major. Label → index maps are built once in
/// [`Matrix::new`] and every later lookup goes through them.
#[derive(Debug, Clone)]
pub struct Matrix {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: Vec<f64>,
    row_index: BTreeMap<String, usize>,
    column_index: BTreeMap<String, usize>,
}

impl Matrix {
    /// Build a matrix from labels and row-major values.
    ///
    /// Duplicate labels resolve to their first occurrence.
    pub fn new(row_labels: Vec<String>, column_labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if values.len() != row_labels.len() * column_labels.len() {
            return Err(StripError::DataFormat(format!(
                "expected {} x {} values, got {}",
                row_labels.len(),
                column_labels.len(),
                values.len()
            )));
        }

        let mut row_index = BTreeMap::new();
        for (i, label) in row_labels.iter().enumerate() {
            if row_index.contains_key(label) {
                log::warn!("duplicate row label '{label}' (row {i}); lookups use the first occurrence");
                continue;
            }
            row_index.insert(label.clone(), i);
        }

        let mut column_index = BTreeMap::new();
        for (j, label) in column_labels.iter().enumerate() {
            column_index.entry(label.clone()).or_insert(j);
        }

        Ok(Matrix {
            row_labels,
            column_labels,
            values,
            row_index,
            column_index,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_columns(&self) -> usize {
        self.column_labels.len()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Cell value by position.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.column_labels.len() + col]
    }

    pub fn row_position(&self, label: &str) -> Option<usize> {
        self.row_index.get(label).copied()
    }

    pub fn column_position(&self, label: &str) -> Option<usize> {
        self.column_index.get(label).copied()
    }

    /// Resolve target labels to row positions, keeping their order.
    ///
    /// Fails on the first label the matrix does not carry.
    pub fn resolve_rows(&self, labels: &[String]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                self.row_position(label)
                    .ok_or_else(|| StripError::RowNotFound(label.clone()))
            })
            .collect()
    }

    /// Values of the named column at the given rows, aligned with `rows`.
    pub fn column_values(&self, column: &str, rows: &[usize]) -> Result<Vec<f64>> {
        let col = self
            .column_position(column)
            .ok_or_else(|| StripError::MissingColumn(column.to_string()))?;
        Ok(rows.iter().map(|&row| self.get(row, col)).collect())
    }
}

// ---------------------------------------------------------------------------
// Long format
// ---------------------------------------------------------------------------

/// One observation: a single replicate value of one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub intensity: f64,
    #[serde(rename = "feature")]
    pub feature_label: String,
    #[serde(rename = "sample")]
    pub sample_group: String,
}

impl LongRecord {
    pub fn new(intensity: f64, feature_label: impl Into<String>, sample_group: impl Into<String>) -> Self {
        LongRecord {
            intensity,
            feature_label: feature_label.into(),
            sample_group: sample_group.into(),
        }
    }
}

/// Ordered long-format records, ready for categorical plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    pub records: Vec<LongRecord>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append all records of `other` after this table's records.
    pub fn concat(mut self, other: LongTable) -> LongTable {
        self.records.extend(other.records);
        self
    }

    /// Distinct values of `pick` in first-appearance order.
    fn distinct_by<'a>(&'a self, pick: impl Fn(&'a LongRecord) -> &'a str) -> Vec<String> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut ordered = Vec::new();
        for rec in &self.records {
            let value = pick(rec);
            if seen.insert(value) {
                ordered.push(value.to_string());
            }
        }
        ordered
    }

    /// Feature labels in first-appearance order.
    pub fn features(&self) -> Vec<String> {
        self.distinct_by(|r| r.feature_label.as_str())
    }

    /// Sample group tags in first-appearance order.
    pub fn groups(&self) -> Vec<String> {
        self.distinct_by(|r| r.sample_group.as_str())
    }

    /// Write the table as CSV with an `intensity,feature,sample` header.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for rec in &self.records {
            wtr.serialize(rec)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_matrix() -> Matrix {
        // 3 features × 2 samples, "g1" duplicated
        Matrix::new(
            labels(&["g1", "g2", "g1"]),
            labels(&["A1", "A2"]),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_mismatch_is_data_format() {
        let err = Matrix::new(labels(&["g1"]), labels(&["A1", "A2"]), vec![1.0]).unwrap_err();
        assert!(matches!(err, StripError::DataFormat(_)));
    }

    #[test]
    fn test_get_and_positions() {
        let mat = create_test_matrix();
        assert_eq!(mat.n_rows(), 3);
        assert_eq!(mat.n_columns(), 2);
        assert_eq!(mat.get(1, 1), 4.0);
        assert_eq!(mat.column_position("A2"), Some(1));
        assert_eq!(mat.column_position("B1"), None);
    }

    #[test]
    fn test_duplicate_label_resolves_to_first_row() {
        let mat = create_test_matrix();
        assert_eq!(mat.row_position("g1"), Some(0));
    }

    #[test]
    fn test_resolve_rows_keeps_order_and_duplicates() {
        let mat = create_test_matrix();
        let rows = mat.resolve_rows(&labels(&["g2", "g1", "g2"])).unwrap();
        assert_eq!(rows, vec![1, 0, 1]);
    }

    #[test]
    fn test_resolve_rows_missing_label() {
        let mat = create_test_matrix();
        let err = mat.resolve_rows(&labels(&["g1", "nope"])).unwrap_err();
        assert!(matches!(err, StripError::RowNotFound(ref l) if l == "nope"));
    }

    #[test]
    fn test_column_values_aligned_with_rows() {
        let mat = create_test_matrix();
        assert_eq!(mat.column_values("A2", &[1, 0]).unwrap(), vec![4.0, 2.0]);
        assert!(matches!(
            mat.column_values("rt", &[0]),
            Err(StripError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_features_and_groups_first_appearance() {
        let table = LongTable {
            records: vec![
                LongRecord::new(1.0, "b", "s1"),
                LongRecord::new(2.0, "a", "s1"),
                LongRecord::new(3.0, "b", "s2"),
            ],
        };
        assert_eq!(table.features(), vec!["b", "a"]);
        assert_eq!(table.groups(), vec!["s1", "s2"]);
    }

    #[test]
    fn test_features_deduplicated_across_many_records() {
        let records = (0..300)
            .map(|i| LongRecord::new(i as f64, format!("f{}", i % 100), if i < 150 { "s1" } else { "s2" }))
            .collect();
        let table = LongTable { records };
        let features = table.features();
        assert_eq!(features.len(), 100);
        assert_eq!(features[0], "f0");
        assert_eq!(features[99], "f99");
        assert_eq!(table.groups(), vec!["s1", "s2"]);
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let table = LongTable {
            records: vec![LongRecord::new(1.5, "gene1", "s1")],
        };
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "intensity,feature,sample\n1.5,gene1,s1\n");
    }
}
