use super::model::{LongRecord, LongTable, Matrix};
use super::select::ColumnGroup;

// ---------------------------------------------------------------------------
// Wide → long reshaping
// ---------------------------------------------------------------------------

/// Label shown on the x axis for an annotated feature: the part of the row
/// label before the first `|`, then `|` and the value with three decimals.
pub fn annotated_label(row_label: &str, value: f64) -> String {
    let prefix = row_label.split('|').next().unwrap_or(row_label);
    format!("{prefix}|{value:.3}")
}

/// Reshape one column group into long records.
///
/// `rows` are matrix row positions in selection order and `annotation`,
/// when present, is aligned with them position by position. Records are
/// emitted column by column, and within a column row by row, so the
/// result holds `rows.len() * group.len()` records.
pub fn reshape_group(
    matrix: &Matrix,
    rows: &[usize],
    group: &ColumnGroup,
    annotation: Option<&[f64]>,
) -> LongTable {
    let labels: Vec<String> = match annotation {
        Some(values) => rows
            .iter()
            .zip(values)
            .map(|(&row, &value)| annotated_label(&matrix.row_labels()[row], value))
            .collect(),
        None => rows.iter().map(|&row| matrix.row_labels()[row].clone()).collect(),
    };

    let mut records = Vec::with_capacity(rows.len() * group.len());
    for &col in &group.indices {
        for (&row, label) in rows.iter().zip(&labels) {
            records.push(LongRecord::new(matrix.get(row, col), label.clone(), group.tag.clone()));
        }
    }
    log::debug!("group {}: {} records", group.tag, records.len());

    LongTable { records }
}

/// Reshape both groups and merge them, group 1 first.
pub fn build_plot_table(
    matrix: &Matrix,
    rows: &[usize],
    groups: (&ColumnGroup, &ColumnGroup),
    annotation: Option<&[f64]>,
) -> LongTable {
    let (s1, s2) = groups;
    reshape_group(matrix, rows, s1, annotation).concat(reshape_group(matrix, rows, s2, annotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::select::select_groups;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_matrix() -> Matrix {
        Matrix::new(
            strings(&["gene1", "protein42|extra", "p|q|r"]),
            strings(&["A1", "A2", "B1", "B2", "rt"]),
            vec![
                1.0, 2.0, 3.0, 4.0, 0.5, //
                10.0, 20.0, 30.0, 40.0, 3.14159, //
                5.0, 6.0, 7.0, 8.0, 2.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_single_feature_two_groups() {
        let mat = create_test_matrix();
        let (s1, s2) = select_groups(mat.column_labels(), "^A", "^B").unwrap();
        let rows = mat.resolve_rows(&strings(&["gene1"])).unwrap();

        assert_eq!(
            reshape_group(&mat, &rows, &s1, None).records,
            vec![LongRecord::new(1.0, "gene1", "s1"), LongRecord::new(2.0, "gene1", "s1")]
        );
        assert_eq!(
            reshape_group(&mat, &rows, &s2, None).records,
            vec![LongRecord::new(3.0, "gene1", "s2"), LongRecord::new(4.0, "gene1", "s2")]
        );
    }

    #[test]
    fn test_merged_table_puts_group_one_first() {
        let mat = create_test_matrix();
        let (s1, s2) = select_groups(mat.column_labels(), "A", "B").unwrap();
        let rows = mat.resolve_rows(&strings(&["gene1"])).unwrap();
        let merged = build_plot_table(&mat, &rows, (&s1, &s2), None);

        let tags: Vec<&str> = merged.records.iter().map(|r| r.sample_group.as_str()).collect();
        assert_eq!(tags, vec!["s1", "s1", "s2", "s2"]);
    }

    #[test]
    fn test_record_count_and_column_major_order() {
        let mat = create_test_matrix();
        let (s1, _) = select_groups(mat.column_labels(), "A", "B").unwrap();
        let rows = mat.resolve_rows(&strings(&["p|q|r", "gene1", "p|q|r"])).unwrap();
        let table = reshape_group(&mat, &rows, &s1, None);

        assert_eq!(table.len(), 3 * 2);
        let values: Vec<f64> = table.records.iter().map(|r| r.intensity).collect();
        assert_eq!(values, vec![5.0, 1.0, 5.0, 6.0, 2.0, 6.0]);
        assert!(table.records.iter().all(|r| r.feature_label == "p|q|r" || r.feature_label == "gene1"));
    }

    #[test]
    fn test_empty_group_yields_empty_table() {
        let mat = create_test_matrix();
        let (_, s2) = select_groups(mat.column_labels(), "A", "Z").unwrap();
        let rows = mat.resolve_rows(&strings(&["gene1"])).unwrap();
        assert!(reshape_group(&mat, &rows, &s2, None).is_empty());
    }

    #[test]
    fn test_annotated_label_formatting() {
        assert_eq!(annotated_label("protein42|extra", 3.14159), "protein42|3.142");
        assert_eq!(annotated_label("p|q|r", 2.0), "p|2.000");
        assert_eq!(annotated_label("gene1", 0.5), "gene1|0.500");
    }

    #[test]
    fn test_annotation_follows_selection_order() {
        let mat = create_test_matrix();
        let (s1, _) = select_groups(mat.column_labels(), "A1", "B").unwrap();
        let rows = mat.resolve_rows(&strings(&["protein42|extra", "gene1"])).unwrap();
        let annot = mat.column_values("rt", &rows).unwrap();
        let table = reshape_group(&mat, &rows, &s1, Some(&annot));

        assert_eq!(
            table.records,
            vec![
                LongRecord::new(10.0, "protein42|3.142", "s1"),
                LongRecord::new(1.0, "gene1|0.500", "s1"),
            ]
        );
    }
}
