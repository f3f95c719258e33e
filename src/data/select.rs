use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Result, StripError};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Where the target feature labels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    Single(String),
    File(PathBuf),
}

impl RowSource {
    /// Pick a source from the two optional command-line inputs.
    ///
    /// A label file wins over a single label when both are present.
    pub fn from_options(label: Option<String>, file: Option<PathBuf>) -> Result<Self> {
        match (label, file) {
            (Some(label), Some(file)) => {
                log::warn!(
                    "both a row label ('{label}') and a label file ({}) given; using the file",
                    file.display()
                );
                Ok(RowSource::File(file))
            }
            (None, Some(file)) => Ok(RowSource::File(file)),
            (Some(label), None) => Ok(RowSource::Single(label)),
            (None, None) => Err(StripError::MissingSelection(
                "pass --target_row_label or --row_label_file".to_string(),
            )),
        }
    }

    /// Resolve the source into an ordered, non-empty label list.
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            RowSource::Single(label) => Ok(vec![label.clone()]),
            RowSource::File(path) => {
                let labels = read_label_file(path)?;
                if labels.is_empty() {
                    return Err(StripError::MissingSelection(format!(
                        "label file {} has no labels",
                        path.display()
                    )));
                }
                log::info!("Read {} row labels from {}", labels.len(), path.display());
                Ok(labels)
            }
        }
    }
}

/// Read one label per line. Trailing whitespace is stripped, blank lines
/// are dropped, order and duplicates are kept.
pub fn read_label_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_labels(&text))
}

fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Columns assigned to one sample group.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub tag: String,
    /// Matrix column positions, in matrix order.
    pub indices: Vec<usize>,
    pub labels: Vec<String>,
}

impl ColumnGroup {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Columns whose label matches `pattern` at its start.
pub fn match_columns(columns: &[String], pattern: &str, tag: &str) -> Result<ColumnGroup> {
    let re = Regex::new(&format!("^(?:{pattern})")).map_err(|source| StripError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let (indices, labels): (Vec<usize>, Vec<String>) = columns
        .iter()
        .enumerate()
        .filter(|(_, label)| re.is_match(label.as_str()))
        .map(|(i, label)| (i, label.clone()))
        .unzip();

    Ok(ColumnGroup {
        tag: tag.to_string(),
        indices,
        labels,
    })
}

/// Build both sample groups. Fails only when neither pattern matched.
///
/// The groups are not checked for overlap.
pub fn select_groups(
    columns: &[String],
    s1_pattern: &str,
    s2_pattern: &str,
) -> Result<(ColumnGroup, ColumnGroup)> {
    let s1 = match_columns(columns, s1_pattern, "s1")?;
    let s2 = match_columns(columns, s2_pattern, "s2")?;

    if s1.is_empty() && s2.is_empty() {
        return Err(StripError::NoColumnsMatched {
            s1: s1_pattern.to_string(),
            s2: s2_pattern.to_string(),
        });
    }
    for group in [&s1, &s2] {
        if group.is_empty() {
            log::warn!("group {} matched no columns", group.tag);
        } else {
            log::info!("group {}: {:?}", group.tag, group.labels);
        }
    }

    Ok((s1, s2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn columns(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_neither_source_is_missing_selection() {
        let err = RowSource::from_options(None, None).unwrap_err();
        assert!(matches!(err, StripError::MissingSelection(_)));
    }

    #[test]
    fn test_single_label_source() {
        let src = RowSource::from_options(Some("gene1".into()), None).unwrap();
        assert_eq!(src.resolve().unwrap(), vec!["gene1"]);
    }

    #[test]
    fn test_file_wins_over_single_label() {
        let src = RowSource::from_options(Some("gene1".into()), Some(PathBuf::from("ids.txt"))).unwrap();
        assert_eq!(src, RowSource::File(PathBuf::from("ids.txt")));
    }

    #[test]
    fn test_label_file_skips_blanks_keeps_order_and_duplicates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "p2  \n\np1\n   \np2\r\n").unwrap();
        file.flush().unwrap();

        let labels = RowSource::File(file.path().to_path_buf()).resolve().unwrap();
        assert_eq!(labels, vec!["p2", "p1", "p2"]);
    }

    #[test]
    fn test_blank_label_file_is_missing_selection() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\n\n").unwrap();
        let err = RowSource::File(file.path().to_path_buf()).resolve().unwrap_err();
        assert!(matches!(err, StripError::MissingSelection(_)));
    }

    #[test]
    fn test_match_is_prefix_anchored_and_ordered() {
        let cols = columns(&["B1", "A1", "xA2", "A2", "A10"]);
        let group = match_columns(&cols, "A", "s1").unwrap();
        assert_eq!(group.labels, vec!["A1", "A2", "A10"]);
        assert_eq!(group.indices, vec![1, 3, 4]);
    }

    #[test]
    fn test_match_is_not_full_match() {
        let cols = columns(&["A1_rep", "A1"]);
        let group = match_columns(&cols, "A1", "s1").unwrap();
        assert_eq!(group.labels, vec!["A1_rep", "A1"]);
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let cols = columns(&["xB", "A1", "B1"]);
        let group = match_columns(&cols, "A|B", "s1").unwrap();
        assert_eq!(group.labels, vec!["A1", "B1"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = match_columns(&columns(&["A1"]), "(", "s1").unwrap_err();
        assert!(matches!(err, StripError::InvalidPattern { .. }));
    }

    #[test]
    fn test_select_groups_split() {
        let cols = columns(&["A1", "A2", "B1", "B2"]);
        let (s1, s2) = select_groups(&cols, "^A", "^B").unwrap();
        assert_eq!(s1.labels, vec!["A1", "A2"]);
        assert_eq!(s2.labels, vec!["B1", "B2"]);
        assert_eq!(s2.tag, "s2");
    }

    #[test]
    fn test_one_empty_group_tolerated() {
        let cols = columns(&["A1", "A2"]);
        let (s1, s2) = select_groups(&cols, "A", "B").unwrap();
        assert_eq!(s1.len(), 2);
        assert!(s2.is_empty());
    }

    #[test]
    fn test_overlapping_groups_not_rejected() {
        let cols = columns(&["A1", "A2"]);
        let (s1, s2) = select_groups(&cols, "A", "A2").unwrap();
        assert_eq!(s1.labels, vec!["A1", "A2"]);
        assert_eq!(s2.labels, vec!["A2"]);
    }

    #[test]
    fn test_both_empty_is_no_columns_matched() {
        let cols = columns(&["A1", "A2"]);
        let err = select_groups(&cols, "X", "Y").unwrap_err();
        assert!(matches!(err, StripError::NoColumnsMatched { .. }));
    }
}
