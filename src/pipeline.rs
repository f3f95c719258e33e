use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::data::loader::load_file;
use crate::data::model::LongTable;
use crate::data::reshape::build_plot_table;
use crate::data::select::{select_groups, RowSource};
use crate::error::Result;
use crate::render::RenderConfig;

// ---------------------------------------------------------------------------
// One validated run
// ---------------------------------------------------------------------------

/// Everything a run needs, validated from the command line.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub matrix_path: PathBuf,
    pub delimiter: u8,
    pub s1_pattern: String,
    pub s2_pattern: String,
    pub rows: RowSource,
    pub annotation_column: Option<String>,
    pub long_out: Option<PathBuf>,
    pub render: RenderConfig,
}

/// Load, select and reshape: everything up to the plot input.
///
/// Stages fail in order: label file, matrix, column groups, row lookup,
/// annotation column. No records are built before all of them pass.
pub fn prepare(request: &PlotRequest) -> Result<LongTable> {
    let labels = request.rows.resolve()?;
    let matrix = load_file(&request.matrix_path, request.delimiter)?;

    let (s1, s2) = select_groups(matrix.column_labels(), &request.s1_pattern, &request.s2_pattern)?;
    let rows = matrix.resolve_rows(&labels)?;

    let annotation = match &request.annotation_column {
        Some(column) => Some(matrix.column_values(column, &rows)?),
        None => None,
    };

    let table = build_plot_table(&matrix, &rows, (&s1, &s2), annotation.as_deref());
    log::info!(
        "{} records for {} features ({} + {} columns)",
        table.len(),
        labels.len(),
        s1.len(),
        s2.len()
    );
    Ok(table)
}

/// Write the long table as CSV.
pub fn export_long(table: &LongTable, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    table.write_csv(writer)?;
    log::info!("Long table written to {}", path.display());
    Ok(())
}
