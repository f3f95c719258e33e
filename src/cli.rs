use std::path::PathBuf;

use clap::Parser;

use crate::data::select::RowSource;
use crate::error::{Result, StripError};
use crate::pipeline::PlotRequest;
use crate::render::RenderConfig;

/// Plot per-replicate intensities of selected features for two sample groups
#[derive(Parser, Debug)]
#[command(name = "replicate-strip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Expression matrix: header row, first column holds feature labels
    #[arg(long)]
    pub csv: PathBuf,

    /// Field delimiter (single character, or `tab` / `\t`)
    #[arg(long, default_value = "tab", value_parser = parse_delimiter)]
    pub delim: u8,

    /// Regex matched against the start of column names for group s1
    #[arg(long = "s1_pattern")]
    pub s1_pattern: String,

    /// Regex matched against the start of column names for group s2
    #[arg(long = "s2_pattern")]
    pub s2_pattern: String,

    /// Single feature label to plot
    #[arg(long = "target_row_label")]
    pub target_row_label: Option<String>,

    /// File with one feature label per line
    #[arg(long = "row_label_file")]
    pub row_label_file: Option<PathBuf>,

    /// Numeric column whose value is appended to each feature label
    #[arg(long = "annot_col")]
    pub annot_col: Option<String>,

    /// Write the figure here instead of opening a window (.png, .svg, ...)
    #[arg(long = "save_fig")]
    pub save_fig: Option<PathBuf>,

    /// Also write the long-format table as CSV
    #[arg(long = "long_out")]
    pub long_out: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long = "fig_width", default_value_t = 1200)]
    pub fig_width: u32,

    /// Figure height in pixels
    #[arg(long = "fig_height", default_value_t = 800)]
    pub fig_height: u32,

    /// Multiplier for all text and marker sizes
    #[arg(long = "font_scale", default_value_t = 1.0)]
    pub font_scale: f64,
}

impl Cli {
    /// Validate the arguments into a request. Nothing is read from disk.
    pub fn into_request(self) -> Result<PlotRequest> {
        let rows = RowSource::from_options(self.target_row_label, self.row_label_file)?;

        Ok(PlotRequest {
            matrix_path: self.csv,
            delimiter: self.delim,
            s1_pattern: self.s1_pattern,
            s2_pattern: self.s2_pattern,
            rows,
            annotation_column: self.annot_col,
            long_out: self.long_out,
            render: RenderConfig {
                font_scale: self.font_scale,
                width: self.fig_width,
                height: self.fig_height,
                output: self.save_fig,
                ..Default::default()
            },
        })
    }
}

/// Accepts one ASCII character, or `tab` / `\t` for a tab.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(StripError::InvalidDelimiter(s.to_string())),
    }
}
