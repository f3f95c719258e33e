use std::path::PathBuf;

use crate::color::ColorMap;
use crate::data::model::LongTable;
use crate::error::Result;

pub mod figure;
pub mod layout;

use layout::StripLayout;

pub const DEFAULT_TITLE: &str = "Sample replicate comparison";
pub const Y_AXIS_LABEL: &str = "sample intensities";

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

/// Every display setting for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub title: String,
    /// Tick labels are rotated when more features than this are shown.
    pub rotate_labels_after: usize,
    pub font_scale: f64,
    pub width: u32,
    pub height: u32,
    /// `None` opens the interactive viewer.
    pub output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            rotate_labels_after: 4,
            font_scale: 1.0,
            width: 1200,
            height: 800,
            output: None,
        }
    }
}

impl RenderConfig {
    /// A base font size in pixels scaled by `font_scale`.
    pub fn font_px(&self, base: f64) -> f64 {
        (base * self.font_scale).max(1.0)
    }

    pub fn rotate_labels(&self, n_features: usize) -> bool {
        n_features > self.rotate_labels_after
    }
}

/// Draw the merged table, either to `config.output` or in a window.
///
/// The window call blocks until the viewer is closed.
pub fn render(table: &LongTable, config: &RenderConfig) -> Result<()> {
    let layout = StripLayout::from_table(table);
    let colors = ColorMap::new(&layout.groups);

    match &config.output {
        Some(path) => {
            figure::save_figure(&layout, &colors, config, path)?;
            log::info!("Figure written to {}", path.display());
            Ok(())
        }
        None => crate::app::run_viewer(layout, colors, config),
    }
}
