use std::path::Path;

use crate::color::ColorMap;
use crate::error::Result;
use crate::render::figure;
use crate::render::layout::StripLayout;
use crate::render::RenderConfig;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    /// Precomputed point positions.
    pub layout: StripLayout,

    /// Group → colour.
    pub colors: ColorMap,

    /// Display settings the viewer was opened with.
    pub config: RenderConfig,

    /// Per-group visibility, indexed like `layout.groups`.
    pub visible: Vec<bool>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(layout: StripLayout, colors: ColorMap, config: RenderConfig) -> Self {
        let visible = vec![true; layout.groups.len()];
        Self {
            layout,
            colors,
            config,
            visible,
            status_message: None,
        }
    }

    /// Toggle a single group on or off.
    pub fn toggle_group(&mut self, group: usize) {
        if let Some(v) = self.visible.get_mut(group) {
            *v = !*v;
        }
    }

    pub fn is_visible(&self, group: usize) -> bool {
        self.visible.get(group).copied().unwrap_or(false)
    }

    /// Number of points in currently visible groups.
    pub fn visible_points(&self) -> usize {
        self.layout
            .points
            .iter()
            .filter(|p| self.is_visible(p.group))
            .count()
    }

    /// Number of points belonging to one group.
    pub fn group_size(&self, group: usize) -> usize {
        self.layout.points.iter().filter(|p| p.group == group).count()
    }

    /// Write the full figure (all groups) to `path`.
    pub fn save_figure(&mut self, path: &Path) -> Result<()> {
        figure::save_figure(&self.layout, &self.colors, &self.config, path)?;
        self.status_message = Some(format!("Saved {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LongRecord, LongTable};

    fn create_state() -> ViewerState {
        let table = LongTable {
            records: vec![
                LongRecord::new(1.0, "gene1", "s1"),
                LongRecord::new(2.0, "gene1", "s1"),
                LongRecord::new(3.0, "gene1", "s2"),
            ],
        };
        let layout = StripLayout::from_table(&table);
        let colors = ColorMap::new(&layout.groups);
        ViewerState::new(layout, colors, RenderConfig::default())
    }

    #[test]
    fn test_all_groups_start_visible() {
        let state = create_state();
        assert_eq!(state.visible, vec![true, true]);
        assert_eq!(state.visible_points(), 3);
    }

    #[test]
    fn test_toggle_group_hides_its_points() {
        let mut state = create_state();
        state.toggle_group(0);
        assert!(!state.is_visible(0));
        assert_eq!(state.visible_points(), 1);
        assert_eq!(state.group_size(0), 2);

        state.toggle_group(0);
        assert_eq!(state.visible_points(), 3);
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut state = create_state();
        state.toggle_group(7);
        assert_eq!(state.visible, vec![true, true]);
    }
}
