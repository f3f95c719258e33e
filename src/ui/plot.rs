use eframe::egui::Ui;
use egui_plot::{uniform_grid_spacer, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::render::layout::category_at;
use crate::render::Y_AXIS_LABEL;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Strip plot (central panel)
// ---------------------------------------------------------------------------

/// Render the categorical scatter in the central panel.
pub fn strip_plot(ui: &mut Ui, state: &ViewerState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.config.title.as_str());
    });

    // Axis formatters must own their data.
    let features = state.layout.features.clone();
    let radius = (3.0 * state.config.font_scale) as f32;

    Plot::new("strip_plot")
        .legend(Legend::default())
        .x_axis_label("feature")
        .y_axis_label(Y_AXIS_LABEL)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            category_at(&features, mark.value).unwrap_or_default().to_string()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (g, group) in state.layout.groups.iter().enumerate() {
                if !state.is_visible(g) {
                    continue;
                }
                let points = Points::new(PlotPoints::from(state.layout.group_points(g)))
                    .name(group)
                    .color(state.colors.color32_for(group))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius);

                plot_ui.points(points);
            }
        });
}
