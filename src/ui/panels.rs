use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – group toggles
// ---------------------------------------------------------------------------

/// Render the left panel: one checkbox per sample group.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Groups");
    ui.separator();

    let groups = state.layout.groups.clone();
    for (g, group) in groups.iter().enumerate() {
        let text = RichText::new(format!("{group}  ({})", state.group_size(g)))
            .color(state.colors.color32_for(group));

        let mut checked = state.is_visible(g);
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_group(g);
        }
    }

    ui.separator();
    ui.strong("Features");
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, feature) in state.layout.features.iter().enumerate() {
                ui.label(format!("{i}: {feature}"));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save figure…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} features, {} of {} points shown",
            state.layout.features.len(),
            state.visible_points(),
            state.layout.points.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .set_file_name("replicates.png")
        .save_file();

    if let Some(path) = file {
        match state.save_figure(&path) {
            Ok(()) => log::info!("Figure written to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
