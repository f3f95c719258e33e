use eframe::egui;

use crate::color::ColorMap;
use crate::error::{Result, StripError};
use crate::render::layout::StripLayout;
use crate::render::RenderConfig;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StripApp {
    pub state: ViewerState,
}

impl eframe::App for StripApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: group toggles ----
        egui::SidePanel::left("group_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::strip_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(layout: StripLayout, colors: ColorMap, config: &RenderConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let zoom = config.font_scale as f32;
    let state = ViewerState::new(layout, colors, config.clone());
    log::info!("Opening viewer; close the window to exit");

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_zoom_factor(zoom);
            Ok(Box::new(StripApp { state }))
        }),
    )
    .map_err(|e| StripError::Render(e.to_string()))
}
