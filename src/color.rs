use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct RGB triples using evenly spaced hues.
///
/// Hues start at a blue offset so two groups come out blue / orange.
pub fn generate_palette(n: usize) -> Vec<[u8; 3]> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: sample group → color
// ---------------------------------------------------------------------------

/// Maps sample group tags to distinct colours, shared by both renderers.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, [u8; 3]>,
    default_color: [u8; 3],
}

impl ColorMap {
    /// Build a colour map from group tags in display order.
    pub fn new(groups: &[String]) -> Self {
        let mapping = groups
            .iter()
            .cloned()
            .zip(generate_palette(groups.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: [128, 128, 128],
        }
    }

    fn rgb_for(&self, group: &str) -> [u8; 3] {
        self.mapping.get(group).copied().unwrap_or(self.default_color)
    }

    pub fn color32_for(&self, group: &str) -> Color32 {
        let [r, g, b] = self.rgb_for(group);
        Color32::from_rgb(r, g, b)
    }

    pub fn plotters_for(&self, group: &str) -> RGBColor {
        let [r, g, b] = self.rgb_for(group);
        RGBColor(r, g, b)
    }
}
