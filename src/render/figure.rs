use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

use super::layout::StripLayout;
use super::{RenderConfig, Y_AXIS_LABEL};
use crate::color::ColorMap;
use crate::error::{Result, StripError};

// ---------------------------------------------------------------------------
// Static figure output
// ---------------------------------------------------------------------------

/// Write the strip plot to `path`. `.svg` gets the SVG backend, every
/// other extension the bitmap backend (format picked by extension).
pub fn save_figure(layout: &StripLayout, colors: &ColorMap, config: &RenderConfig, path: &Path) -> Result<()> {
    let size = (config.width, config.height);
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw_strip(SVGBackend::new(path, size).into_drawing_area(), layout, colors, config)
    } else {
        draw_strip(BitMapBackend::new(path, size).into_drawing_area(), layout, colors, config)
    }
}

fn draw_strip<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    layout: &StripLayout,
    colors: &ColorMap,
    config: &RenderConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;

    let n = layout.features.len().max(1);
    let (y_min, y_max) = layout.y_range();
    let rotate = config.rotate_labels(layout.features.len());
    let tick_px = config.font_px(14.0);

    // Rotated labels need room for the longest feature name.
    let longest = layout.features.iter().map(|f| f.chars().count()).max().unwrap_or(0);
    let x_area = if rotate {
        (longest as f64 * tick_px * 0.6 + 20.0) as u32
    } else {
        (tick_px * 3.0) as u32
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", config.font_px(24.0)).into_font())
        .margin(10)
        .x_label_area_size(x_area)
        .y_label_area_size((tick_px * 5.0) as u32)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)
        .map_err(render_error)?;

    let tick_font = ("sans-serif", tick_px).into_font();
    let x_tick_font = if rotate {
        tick_font.clone().transform(FontTransform::Rotate90)
    } else {
        tick_font.clone()
    };
    let feature_name = |x: &f64| layout.feature_at(*x).unwrap_or_default().to_string();

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&feature_name)
        .x_label_style(x_tick_font)
        .y_label_style(tick_font.clone())
        .axis_desc_style(tick_font)
        .x_desc("feature")
        .y_desc(Y_AXIS_LABEL)
        .draw()
        .map_err(render_error)?;

    let radius = (config.font_px(4.0)).round() as i32;
    for (g, group) in layout.groups.iter().enumerate() {
        let color = colors.plotters_for(group);
        chart
            .draw_series(
                layout
                    .group_points(g)
                    .into_iter()
                    .map(|[x, y]| Circle::new((x, y), radius, color.mix(0.8).filled())),
            )
            .map_err(render_error)?
            .label(group.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", config.font_px(16.0)).into_font())
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

fn render_error(e: impl std::fmt::Display) -> StripError {
    StripError::Render(e.to_string())
}
