//! Braille-canvas drawing of a frame, used when the terminal cannot show images.
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line, Points};
use ratatui::Frame;

use crate::curve::sampler::Point;
use crate::curve::{ColorToken, FrameGeometry, ViewBounds};
use crate::plot::render::{dash_segments, grid_lines};
use crate::plot::types::{BASELINE_COLOR, BASELINE_DASH, BASELINE_GAP, CIRCLE_COLOR, TRACE_COLOR};
use crate::tui::theme::Theme;

/// A terminal cell is roughly twice as tall as it is wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Largest rect inside `area` whose on-screen height/width equals `aspect`,
/// centered horizontally and anchored to the top.
pub fn fit_aspect(area: Rect, aspect: f64) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let mut width = area.width;
    let mut height = ((width as f64 * aspect / CELL_ASPECT).round() as u16).max(1);
    if height > area.height {
        height = area.height;
        width = ((height as f64 * CELL_ASPECT / aspect).round() as u16).clamp(1, area.width);
    }
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}

pub fn render_canvas_frame(
    frame: &mut Frame,
    area: Rect,
    geometry: Option<&FrameGeometry>,
    bounds: ViewBounds,
    color: ColorToken,
) {
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([bounds.x_min, bounds.x_max])
        .y_bounds([bounds.y_min, bounds.y_max])
        .paint(|ctx| {
            draw_grid(ctx, &bounds);
            if let Some(geo) = geometry {
                draw_geometry(ctx, geo, color);
            }
        });
    frame.render_widget(canvas, fit_aspect(area, bounds.aspect()));
}

fn draw_grid(ctx: &mut Context, bounds: &ViewBounds) {
    let color = Theme::rgb((88, 91, 112));
    for line in grid_lines(bounds) {
        draw_polyline(ctx, &line, color);
    }
}

fn draw_geometry(ctx: &mut Context, geo: &FrameGeometry, color: ColorToken) {
    let baseline = Theme::rgb(BASELINE_COLOR);
    for (from, to) in dash_segments(geo.baseline.0, geo.baseline.1, BASELINE_DASH * geo.radius, BASELINE_GAP * geo.radius) {
        draw_segment(ctx, from, to, baseline);
    }
    draw_polyline(ctx, &geo.circle, Theme::rgb(CIRCLE_COLOR));
    draw_polyline(ctx, &geo.cycloid, Theme::swatch(color));
    ctx.draw(&Points {
        coords: &[geo.trace_point],
        color: Theme::rgb(TRACE_COLOR),
    });
}

fn draw_polyline(ctx: &mut Context, points: &[Point], color: ratatui::style::Color) {
    for pair in points.windows(2) {
        draw_segment(ctx, pair[0], pair[1], color);
    }
}

fn draw_segment(ctx: &mut Context, from: Point, to: Point, color: ratatui::style::Color) {
    ctx.draw(&Line {
        x1: from.0,
        y1: from.1,
        x2: to.0,
        y2: to.1,
        color,
    });
}
