/// Plot rendering pipeline: PlotSpec → RGB image via plotters.

use crate::curve::sampler::Point;
use crate::curve::ViewBounds;
use crate::error::{CycloidError, CycloidResult};
use crate::plot::types::*;
use image::RgbImage;
use plotters::prelude::*;

/// Background color (Catppuccin Latte base, light so the default blue reads well).
const BG_COLOR: RGBColor = RGBColor(239, 241, 245);
/// Grid color.
const GRID_COLOR: RGBColor = RGBColor(140, 143, 161);

/// Render a PlotSpec to an RGB image.
pub fn render_plot(spec: &PlotSpec) -> CycloidResult<RenderedPlot> {
    let (width, height) = plot_dimensions(&spec.bounds);
    let mut buf = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BG_COLOR).map_err(|e| CycloidError::render(format!("fill: {}", e)))?;

        let b = &spec.bounds;
        let mut chart = ChartBuilder::on(&root)
            .margin(PLOT_MARGIN)
            .build_cartesian_2d(b.x_min..b.x_max, b.y_min..b.y_max)
            .map_err(|e| CycloidError::render(format!("chart build: {}", e)))?;

        chart
            .draw_series(grid_lines(&spec.bounds).into_iter().map(|line| {
                PathElement::new(line, GRID_COLOR.mix(0.35))
            }))
            .map_err(|e| CycloidError::render(format!("grid: {}", e)))?;

        let geo = &spec.geometry;
        let (br, bg, bb) = BASELINE_COLOR;
        let dashes = dash_segments(geo.baseline.0, geo.baseline.1, BASELINE_DASH * geo.radius, BASELINE_GAP * geo.radius);
        chart
            .draw_series(dashes.into_iter().map(|(from, to)| {
                PathElement::new(vec![from, to], RGBColor(br, bg, bb).stroke_width(1))
            }))
            .map_err(|e| CycloidError::render(format!("baseline: {}", e)))?;

        let (cr, cg, cb) = CIRCLE_COLOR;
        chart
            .draw_series(LineSeries::new(
                geo.circle.iter().copied(),
                RGBColor(cr, cg, cb).stroke_width(2),
            ))
            .map_err(|e| CycloidError::render(format!("circle: {}", e)))?;

        let curve_color = RGBColor(spec.color.r, spec.color.g, spec.color.b);
        chart
            .draw_series(LineSeries::new(geo.cycloid.iter().copied(), curve_color.stroke_width(2)))
            .map_err(|e| CycloidError::render(format!("cycloid: {}", e)))?;

        let (tr, tg, tb) = TRACE_COLOR;
        chart
            .draw_series(std::iter::once(Circle::new(
                geo.trace_point,
                TRACE_MARKER_SIZE,
                RGBColor(tr, tg, tb).filled(),
            )))
            .map_err(|e| CycloidError::render(format!("trace point: {}", e)))?;

        root.present().map_err(|e| CycloidError::render(format!("present: {}", e)))?;
    }

    let image = RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| CycloidError::render("pixel buffer does not match plot size"))?;

    Ok(RenderedPlot {
        image,
        width,
        height,
    })
}

/// Evenly spaced grid lines across the fixed view, borders included.
pub fn grid_lines(b: &ViewBounds) -> Vec<Vec<Point>> {
    let mut lines = Vec::with_capacity(GRID_X_DIVISIONS + GRID_Y_DIVISIONS + 2);
    for i in 0..=GRID_X_DIVISIONS {
        let x = b.x_min + b.width() * i as f64 / GRID_X_DIVISIONS as f64;
        lines.push(vec![(x, b.y_min), (x, b.y_max)]);
    }
    for j in 0..=GRID_Y_DIVISIONS {
        let y = b.y_min + b.height() * j as f64 / GRID_Y_DIVISIONS as f64;
        lines.push(vec![(b.x_min, y), (b.x_max, y)]);
    }
    lines
}

/// Cut the segment `from`..`to` into dashes of length `dash` separated by `gap`.
pub fn dash_segments(from: Point, to: Point, dash: f64, gap: f64) -> Vec<(Point, Point)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);
    let period = dash + gap.max(0.0);

    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push((
            (from.0 + ux * start, from.1 + uy * start),
            (from.0 + ux * end, from.1 + uy * end),
        ));
        start += period;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{parameter_sweep, sample_frame, ColorToken, TOTAL_FRAMES};

    fn make_spec(prefix: usize, radius: f64) -> PlotSpec {
        let t = parameter_sweep(TOTAL_FRAMES);
        let geometry = sample_frame(&t[..prefix], radius).unwrap();
        PlotSpec::new(geometry, ColorToken::rgb(0, 0, 255))
    }

    #[test]
    fn test_render_simple() {
        let spec = make_spec(50, 1.0);
        let result = render_plot(&spec).unwrap();
        assert_eq!(result.width, PLOT_WIDTH);
        assert_eq!(result.image.dimensions(), (result.width, result.height));
        // Not a blank canvas
        let bg = image::Rgb([BG_COLOR.0, BG_COLOR.1, BG_COLOR.2]);
        assert!(result.image.pixels().any(|p| *p != bg));
    }

    #[test]
    fn test_render_draws_curve_color() {
        let spec = make_spec(100, 1.0);
        let result = render_plot(&spec).unwrap();
        let bluish = result
            .image
            .pixels()
            .filter(|p| p.0[2] > 200 && p.0[0] < 60 && p.0[1] < 60)
            .count();
        assert!(bluish > 100);
    }

    #[test]
    fn test_size_independent_of_radius() {
        let small = render_plot(&make_spec(10, 0.1)).unwrap();
        let large = render_plot(&make_spec(10, 2.0)).unwrap();
        assert_eq!((small.width, small.height), (large.width, large.height));
    }

    #[test]
    fn test_equal_aspect_dimensions() {
        let bounds = ViewBounds::for_radius(1.0);
        let (w, h) = plot_dimensions(&bounds);
        let inner_w = (w - 2 * PLOT_MARGIN) as f64;
        let inner_h = (h - 2 * PLOT_MARGIN) as f64;
        let px_per_unit_x = inner_w / bounds.width();
        let px_per_unit_y = inner_h / bounds.height();
        assert!((px_per_unit_x - px_per_unit_y).abs() / px_per_unit_x < 0.01);
    }

    #[test]
    fn test_grid_covers_bounds() {
        let spec = make_spec(5, 1.5);
        let lines = grid_lines(&spec.bounds);
        assert_eq!(lines.len(), GRID_X_DIVISIONS + GRID_Y_DIVISIONS + 2);
        assert_eq!(lines[0][0], (0.0, 0.0));
        let last_vertical = &lines[GRID_X_DIVISIONS];
        assert!((last_vertical[0].0 - spec.bounds.x_max).abs() < 1e-9);
    }

    #[test]
    fn test_dash_segments() {
        let dashes = dash_segments((0.0, 1.0), (1.0, 1.0), 0.3, 0.2);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0], ((0.0, 1.0), (0.3, 1.0)));
        assert!((dashes[1].0 .0 - 0.5).abs() < 1e-12);
        assert!((dashes[1].1 .0 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_dash_segments_clamped_and_empty() {
        let dashes = dash_segments((0.0, 0.0), (0.4, 0.0), 0.3, 0.05);
        assert_eq!(dashes.len(), 2);
        assert!((dashes[1].1 .0 - 0.4).abs() < 1e-12);
        assert!(dash_segments((1.0, 1.0), (1.0, 1.0), 0.3, 0.2).is_empty());
    }
}
