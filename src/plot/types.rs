/// Plot description and rasterized output types.
use image::RgbImage;

use crate::curve::{ColorToken, FrameGeometry, ViewBounds};

/// Output image width (pixels). The height follows from the view aspect.
pub const PLOT_WIDTH: u32 = 960;
/// Blank border around the plotting area (pixels).
pub const PLOT_MARGIN: u32 = 12;
/// Grid divisions along each axis.
pub const GRID_X_DIVISIONS: usize = 8;
pub const GRID_Y_DIVISIONS: usize = 4;
/// Radius of the trace-point marker (pixels).
pub const TRACE_MARKER_SIZE: i32 = 6;
/// Baseline dash pattern, in multiples of the radius.
pub const BASELINE_DASH: f64 = 0.15;
pub const BASELINE_GAP: f64 = 0.1;

pub const PLOT_TITLE: &str = "Cycloid Animation";
pub const CURVE_LABEL: &str = "Cycloid";

/// Fixed overlay colors (RGB).
pub const CIRCLE_COLOR: (u8, u8, u8) = (243, 60, 60);
pub const TRACE_COLOR: (u8, u8, u8) = (243, 60, 60);
pub const BASELINE_COLOR: (u8, u8, u8) = (64, 180, 90);

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub geometry: FrameGeometry,
    pub color: ColorToken,
    pub bounds: ViewBounds,
}

impl PlotSpec {
    /// Plot description with the fixed view for the geometry's radius.
    pub fn new(geometry: FrameGeometry, color: ColorToken) -> Self {
        let bounds = ViewBounds::for_radius(geometry.radius);
        Self {
            geometry,
            color,
            bounds,
        }
    }
}

/// Pixel size of the rendered frame, chosen so one unit on x and one unit
/// on y cover the same number of pixels.
pub fn plot_dimensions(bounds: &ViewBounds) -> (u32, u32) {
    let inner_w = PLOT_WIDTH - 2 * PLOT_MARGIN;
    let inner_h = (inner_w as f64 * bounds.aspect()).round().max(1.0) as u32;
    (PLOT_WIDTH, inner_h + 2 * PLOT_MARGIN)
}

/// A rasterized frame.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}
