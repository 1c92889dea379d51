//! Closed-form sampling of the cycloid and its generating circle.
use std::f64::consts::PI;

use crate::curve::params::validate_radius;
use crate::error::{CycloidError, CycloidResult};

/// Number of frames the parameter sweep is partitioned into.
pub const TOTAL_FRAMES: usize = 100;
/// Points used to outline the generating circle.
pub const CIRCLE_SAMPLES: usize = 50;
/// End of the parameter sweep: two full turns of the circle.
pub const SWEEP_END: f64 = 4.0 * PI;
/// Headroom above the cycloid's peak (2r) in the fixed view.
pub const VIEW_HEADROOM: f64 = 1.1;

pub type Point = (f64, f64);

/// `count` evenly spaced values over `[0, 4π]`, both ends included.
pub fn parameter_sweep(count: usize) -> Vec<f64> {
    linspace(0.0, SWEEP_END, count)
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Point on the cycloid at parameter `t` for a circle of radius `r`.
pub fn cycloid_point(t: f64, r: f64) -> Point {
    (r * (t - t.sin()), r * (1.0 - t.cos()))
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGeometry {
    pub radius: f64,
    /// Cycloid path traced so far.
    pub cycloid: Vec<Point>,
    pub circle_center: Point,
    /// Generating circle at its current rolling position.
    pub circle: Vec<Point>,
    /// Point currently being traced.
    pub trace_point: Point,
    /// Horizontal travel of the circle's center: (0, r) to (cx, r).
    pub baseline: (Point, Point),
}

/// Sample one frame from a parameter prefix.
pub fn sample_frame(t: &[f64], radius: f64) -> CycloidResult<FrameGeometry> {
    validate_radius(radius)?;
    let t_last = *t
        .last()
        .ok_or_else(|| CycloidError::empty_input("parameter prefix has no samples"))?;

    let cycloid: Vec<Point> = t.iter().map(|&ti| cycloid_point(ti, radius)).collect();
    let trace_point = cycloid[cycloid.len() - 1];

    let circle_center = (radius * t_last, radius);
    let circle = linspace(0.0, 2.0 * PI, CIRCLE_SAMPLES)
        .into_iter()
        .map(|theta| {
            (
                circle_center.0 + radius * theta.cos(),
                circle_center.1 + radius * theta.sin(),
            )
        })
        .collect();

    Ok(FrameGeometry {
        radius,
        cycloid,
        circle_center,
        circle,
        trace_point,
        baseline: ((0.0, radius), (circle_center.0, radius)),
    })
}

/// Fixed plot window for a given radius. Never derived from data extents,
/// so the picture does not jitter while the animation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    pub fn for_radius(radius: f64) -> Self {
        Self {
            x_min: 0.0,
            x_max: SWEEP_END * radius,
            y_min: 0.0,
            y_max: 2.0 * VIEW_HEADROOM * radius,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Height over width. Depends only on the constants, not on the radius.
    pub fn aspect(&self) -> f64 {
        self.height() / self.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sweep_endpoints() {
        let t = parameter_sweep(TOTAL_FRAMES);
        assert_eq!(t.len(), TOTAL_FRAMES);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[TOTAL_FRAMES - 1], SWEEP_END);
        let step = SWEEP_END / (TOTAL_FRAMES - 1) as f64;
        assert!((t[1] - step).abs() < EPS);
    }

    #[test]
    fn test_sweep_degenerate_counts() {
        assert!(parameter_sweep(0).is_empty());
        assert_eq!(parameter_sweep(1), vec![0.0]);
    }

    #[test]
    fn test_cycloid_starts_at_origin() {
        let t = parameter_sweep(TOTAL_FRAMES);
        for r in [0.1, 0.5, 1.0, 1.7, 2.0] {
            let frame = sample_frame(&t[..1], r).unwrap();
            assert_eq!(frame.cycloid[0], (0.0, 0.0));
        }
    }

    #[test]
    fn test_cycloid_height_bounded() {
        let t = parameter_sweep(TOTAL_FRAMES);
        for r in [0.1, 1.0, 2.0] {
            let frame = sample_frame(&t, r).unwrap();
            for &(_, y) in &frame.cycloid {
                assert!(y >= 0.0 && y <= 2.0 * r + EPS, "y = {} out of [0, {}]", y, 2.0 * r);
            }
        }
    }

    #[test]
    fn test_last_frame_returns_to_baseline() {
        let t = parameter_sweep(TOTAL_FRAMES);
        let frame = sample_frame(&t[..TOTAL_FRAMES], 1.0).unwrap();
        let (x, y) = frame.trace_point;
        assert!((x - 4.0 * PI).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_circle_outline() {
        let t = parameter_sweep(TOTAL_FRAMES);
        let r = 1.5;
        let frame = sample_frame(&t[..40], r).unwrap();
        assert_eq!(frame.circle.len(), CIRCLE_SAMPLES);
        assert_eq!(frame.circle_center, (r * t[39], r));
        for &(x, y) in &frame.circle {
            let d = ((x - frame.circle_center.0).powi(2) + (y - frame.circle_center.1).powi(2)).sqrt();
            assert!((d - r).abs() < 1e-9);
        }
        // Closed outline: first and last samples coincide.
        let first = frame.circle[0];
        let last = frame.circle[CIRCLE_SAMPLES - 1];
        assert!((first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9);
    }

    #[test]
    fn test_trace_point_touches_circle() {
        let t = parameter_sweep(TOTAL_FRAMES);
        let frame = sample_frame(&t[..63], 0.8).unwrap();
        let (px, py) = frame.trace_point;
        let (cx, cy) = frame.circle_center;
        let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        assert!((d - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_spans_travel() {
        let t = parameter_sweep(TOTAL_FRAMES);
        let frame = sample_frame(&t[..10], 2.0).unwrap();
        assert_eq!(frame.baseline.0, (0.0, 2.0));
        assert_eq!(frame.baseline.1, (2.0 * t[9], 2.0));
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let t = parameter_sweep(TOTAL_FRAMES);
        let a = sample_frame(&t[..57], 1.3).unwrap();
        let b = sample_frame(&t[..57], 1.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_prefix() {
        let err = sample_frame(&[], 1.0).unwrap_err();
        assert!(matches!(err, CycloidError::EmptyInput(_)));
    }

    #[test]
    fn test_non_positive_radius() {
        let t = parameter_sweep(TOTAL_FRAMES);
        assert!(matches!(
            sample_frame(&t, 0.0).unwrap_err(),
            CycloidError::Configuration(_)
        ));
        assert!(matches!(
            sample_frame(&t, -2.0).unwrap_err(),
            CycloidError::Configuration(_)
        ));
    }

    #[test]
    fn test_view_bounds_fixed_per_radius() {
        let v = ViewBounds::for_radius(1.0);
        assert_eq!(v.x_min, 0.0);
        assert!((v.x_max - 4.0 * PI).abs() < EPS);
        assert!((v.y_max - 2.2).abs() < EPS);
        let aspect = v.aspect();
        for r in [0.1, 0.7, 2.0] {
            assert!((ViewBounds::for_radius(r).aspect() - aspect).abs() < EPS);
        }
    }
}
