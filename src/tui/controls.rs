//! Sidebar controls: radius and speed sliders plus the color picker.
use crate::curve::params::{ColorToken, CurveParameters, DEFAULT_COLOR};

/// A stepped slider. Positions are whole multiples of `unit`, so stepping
/// never accumulates floating-point drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    unit: f64,
    lo: i32,
    hi: i32,
    pos: i32,
}

impl Slider {
    /// Slider over `[lo * unit, hi * unit]` starting at the position closest to `initial`.
    pub fn new(label: &'static str, unit: f64, lo: i32, hi: i32, initial: f64) -> Self {
        let mut slider = Self {
            label,
            unit,
            lo,
            hi,
            pos: lo,
        };
        slider.set(initial);
        slider
    }

    pub fn value(&self) -> f64 {
        self.pos as f64 * self.unit
    }

    pub fn min(&self) -> f64 {
        self.lo as f64 * self.unit
    }

    pub fn max(&self) -> f64 {
        self.hi as f64 * self.unit
    }

    /// Snap `value` to the nearest step inside the range.
    pub fn set(&mut self, value: f64) {
        self.pos = if value.is_finite() {
            ((value / self.unit).round() as i32).clamp(self.lo, self.hi)
        } else {
            self.lo
        };
    }

    /// Move by `steps` (negative moves down). Returns true if the value changed.
    pub fn step_by(&mut self, steps: i32) -> bool {
        let before = self.pos;
        self.pos = (self.pos + steps).clamp(self.lo, self.hi);
        self.pos != before
    }

    /// Position within the range, 0.0 at the minimum and 1.0 at the maximum.
    pub fn fraction(&self) -> f64 {
        if self.hi == self.lo {
            return 1.0;
        }
        (self.pos - self.lo) as f64 / (self.hi - self.lo) as f64
    }
}

/// Radius slider: 0.1 to 2.0 in steps of 0.1.
pub fn radius_slider(initial: f64) -> Slider {
    Slider::new("Radius", 0.1, 1, 20, initial)
}

/// Speed slider: 30 to 100 frames per second.
pub fn speed_slider(initial: f64) -> Slider {
    Slider::new("Speed", 1.0, 30, 100, initial)
}

/// Preset colors cycled with `c`.
pub const PALETTE: &[(&str, ColorToken)] = &[
    ("blue", DEFAULT_COLOR),
    ("crimson", ColorToken::rgb(210, 15, 57)),
    ("green", ColorToken::rgb(64, 160, 43)),
    ("orange", ColorToken::rgb(254, 100, 11)),
    ("mauve", ColorToken::rgb(136, 57, 239)),
    ("teal", ColorToken::rgb(23, 146, 153)),
    ("black", ColorToken::rgb(0, 0, 0)),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPicker {
    pub current: ColorToken,
}

impl ColorPicker {
    pub fn new(current: ColorToken) -> Self {
        Self { current }
    }

    /// Name of the current color if it is a palette entry.
    pub fn name(&self) -> Option<&'static str> {
        PALETTE
            .iter()
            .find(|(_, c)| *c == self.current)
            .map(|(name, _)| *name)
    }

    pub fn next(&mut self) {
        let idx = match self.palette_index() {
            Some(i) => (i + 1) % PALETTE.len(),
            None => 0,
        };
        self.current = PALETTE[idx].1;
    }

    pub fn prev(&mut self) {
        let idx = match self.palette_index() {
            Some(0) | None => PALETTE.len() - 1,
            Some(i) => i - 1,
        };
        self.current = PALETTE[idx].1;
    }

    fn palette_index(&self) -> Option<usize> {
        PALETTE.iter().position(|(_, c)| *c == self.current)
    }
}

/// The three user inputs feeding the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub radius: Slider,
    pub color: ColorPicker,
    pub speed: Slider,
}

impl Controls {
    pub fn new(params: &CurveParameters) -> Self {
        Self {
            radius: radius_slider(params.radius),
            color: ColorPicker::new(params.color),
            speed: speed_slider(params.fps),
        }
    }

    pub fn params(&self) -> CurveParameters {
        CurveParameters {
            radius: self.radius.value(),
            color: self.color.current,
            fps: self.speed.value(),
        }
    }
}
