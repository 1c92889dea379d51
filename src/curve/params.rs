//! Curve parameters and the display color token.
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CycloidError, CycloidResult};

/// Default curve color ("#0000FF").
pub const DEFAULT_COLOR: ColorToken = ColorToken { r: 0, g: 0, b: 255 };
pub const DEFAULT_RADIUS: f64 = 1.0;
pub const DEFAULT_FPS: f64 = 60.0;

/// Opaque display color, written and parsed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorToken {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorToken {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB`, or the short form `#RGB`.
    pub fn parse(token: &str) -> CycloidResult<Self> {
        let trimmed = token.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CycloidError::color(format!("'{}' is not a hex color", trimmed)));
        }
        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                match (channel(0), channel(2), channel(4)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
                    _ => Err(CycloidError::color(format!("'{}' is not a hex color", trimmed))),
                }
            }
            3 => {
                // #abc expands to #aabbcc
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
                match (nibble(0), nibble(1), nibble(2)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
                    _ => Err(CycloidError::color(format!("'{}' is not a hex color", trimmed))),
                }
            }
            n => Err(CycloidError::color(format!(
                "'{}' has {} hex digits, expected 3 or 6",
                trimmed, n
            ))),
        }
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        DEFAULT_COLOR
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for ColorToken {
    type Err = CycloidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Everything the user can tune about the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParameters {
    /// Radius of the rolling circle.
    pub radius: f64,
    pub color: ColorToken,
    /// Playback speed; one frame is shown every `1 / fps` seconds.
    pub fps: f64,
}

impl CurveParameters {
    /// Build parameters, rejecting a non-positive radius or frame rate.
    pub fn new(radius: f64, color: ColorToken, fps: f64) -> CycloidResult<Self> {
        let params = Self { radius, color, fps };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> CycloidResult<()> {
        validate_radius(self.radius)?;
        self.frame_delay().map(|_| ())
    }

    /// Delay between two frames at this speed.
    ///
    /// Fails when the speed is not positive or so slow that the delay does
    /// not fit in a `Duration`.
    pub fn frame_delay(&self) -> CycloidResult<Duration> {
        frame_delay_for(self.fps)
    }
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            color: DEFAULT_COLOR,
            fps: DEFAULT_FPS,
        }
    }
}

pub(crate) fn frame_delay_for(fps: f64) -> CycloidResult<Duration> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(CycloidError::configuration(format!(
            "frames per second must be positive, got {}",
            fps
        )));
    }
    Duration::try_from_secs_f64(1.0 / fps).map_err(|_| {
        CycloidError::configuration(format!("frames per second too small, got {}", fps))
    })
}

pub(crate) fn validate_radius(radius: f64) -> CycloidResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(CycloidError::configuration(format!(
            "radius must be positive, got {}",
            radius
        )))
    }
}
