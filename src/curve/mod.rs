pub mod params;
pub mod sampler;

pub use params::{ColorToken, CurveParameters};
pub use sampler::{parameter_sweep, sample_frame, FrameGeometry, ViewBounds, TOTAL_FRAMES};
