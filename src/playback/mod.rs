pub mod controller;

pub use controller::{FrameRequest, Phase, PlaybackController, PlaybackState, ToggleMode};
