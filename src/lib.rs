//! Interactive cycloid animation for the terminal.
//!
//! [`curve`] samples the cycloid and its rolling circle, [`playback`] decides
//! which frame is shown when, [`plot`] rasterizes a frame, and [`tui`] is the
//! full-screen front end that wires them to the keyboard.

pub mod curve;
pub mod error;
pub mod persistence;
pub mod playback;
pub mod plot;
pub mod tui;

pub use error::{CycloidError, CycloidResult};
