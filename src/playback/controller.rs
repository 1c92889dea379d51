//! Play/pause state machine driving the frame-by-frame animation.
//!
//! The controller never sleeps. It records when the next frame is due and
//! the host event loop calls [`PlaybackController::poll`] whenever it wakes
//! up, so key presses keep being handled between frames.
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::curve::CurveParameters;
use crate::error::CycloidResult;

/// What the Play/Pause toggle does to the frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleMode {
    /// Every toggle rewinds to frame 0, pausing included.
    #[default]
    Restart,
    /// Pausing keeps the frame index and playing continues from it.
    Resume,
}

impl ToggleMode {
    pub fn label(&self) -> &'static str {
        match self {
            ToggleMode::Restart => "restart",
            ToggleMode::Resume => "resume",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            ToggleMode::Restart => ToggleMode::Resume,
            ToggleMode::Resume => ToggleMode::Restart,
        }
    }
}

/// Session state: where the animation is and whether it is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub current_frame: usize,
    pub is_playing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Completed,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }
}

/// A frame the host should sample and draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Number of sweep samples to draw, `t[..prefix_len]`.
    pub prefix_len: usize,
    pub total_frames: usize,
}

impl FrameRequest {
    /// On-screen counter, e.g. "Frame: 12/100".
    pub fn label(&self) -> String {
        format!("Frame: {}/{}", self.prefix_len, self.total_frames)
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    total_frames: usize,
    mode: ToggleMode,
    /// When the next advance step may run. `None` while not playing.
    next_due: Option<Instant>,
}

impl PlaybackController {
    pub fn new(total_frames: usize, mode: ToggleMode) -> Self {
        Self {
            state: PlaybackState::default(),
            total_frames,
            mode,
            next_due: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn mode(&self) -> ToggleMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ToggleMode) {
        self.mode = mode;
    }

    pub fn phase(&self) -> Phase {
        let PlaybackState {
            current_frame,
            is_playing,
        } = self.state;
        if is_playing {
            Phase::Playing
        } else if current_frame == 0 {
            Phase::Idle
        } else if current_frame >= self.total_frames {
            Phase::Completed
        } else {
            Phase::Paused
        }
    }

    /// Flip between playing and not playing.
    ///
    /// Starting playback validates `params` first; an invalid configuration
    /// leaves the state untouched. The first frame is due immediately.
    #[tracing::instrument(skip(self, params, now), fields(mode = self.mode.label()))]
    pub fn toggle(&mut self, params: &CurveParameters, now: Instant) -> CycloidResult<PlaybackState> {
        if self.state.is_playing {
            self.state.is_playing = false;
            self.next_due = None;
            if self.mode == ToggleMode::Restart {
                self.state.current_frame = 0;
            }
            tracing::debug!(frame = self.state.current_frame, "playback paused");
        } else {
            params.validate()?;
            if self.mode == ToggleMode::Restart || self.state.current_frame >= self.total_frames {
                self.state.current_frame = 0;
            }
            self.state.is_playing = self.state.current_frame < self.total_frames;
            self.next_due = self.state.is_playing.then_some(now);
            tracing::debug!(frame = self.state.current_frame, "playback started");
        }
        Ok(self.state)
    }

    /// Run one advance step if playing and the frame is due.
    ///
    /// Returns the frame to draw. The delay until the following frame is
    /// taken from `params` on every call, so speed changes apply at once.
    pub fn poll(&mut self, params: &CurveParameters, now: Instant) -> Option<FrameRequest> {
        if !self.state.is_playing {
            return None;
        }
        if self.state.current_frame >= self.total_frames {
            self.finish();
            return None;
        }
        match self.next_due {
            Some(due) if now < due => return None,
            _ => {}
        }

        let request = FrameRequest {
            prefix_len: self.state.current_frame + 1,
            total_frames: self.total_frames,
        };

        self.state.current_frame += 1;
        if self.state.current_frame >= self.total_frames {
            self.finish();
            return Some(request);
        }
        match params.frame_delay().ok().and_then(|delay| now.checked_add(delay)) {
            Some(due) => self.next_due = Some(due),
            None => {
                tracing::warn!(fps = params.fps, frame = self.state.current_frame, "no next frame time, playback stopped");
                self.state.is_playing = false;
                self.next_due = None;
            }
        }
        Some(request)
    }

    /// The frame held on screen while not playing.
    pub fn hold(&self) -> Option<FrameRequest> {
        if self.state.is_playing {
            return None;
        }
        Some(FrameRequest {
            prefix_len: self.state.current_frame.min(self.total_frames),
            total_frames: self.total_frames,
        })
    }

    /// How long the host may block before the next `poll` has work.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    fn finish(&mut self) {
        self.state.is_playing = false;
        self.next_due = None;
        tracing::info!(frames = self.total_frames, "animation complete");
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(crate::curve::TOTAL_FRAMES, ToggleMode::default())
    }
}
