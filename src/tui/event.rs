use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub enum AppEvent {
    Key(KeyEvent),
    /// The timeout elapsed with no input; time to poll the animation.
    Tick,
    Resize(u16, u16),
}

/// Longest the event loop blocks when no frame is due.
pub const IDLE_POLL: Duration = Duration::from_millis(50);

/// Poll for terminal events with a timeout.
pub fn poll_event(timeout: Duration) -> Option<AppEvent> {
    if event::poll(timeout).ok()? {
        match event::read().ok()? {
            // Windows reports releases too; only presses drive the app.
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    } else {
        Some(AppEvent::Tick)
    }
}

/// Wait at most until the next frame is due, never longer than [`IDLE_POLL`].
pub fn poll_timeout(until_due: Option<Duration>) -> Duration {
    until_due.map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
}

/// Check if this is a quit keybinding.
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}
