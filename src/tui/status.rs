use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::playback::Phase;
use crate::tui::theme::Theme;

/// A message shown on the right of the status bar until replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, phase: Phase, notice: Option<&Notice>) {
    let version = env!("CARGO_PKG_VERSION");
    let left_text = format!(" Cycloid v{} | {}", version, phase.label());

    let (right_text, right_style) = match notice {
        Some(Notice::Info(msg)) => (format!("{} ", msg), Theme::status_bar()),
        Some(Notice::Error(msg)) => (format!("{} ", msg), Theme::status_error()),
        None => (String::new(), Theme::status_bar()),
    };

    let width = area.width as usize;
    let padding = width.saturating_sub(left_text.chars().count() + right_text.chars().count());

    let line = Line::from(vec![
        Span::styled(left_text, Theme::status_bar()),
        Span::styled(" ".repeat(padding), Theme::status_bar()),
        Span::styled(right_text, right_style),
    ]);

    frame.render_widget(line, area);
}
