use ratatui::style::{Color, Modifier, Style};

use crate::curve::ColorToken;
use crate::playback::Phase;

pub struct Theme;

impl Theme {
    pub fn status_bar() -> Style {
        Style::default()
            .fg(Color::Reset)
            .bg(Color::DarkGray)
    }

    pub fn status_error() -> Style {
        Style::default()
            .fg(Color::LightRed)
            .bg(Color::DarkGray)
    }

    pub fn input_prompt() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default()
    }

    pub fn label() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn value() -> Style {
        Style::default()
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn sidebar_title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn phase(phase: Phase) -> Style {
        let color = match phase {
            Phase::Idle => Color::Gray,
            Phase::Playing => Color::Green,
            Phase::Paused => Color::Yellow,
            Phase::Completed => Color::Cyan,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Terminal color for a curve color token.
    pub fn swatch(color: ColorToken) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
        Color::Rgb(r, g, b)
    }
}
