use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::DynamicImage;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;

use crate::curve::{parameter_sweep, sample_frame, ColorToken, CurveParameters, FrameGeometry, ViewBounds};
use crate::persistence::config::Config;
use crate::playback::{FrameRequest, PlaybackController};
use crate::plot::render::render_plot;
use crate::plot::types::{PlotSpec, BASELINE_COLOR, CIRCLE_COLOR, CURVE_LABEL, PLOT_TITLE, TRACE_COLOR};
use crate::tui::canvas::render_canvas_frame;
use crate::tui::controls::{Controls, Slider};
use crate::tui::event::is_quit;
use crate::tui::help::HelpPanel;
use crate::tui::input::PromptState;
use crate::tui::status::{render_status_bar, Notice};
use crate::tui::theme::Theme;

/// Width of the slider gauges in the sidebar (cells).
const GAUGE_WIDTH: usize = 16;
/// Axis labels, drawn on the plot panel border.
const X_AXIS_LABEL: &str = " x → ";
const Y_AXIS_LABEL: &str = " ↑ y ";

/// What is currently on the plot panel.
#[derive(Default)]
pub struct FrameView {
    /// Geometry of the shown frame; `None` shows empty axes.
    pub geometry: Option<FrameGeometry>,
    /// Frame counter text, e.g. "Frame: 12/100".
    pub label: String,
    /// Image protocol state for terminals with graphics support.
    pub image_state: Option<StatefulProtocol>,
}

pub struct App {
    pub controls: Controls,
    pub playback: PlaybackController,
    pub view: FrameView,
    pub should_quit: bool,
    pub picker: Option<Picker>,
    pub help: HelpPanel,
    pub prompt: PromptState,
    pub notice: Option<Notice>,
    pub config: Config,
    /// The fixed parameter sweep, one sample per frame.
    sweep: Vec<f64>,
}

impl App {
    /// Build the app from the initial parameters and config.
    pub fn new(picker: Option<Picker>, params: CurveParameters, config: Config) -> Self {
        let playback = PlaybackController::new(crate::curve::TOTAL_FRAMES, config.toggle_mode);
        let sweep = parameter_sweep(playback.total_frames());
        let mut app = Self {
            controls: Controls::new(&params),
            playback,
            view: FrameView::default(),
            should_quit: false,
            picker,
            help: HelpPanel::new(),
            prompt: PromptState::new(),
            notice: None,
            config,
            sweep,
        };
        app.refresh_hold();
        app
    }

    /// Parameters as currently set on the sliders.
    pub fn params(&self) -> CurveParameters {
        self.controls.params()
    }

    /// Advance the animation if a frame is due. Returns true if the screen should be redrawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        let params = self.params();
        match self.playback.poll(&params, now) {
            Some(request) => {
                self.draw_request(request, &params);
                true
            }
            None => false,
        }
    }

    /// Play/Pause.
    pub fn toggle_playback(&mut self, now: Instant) {
        let params = self.params();
        match self.playback.toggle(&params, now) {
            Ok(state) => {
                self.notice = None;
                if !state.is_playing {
                    self.refresh_hold();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "playback not started");
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    /// Re-render the held frame after a parameter change while stopped.
    pub fn refresh_hold(&mut self) {
        if let Some(request) = self.playback.hold() {
            let params = self.params();
            self.draw_request(request, &params);
        }
    }

    /// Sample, rasterize, and install one frame.
    fn draw_request(&mut self, request: FrameRequest, params: &CurveParameters) {
        let prefix = &self.sweep[..request.prefix_len.min(self.sweep.len())];
        self.view.label = request.label();
        match sample_frame(prefix, params.radius) {
            Ok(geometry) => {
                self.view.image_state = self.rasterize(&geometry, params.color);
                self.view.geometry = Some(geometry);
            }
            Err(e) if e.is_skippable() => {
                tracing::debug!(prefix = request.prefix_len, "nothing to draw, frame skipped");
                self.view.geometry = None;
                self.view.image_state = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame not sampled");
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    fn rasterize(&mut self, geometry: &FrameGeometry, color: ColorToken) -> Option<StatefulProtocol> {
        let picker = self.picker.as_ref()?;
        match render_plot(&PlotSpec::new(geometry.clone(), color)) {
            Ok(plot) => Some(picker.new_resize_protocol(DynamicImage::ImageRgb8(plot.image))),
            Err(e) => {
                tracing::warn!(error = %e, "plot render failed, using canvas");
                self.notice = Some(Notice::Error(e.to_string()));
                None
            }
        }
    }

    fn on_params_changed(&mut self) {
        if !self.playback.state().is_playing {
            self.refresh_hold();
        }
    }

    /// Handle a key event. Returns true if the screen should be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Help panel mode
        if self.help.visible {
            return self.handle_key_help(key);
        }

        // Hex color prompt captures everything until Enter/Esc
        if self.prompt.active {
            return self.handle_key_prompt(key);
        }

        self.handle_key_normal(key, now)
    }

    /// Key handling when the help panel is visible.
    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key {
            KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('?'), .. }
            | KeyEvent { code: KeyCode::F(1), .. } => {
                self.help.toggle();
                true
            }
            KeyEvent { code: KeyCode::Up, .. } | KeyEvent { code: KeyCode::Char('k'), .. } => {
                self.help.scroll_up(1);
                true
            }
            KeyEvent { code: KeyCode::Down, .. } | KeyEvent { code: KeyCode::Char('j'), .. } => {
                self.help.scroll_down(1);
                true
            }
            KeyEvent { code: KeyCode::PageUp, .. } => {
                self.help.scroll_up(10);
                true
            }
            KeyEvent { code: KeyCode::PageDown, .. } => {
                self.help.scroll_down(10);
                true
            }
            // Any other key closes help
            _ => {
                self.help.visible = false;
                true
            }
        }
    }

    /// Key handling while the hex color prompt is open.
    fn handle_key_prompt(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                let text = self.prompt.submit();
                match ColorToken::parse(&text) {
                    Ok(color) => {
                        self.controls.color.current = color;
                        self.notice = Some(Notice::Info(format!("color {}", color)));
                        self.on_params_changed();
                    }
                    Err(e) => {
                        self.notice = Some(Notice::Error(e.to_string()));
                    }
                }
            }
            KeyCode::Esc => self.prompt.cancel(),
            KeyCode::Backspace => self.prompt.backspace(),
            KeyCode::Delete => self.prompt.delete(),
            KeyCode::Left => self.prompt.move_left(),
            KeyCode::Right => self.prompt.move_right(),
            KeyCode::Home => self.prompt.move_home(),
            KeyCode::End => self.prompt.move_end(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.prompt.clear(),
            KeyCode::Char(ch) => self.prompt.insert(ch),
            _ => return false,
        }
        true
    }

    /// Normal mode key handling.
    fn handle_key_normal(&mut self, key: KeyEvent, now: Instant) -> bool {
        if is_quit(&key) {
            self.should_quit = true;
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            // Play/Pause
            KeyCode::Char(' ') | KeyCode::Char('p') => self.toggle_playback(now),

            // Radius
            KeyCode::Left | KeyCode::Char('-') => self.step_slider(SliderId::Radius, -1),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.step_slider(SliderId::Radius, 1)
            }

            // Speed
            KeyCode::Down => self.step_slider(SliderId::Speed, -1),
            KeyCode::Up => self.step_slider(SliderId::Speed, 1),
            KeyCode::PageDown => self.step_slider(SliderId::Speed, -10),
            KeyCode::PageUp => self.step_slider(SliderId::Speed, 10),

            // Color
            KeyCode::Char('c') => {
                self.controls.color.next();
                self.on_params_changed();
            }
            KeyCode::Char('C') => {
                self.controls.color.prev();
                self.on_params_changed();
            }
            KeyCode::Char('#') => {
                let current = self.controls.color.current.to_string();
                self.prompt.open(&current);
            }

            // Toggle policy
            KeyCode::Char('m') => {
                let mode = self.playback.mode().flipped();
                self.playback.set_mode(mode);
                self.notice = Some(Notice::Info(format!("toggle policy: {}", mode.label())));
            }

            KeyCode::F(1) | KeyCode::Char('?') => self.help.toggle(),

            _ => return false,
        }
        true
    }

    fn step_slider(&mut self, id: SliderId, steps: i32) {
        let slider = match id {
            SliderId::Radius => &mut self.controls.radius,
            SliderId::Speed => &mut self.controls.speed,
        };
        if slider.step_by(steps) {
            self.on_params_changed();
        }
    }

    /// Render the full UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let bottom_height = if self.prompt.active { 3 } else { 1 };
        let outer = Layout::vertical([
            Constraint::Length(1),                       // Status bar
            Constraint::Min(self.config.plot_height),    // Main area
            Constraint::Length(bottom_height),           // Hints or prompt
        ])
        .split(frame.area());

        render_status_bar(frame, outer[0], self.playback.phase(), self.notice.as_ref());

        // Main area: plot + sidebar
        let main = Layout::horizontal([
            Constraint::Percentage(72),
            Constraint::Percentage(28),
        ])
        .split(outer[1]);

        self.render_plot_panel(frame, main[0]);
        self.render_sidebar(frame, main[1]);

        if self.prompt.active {
            self.render_prompt(frame, outer[2]);
        } else {
            self.render_hints(frame, outer[2]);
        }

        // Render help panel as centered overlay
        if self.help.visible {
            self.render_help(frame, frame.area());
        }
    }

    fn render_plot_panel(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(format!(" {} ", PLOT_TITLE))
            .title_bottom(Line::from(Span::styled(X_AXIS_LABEL, Theme::label())).centered())
            .title_bottom(Line::from(Span::styled(Y_AXIS_LABEL, Theme::label())).left_aligned());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let params = self.params();
        match self.view.image_state.as_mut() {
            Some(protocol) => {
                frame.render_stateful_widget(StatefulImage::default(), inner, protocol);
            }
            None => {
                let bounds = ViewBounds::for_radius(params.radius);
                render_canvas_frame(frame, inner, self.view.geometry.as_ref(), bounds, params.color);
            }
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let sidebar = Layout::vertical([
            Constraint::Length(8), // Controls
            Constraint::Length(6), // Legend
            Constraint::Min(4),    // Playback
        ])
        .split(area);

        self.render_controls(frame, sidebar[0]);
        self.render_legend(frame, sidebar[1]);
        self.render_playback(frame, sidebar[2]);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Controls ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let color = &self.controls.color;
        let color_name = color.name().unwrap_or("custom");
        let lines = vec![
            slider_line(&self.controls.radius, format!("{:.1}", self.controls.radius.value())),
            gauge_line(&self.controls.radius),
            slider_line(&self.controls.speed, format!("{:.0} fps", self.controls.speed.value())),
            gauge_line(&self.controls.speed),
            Line::from(vec![
                Span::styled(" Color  ", Theme::label()),
                Span::styled("\u{25a0}\u{25a0} ", Style::default().fg(Theme::swatch(color.current))),
                Span::styled(format!("{} ({})", color.current, color_name), Theme::value()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Legend ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let entry = |glyph: &'static str, color: Color, text: &'static str| {
            Line::from(vec![
                Span::styled(format!(" {} ", glyph), Style::default().fg(color)),
                Span::styled(text, Theme::value()),
            ])
        };
        let lines = vec![
            entry("\u{2500}\u{2500}", Theme::swatch(self.controls.color.current), CURVE_LABEL),
            entry("\u{2500}\u{2500}", Theme::rgb(CIRCLE_COLOR), "Generating circle"),
            entry(" \u{25cf}", Theme::rgb(TRACE_COLOR), "Trace point"),
            entry("- -", Theme::rgb(BASELINE_COLOR), "Baseline"),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_playback(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Playback ", Theme::sidebar_title()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let phase = self.playback.phase();
        let delay = match self.params().frame_delay() {
            Ok(d) => format!("{:.1} ms", d.as_secs_f64() * 1000.0),
            Err(_) => "-".to_string(),
        };
        let lines = vec![
            Line::from(Span::styled(format!(" {}", self.view.label), Theme::value())),
            Line::from(vec![
                Span::styled(" State  ", Theme::label()),
                Span::styled(phase.label(), Theme::phase(phase)),
            ]),
            Line::from(vec![
                Span::styled(" Toggle ", Theme::label()),
                Span::styled(self.playback.mode().label(), Theme::value()),
            ]),
            Line::from(vec![
                Span::styled(" Delay  ", Theme::label()),
                Span::styled(delay, Theme::value()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let text = " Space play/pause  \u{2190}/\u{2192} radius  \u{2191}/\u{2193} speed  c color  # hex  m policy  F1 help  q quit";
        frame.render_widget(Paragraph::new(Span::styled(text, Theme::hint())), area);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(" Color (Enter apply, Esc cancel) ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prompt = "hex> ";
        let line = Line::from(vec![
            Span::styled(prompt, Theme::input_prompt()),
            Span::styled(self.prompt.text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        // Position cursor
        let cursor_x = inner.x + prompt.len() as u16 + self.prompt.cursor as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        use crate::tui::help::HELP_SECTIONS;

        // 80% of screen, centered
        let w = (area.width * 4 / 5).max(40).min(area.width);
        let h = (area.height * 4 / 5).max(10).min(area.height);
        let x = area.x + (area.width.saturating_sub(w)) / 2;
        let y = area.y + (area.height.saturating_sub(h)) / 2;
        let popup_area = Rect { x, y, width: w, height: h };

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(Span::styled(
                " Help | Esc to close, \u{2191}/\u{2193} to scroll ",
                Theme::sidebar_title(),
            ));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        // Build all lines
        let mut lines: Vec<Line<'static>> = Vec::new();
        for &(title, content) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for text_line in content.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text_line),
                    Style::default(),
                )));
            }
            lines.push(Line::from(""));
        }

        // Clamp scroll
        let total = lines.len();
        let visible = inner.height as usize;
        let max_scroll = total.saturating_sub(visible);
        let scroll = self.help.scroll.min(max_scroll);

        let visible_lines: Vec<Line> = lines.into_iter().skip(scroll).take(visible).collect();
        frame.render_widget(Paragraph::new(visible_lines), inner);
    }
}

#[derive(Clone, Copy)]
enum SliderId {
    Radius,
    Speed,
}

fn slider_line(slider: &Slider, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<7}", slider.label), Theme::label()),
        Span::styled(value, Theme::value()),
    ])
}

fn gauge_line(slider: &Slider) -> Line<'static> {
    let filled = (slider.fraction() * GAUGE_WIDTH as f64).round() as usize;
    Line::from(vec![
        Span::raw("        "),
        Span::styled("\u{2588}".repeat(filled), Theme::gauge()),
        Span::styled("\u{2591}".repeat(GAUGE_WIDTH - filled), Theme::hint()),
    ])
}
