use std::io;
use std::sync::Mutex;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;
use tracing_subscriber::EnvFilter;

use cycloid::persistence;
use cycloid::tui::app::App;
use cycloid::tui::event::{poll_event, poll_timeout, AppEvent};
use cycloid::tui::status::Notice;

/// Environment variable holding the log filter, e.g. `CYCLOID_LOG=debug`.
const LOG_ENV: &str = "CYCLOID_LOG";

fn main() -> anyhow::Result<()> {
    init_logging();

    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = Picker::from_query_stdio().ok();
    tracing::info!(graphics = picker.is_some(), "terminal queried");

    let app = build_app(picker);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Log to `<data_dir>/cycloid/cycloid.log`; the screen belongs to the UI.
fn init_logging() {
    let Some(path) = persistence::data_dir().map(|d| d.join("cycloid.log")) else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Load the config and turn it into the initial app state.
fn build_app(picker: Option<Picker>) -> App {
    let loaded = persistence::config::load_config();
    let mut notice = loaded.problem.map(|e| Notice::Error(format!("{}; using defaults", e)));

    let (params, rejected) = loaded.config.curve_parameters();
    if !rejected.is_empty() {
        let reasons: Vec<String> = rejected.iter().map(|e| e.to_string()).collect();
        tracing::warn!(reasons = ?reasons, "rejected initial parameters, using defaults for them");
        notice = Some(Notice::Error(format!("{}; using defaults", reasons.join(", "))));
    }

    let mut app = App::new(picker, params, loaded.config);
    app.notice = notice;
    app
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> anyhow::Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| app.render(frame))?;
            dirty = false;
        }

        let timeout = poll_timeout(app.playback.time_until_due(Instant::now()));
        if let Some(event) = poll_event(timeout) {
            match event {
                AppEvent::Key(key) => {
                    dirty |= app.handle_key(key, Instant::now());
                }
                AppEvent::Resize(_, _) => {
                    dirty = true;
                }
                AppEvent::Tick => {}
            }
        }

        // Frames keep coming even while keys are being pressed.
        dirty |= app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
