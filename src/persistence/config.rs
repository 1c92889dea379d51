use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::curve::params::{
    frame_delay_for, validate_radius, ColorToken, CurveParameters, DEFAULT_COLOR, DEFAULT_FPS, DEFAULT_RADIUS,
};
use crate::error::{CycloidError, CycloidResult};
use crate::playback::ToggleMode;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial radius of the rolling circle.
    pub radius: f64,
    /// Initial curve color as a hex token.
    pub color: String,
    /// Initial playback speed in frames per second.
    pub fps: f64,
    /// What Play/Pause does to the frame index.
    pub toggle_mode: ToggleMode,
    /// Minimum height in terminal rows for the plot panel.
    pub plot_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            color: DEFAULT_COLOR.to_string(),
            fps: DEFAULT_FPS,
            toggle_mode: ToggleMode::Restart,
            plot_height: 20,
        }
    }
}

impl Config {
    /// Initial curve parameters. Each value that fails validation is replaced
    /// by its default on its own and the reason is returned alongside.
    pub fn curve_parameters(&self) -> (CurveParameters, Vec<CycloidError>) {
        let mut problems = Vec::new();
        let radius = match validate_radius(self.radius) {
            Ok(()) => self.radius,
            Err(e) => {
                problems.push(e);
                DEFAULT_RADIUS
            }
        };
        let color = ColorToken::parse(&self.color).unwrap_or_else(|e| {
            problems.push(e);
            DEFAULT_COLOR
        });
        let fps = match frame_delay_for(self.fps) {
            Ok(_) => self.fps,
            Err(e) => {
                problems.push(e);
                DEFAULT_FPS
            }
        };
        (CurveParameters { radius, color, fps }, problems)
    }
}

/// Outcome of loading the config file.
pub struct LoadedConfig {
    pub config: Config,
    /// Set when the file existed but could not be used.
    pub problem: Option<CycloidError>,
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    Some(super::config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if the file doesn't exist or is invalid.
pub fn load_config() -> LoadedConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => LoadedConfig {
            config: Config::default(),
            problem: None,
        },
    }
}

/// Load config from `path`. Only a missing file is replaced by the commented
/// defaults; any other read failure is reported and the file left alone.
pub fn load_config_from(path: &Path) -> LoadedConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                LoadedConfig { config, problem: None }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                LoadedConfig {
                    config: Config::default(),
                    problem: Some(e),
                }
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Create default config file on first run
            let config = Config::default();
            if let Err(e) = write_default_config(path, &config) {
                tracing::warn!(path = %path.display(), error = %e, "could not write default config");
            }
            LoadedConfig { config, problem: None }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            LoadedConfig {
                config: Config::default(),
                problem: Some(CycloidError::Io(e)),
            }
        }
    }
}

pub fn parse_config(content: &str) -> CycloidResult<Config> {
    toml::from_str(content).map_err(|e| CycloidError::configuration(format!("config.toml: {}", e)))
}

/// Commented default config file contents.
pub fn default_config_text(config: &Config) -> String {
    format!(
        "# Cycloid configuration\n\
         \n\
         # Initial radius of the rolling circle (0.1 to 2.0)\n\
         radius = {:.1}\n\
         \n\
         # Initial curve color\n\
         color = \"{}\"\n\
         \n\
         # Initial playback speed in frames per second (30 to 100)\n\
         fps = {:.1}\n\
         \n\
         # Play/Pause behaviour: \"restart\" rewinds on every toggle, \"resume\" keeps the frame\n\
         toggle_mode = \"{}\"\n\
         \n\
         # Minimum height in terminal rows for the plot panel\n\
         plot_height = {}\n",
        config.radius,
        config.color,
        config.fps,
        config.toggle_mode.label(),
        config.plot_height,
    )
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> CycloidResult<()> {
    std::fs::write(path, default_config_text(config).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_text_round_trips() {
        let config = Config::default();
        let parsed = parse_config(&default_config_text(&config)).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let parsed = parse_config("radius = 1.5\n").unwrap();
        assert_eq!(parsed.radius, 1.5);
        assert_eq!(parsed.color, "#0000FF");
        assert_eq!(parsed.fps, 60.0);
        assert_eq!(parsed.toggle_mode, ToggleMode::Restart);
    }

    #[test]
    fn test_resume_mode() {
        let parsed = parse_config("toggle_mode = \"resume\"").unwrap();
        assert_eq!(parsed.toggle_mode, ToggleMode::Resume);
    }

    #[test]
    fn test_bad_toml_is_configuration_error() {
        let err = parse_config("radius = [").unwrap_err();
        assert!(matches!(err, CycloidError::Configuration(_)));
        assert!(parse_config("toggle_mode = \"sometimes\"").is_err());
    }

    #[test]
    fn test_curve_parameters_validate() {
        let config = Config {
            radius: -1.0,
            ..Config::default()
        };
        let (params, problems) = config.curve_parameters();
        assert_eq!(params.radius, DEFAULT_RADIUS);
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], CycloidError::Configuration(_)));

        let (params, problems) = Config::default().curve_parameters();
        assert_eq!(params, CurveParameters::default());
        assert!(problems.is_empty());
    }

    #[test]
    fn test_bad_color_keeps_other_fields() {
        let config = Config {
            radius: 1.5,
            color: "blue".to_string(),
            fps: 45.0,
            ..Config::default()
        };
        let (params, problems) = config.curve_parameters();
        assert_eq!(params.radius, 1.5);
        assert_eq!(params.fps, 45.0);
        assert_eq!(params.color, DEFAULT_COLOR);
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], CycloidError::Color(_)));
    }

    #[test]
    fn test_each_bad_field_reported() {
        let config = Config {
            radius: 0.0,
            color: "#12".to_string(),
            fps: -3.0,
            ..Config::default()
        };
        let (params, problems) = config.curve_parameters();
        assert_eq!(params, CurveParameters::default());
        assert_eq!(problems.len(), 3);
    }

    /// Fresh directory under the system temp dir for one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cycloid-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_written_with_defaults() {
        let dir = scratch_dir("missing");
        let path = dir.join("config.toml");
        let loaded = load_config_from(&path);
        assert!(loaded.problem.is_none());
        assert_eq!(loaded.config, Config::default());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_config(&written).unwrap(), Config::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unreadable_file_reported_and_preserved() {
        let dir = scratch_dir("non-utf8");
        let path = dir.join("config.toml");
        let original: &[u8] = b"radius = 1.5\n# caf\xe9\n";
        std::fs::write(&path, original).unwrap();

        let loaded = load_config_from(&path);
        assert!(matches!(loaded.problem, Some(CycloidError::Io(_))));
        assert_eq!(loaded.config, Config::default());
        assert_eq!(std::fs::read(&path).unwrap(), original);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_existing_file_loaded() {
        let dir = scratch_dir("existing");
        let path = dir.join("config.toml");
        std::fs::write(&path, "fps = 90.0\ntoggle_mode = \"resume\"\n").unwrap();
        let loaded = load_config_from(&path);
        assert!(loaded.problem.is_none());
        assert_eq!(loaded.config.fps, 90.0);
        assert_eq!(loaded.config.toggle_mode, ToggleMode::Resume);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
