pub mod config;

use std::path::PathBuf;

/// Get or create the data directory (~/.local/share/cycloid/), home of the log file.
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("cycloid");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get or create the config directory (~/.config/cycloid/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("cycloid");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
