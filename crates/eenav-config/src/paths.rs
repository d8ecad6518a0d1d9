//! Path helpers for eenav's own state (log directory).

use std::path::PathBuf;

/// XDG config directory for eenav (`~/.config/eenav` on Linux).
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("eenav"))
}

/// Directory where rotating log files are written.
pub fn log_dir() -> PathBuf {
    xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
