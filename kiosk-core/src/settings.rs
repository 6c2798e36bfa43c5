use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_PATH;

/// Launcher settings, distinct from the kiosk URL config: these describe the
/// machine the launcher runs on (window geometry, kiosk switch, logging),
/// ship with the install, and are optional — a bare install runs entirely on
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub kiosk: KioskSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Where the kiosk URL config is read from.
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,
    /// Open webview devtools at startup (development aid, debug builds only).
    #[serde(default)]
    pub devtools: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: f64,
    #[serde(default = "default_window_height")]
    pub height: f64,
    #[serde(default = "default_window_title")]
    pub title: String,
}

fn default_window_width() -> f64 {
    1080.0
}
fn default_window_height() -> f64 {
    1920.0
}
fn default_window_title() -> String {
    "Kiosk".to_string()
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskSettings {
    /// Switch the window into full-screen kiosk mode shortly after ready.
    /// Disable for maintenance sessions on a desktop.
    #[serde(default = "default_kiosk_enabled")]
    pub enabled: bool,
}

fn default_kiosk_enabled() -> bool {
    true
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            enabled: default_kiosk_enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Enable file logging in addition to the console stream.
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,
    /// Directory for log files (relative to the working directory or absolute).
    #[serde(default = "default_log_directory")]
    pub directory: String,
    /// Prefix for log file names.
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
    /// Maximum number of log files to keep (0 = unlimited).
    #[serde(default = "default_max_files")]
    pub max_files: u32,
}

fn default_logging_enabled() -> bool {
    true
}
fn default_log_directory() -> String {
    "logs".to_string()
}
fn default_log_file_prefix() -> String {
    "kiosk-launcher".to_string()
}
fn default_max_files() -> u32 {
    30
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            directory: default_log_directory(),
            file_prefix: default_log_file_prefix(),
            max_files: default_max_files(),
        }
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

impl Settings {
    /// Load settings from layered TOML files.
    ///
    /// Loads `{base_name}.toml` and then `{base_name}.local.toml` (later
    /// files override earlier); both are optional. A missing pair yields
    /// `Settings::default()`.
    ///
    /// # Arguments
    /// * `base_name` - Base name without extension (e.g. "settings" for
    ///   settings.toml)
    pub fn from_file<P: AsRef<Path>>(base_name: P) -> Result<Self> {
        let base_str = base_name
            .as_ref()
            .to_str()
            .context("Invalid settings base path")?;

        let local = format!("{}.local", base_str);
        let builder = config::Config::builder()
            .add_source(config::File::with_name(base_str).required(false))
            .add_source(config::File::with_name(&local).required(false));

        let settings = builder.build().context("Failed to build settings")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize settings")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            kiosk: KioskSettings::default(),
            logging: LoggingSettings::default(),
            config_path: default_config_path(),
            devtools: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.window.width, 1080.0);
        assert_eq!(settings.window.height, 1920.0);
        assert!(settings.kiosk.enabled);
        assert!(!settings.devtools);
        assert_eq!(settings.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
devtools = true

[window]
width = 1280.0
height = 720.0
title = "Lobby Display"

[kiosk]
enabled = false

[logging]
directory = "/var/log/kiosk"
max_files = 7
"#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.window.width, 1280.0);
        assert_eq!(settings.window.title, "Lobby Display");
        assert!(!settings.kiosk.enabled);
        assert!(settings.devtools);
        assert_eq!(settings.logging.directory, "/var/log/kiosk");
        assert_eq!(settings.logging.max_files, 7);
        // Unspecified fields fall back to defaults
        assert!(settings.logging.enabled);
        assert_eq!(settings.logging.file_prefix, "kiosk-launcher");
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let toml_str = r#"
config_path = "/etc/kiosk/config.json"
"#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.config_path, PathBuf::from("/etc/kiosk/config.json"));
        assert_eq!(settings.window.width, 1080.0);
        assert!(settings.kiosk.enabled);
    }

    #[test]
    fn test_from_file_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(dir.path().join("settings")).unwrap();
        assert_eq!(settings.window.width, 1080.0);
        assert!(settings.kiosk.enabled);
    }

    #[test]
    fn test_from_file_with_local_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.toml"),
            "[window]\ntitle = \"Base\"\nwidth = 800.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("settings.local.toml"),
            "[window]\ntitle = \"Override\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(dir.path().join("settings")).unwrap();
        assert_eq!(settings.window.title, "Override");
        assert_eq!(settings.window.width, 800.0);
    }
}
