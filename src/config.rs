//! Editor settings
//!
//! Loaded from `<config_dir>/hypr-monitor-tui/settings.json`. Every field has a
//! default, so a missing or partial file is fine. Environment variables and
//! command-line flags are applied on top by `main`; only the file and the flags
//! are ever written back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::constants;
use crate::layout::Canvas;
use crate::persistence::default_output_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the generated `monitor = ...` lines are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Hyprland instance signature passed to `hyprctl -i`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Layout view size in character cells
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u16,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_canvas_width() -> u16 {
    constants::layout::DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> u16 {
    constants::layout::DEFAULT_CANVAS_HEIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: None,
            instance: None,
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            log_level: default_log_level(),
        }
    }
}

/// Result of reading the settings file, kept until logging is up
#[derive(Debug)]
pub enum SettingsFile {
    Missing,
    Parsed(Settings),
    Malformed(serde_json::Error),
    Unreadable(io::Error),
}

impl SettingsFile {
    pub fn read(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => SettingsFile::Parsed(settings),
                Err(e) => SettingsFile::Malformed(e),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => SettingsFile::Missing,
            Err(e) => SettingsFile::Unreadable(e),
        }
    }

    /// Log level stored in the file, if it was readable
    pub fn log_level(&self) -> Option<&str> {
        match self {
            SettingsFile::Parsed(settings) => Some(settings.log_level.as_str()),
            _ => None,
        }
    }

    /// Report how loading went and fall back to defaults on any problem
    pub fn into_settings(self, path: &Path) -> Settings {
        match self {
            SettingsFile::Parsed(settings) => {
                info!(path = %path.display(), "Loaded editor settings");
                settings
            }
            SettingsFile::Missing => {
                info!(path = %path.display(), "No settings file found, using defaults");
                Settings::default()
            }
            SettingsFile::Malformed(e) => {
                error!(path = %path.display(), error = %e, "Failed to parse settings file, using defaults");
                Settings::default()
            }
            SettingsFile::Unreadable(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read settings file, using defaults");
                Settings::default()
            }
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    #[cfg(test)]
    pub fn load_from(path: &Path) -> Self {
        SettingsFile::read(path).into_settings(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create settings directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents).context(format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Environment beats the file; call after anything that gets saved
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    fn apply_overrides_from<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(output) = lookup(constants::env::OUTPUT) {
            info!(output = %output, "Output path from environment");
            self.output_path = Some(PathBuf::from(output));
        }
        if let Some(signature) = lookup(constants::env::INSTANCE_SIGNATURE) {
            debug!(instance = %signature, "Hyprland instance from environment");
            self.instance = Some(signature);
        }
        if let Some(level) = lookup(constants::env::LOG_LEVEL) {
            self.log_level = level;
        }
    }

    /// Clamp values into usable ranges
    pub fn validate_and_clamp(&mut self) {
        use crate::constants::validation::*;

        if self.canvas_width < MIN_CANVAS_WIDTH {
            warn!(canvas_width = self.canvas_width, min = MIN_CANVAS_WIDTH, "canvas_width below minimum, clamping");
            self.canvas_width = MIN_CANVAS_WIDTH;
        } else if self.canvas_width > MAX_CANVAS_WIDTH {
            warn!(canvas_width = self.canvas_width, max = MAX_CANVAS_WIDTH, "canvas_width exceeds maximum, clamping");
            self.canvas_width = MAX_CANVAS_WIDTH;
        }

        if self.canvas_height < MIN_CANVAS_HEIGHT {
            warn!(canvas_height = self.canvas_height, min = MIN_CANVAS_HEIGHT, "canvas_height below minimum, clamping");
            self.canvas_height = MIN_CANVAS_HEIGHT;
        } else if self.canvas_height > MAX_CANVAS_HEIGHT {
            warn!(canvas_height = self.canvas_height, max = MAX_CANVAS_HEIGHT, "canvas_height exceeds maximum, clamping");
            self.canvas_height = MAX_CANVAS_HEIGHT;
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_path.clone().unwrap_or_else(default_output_path)
    }
}
