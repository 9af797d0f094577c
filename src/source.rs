//! Display sources: where the monitor list comes from
//!
//! - **hyprctl**: `hyprctl [-i <instance>] monitors all -j` on a live session
//! - **file**: the same JSON saved to disk
//! - **fixture**: a built-in three-monitor arrangement for trying the editor out

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, error, info};

use crate::constants;
use crate::types::{Monitor, MonitorStore};

pub trait DisplaySource {
    /// Human-readable name for logs
    fn describe(&self) -> String;

    fn monitors(&self) -> Result<Vec<Monitor>>;
}

/// Query the source once; any failure becomes an empty store
pub fn load_store(source: &dyn DisplaySource) -> MonitorStore {
    match source.monitors() {
        Ok(monitors) => {
            info!(source = %source.describe(), count = monitors.len(), "Loaded monitors");
            MonitorStore::new(monitors)
        }
        Err(e) => {
            error!(source = %source.describe(), error = ?e, "Failed to load monitors, continuing with none");
            MonitorStore::default()
        }
    }
}

pub fn parse_monitors_json(json: &str) -> Result<Vec<Monitor>> {
    serde_json::from_str(json).context("Failed to decode monitor JSON")
}

#[derive(Debug, Clone, Default)]
pub struct HyprctlSource {
    pub instance: Option<String>,
}

impl HyprctlSource {
    pub fn new(instance: Option<String>) -> Self {
        Self { instance }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(constants::hyprctl::BINARY);
        if let Some(instance) = &self.instance {
            command.args(["-i", instance.as_str()]);
        }
        command
    }

    /// True if an instance was named or a default Hyprland session answers
    pub fn has_instance(&self) -> bool {
        if self.instance.is_some() {
            return true;
        }
        Command::new(constants::hyprctl::BINARY)
            .args(["monitors", "-j"])
            .output()
            .map(|output| output.status.success())
            .inspect_err(|e| debug!(error = %e, "hyprctl not runnable"))
            .unwrap_or(false)
    }
}

impl DisplaySource for HyprctlSource {
    fn describe(&self) -> String {
        match &self.instance {
            Some(instance) => format!("hyprctl (instance {instance})"),
            None => "hyprctl".to_string(),
        }
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        let output = self
            .command()
            .args(["monitors", "all", "-j"])
            .output()
            .context(format!("Failed to run {}", constants::hyprctl::BINARY))?;

        if !output.status.success() {
            anyhow::bail!(
                "Failed to get monitors ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        parse_monitors_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Reads `hyprctl monitors all -j` output saved to a file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl DisplaySource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        let contents = fs::read_to_string(&self.path)
            .context(format!("Failed to read {}", self.path.display()))?;
        parse_monitors_json(&contents)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl DisplaySource for FixtureSource {
    fn describe(&self) -> String {
        "built-in fixture".to_string()
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        Ok(fixture_monitors())
    }
}

fn fixture_monitors() -> Vec<Monitor> {
    let monitor = |id: i64, name: &str, (width, height): (u32, u32), (x, y): (i32, i32), refresh_rate: f64, modes: &[&str]| Monitor {
        id,
        name: name.to_string(),
        width,
        height,
        x,
        y,
        refresh_rate,
        disabled: false,
        scale: 1.0,
        available_modes: modes.iter().map(|m| m.to_string()).collect(),
    };

    vec![
        monitor(1, "HDMI-A-1", (1920, 1080), (0, 0), 60.0, &[
            "1920x1080@60Hz",
            "1600x900@60Hz",
            "1366x768@60Hz",
            "1280x720@60Hz",
        ]),
        monitor(2, "DP-1", (2560, 1440), (1920, 0), 144.0, &[
            "2560x1440@144Hz",
            "2560x1440@120Hz",
            "2560x1440@60Hz",
            "1920x1080@144Hz",
            "1920x1080@120Hz",
            "1920x1080@60Hz",
        ]),
        monitor(3, "DP-2", (1920, 1080), (1920, 1080), 144.0, &[
            "1920x1080@144Hz",
            "1920x1080@120Hz",
            "1920x1080@60Hz",
            "1600x900@144Hz",
            "1600x900@60Hz",
        ]),
    ]
}

#[cfg(test)]
pub struct StaticSource(pub Result<Vec<Monitor>, String>);

#[cfg(test)]
impl DisplaySource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        self.0.clone().map_err(|e| anyhow::anyhow!(e))
    }
}
