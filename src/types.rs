//! Shared data types: monitor records, the monitor store and input tokens

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// One display as reported by the display source
///
/// Field names follow the `hyprctl monitors -j` JSON. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub refresh_rate: f64,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Raw advertised mode strings, e.g. `2560x1440@144Hz`
    #[serde(default)]
    pub available_modes: Vec<String>,
}

fn default_scale() -> f64 {
    1.0
}

impl Monitor {
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Right edge in absolute pixels
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge in absolute pixels
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// Ordered collection of monitors with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorStore {
    monitors: Vec<Monitor>,
}

impl MonitorStore {
    /// Build a store, dropping any monitor whose id was already seen
    pub fn new(monitors: Vec<Monitor>) -> Self {
        let mut seen = HashSet::new();
        let monitors = monitors
            .into_iter()
            .filter(|monitor| {
                let fresh = seen.insert(monitor.id);
                if !fresh {
                    warn!(id = monitor.id, name = %monitor.name, "Duplicate monitor id from display source, dropping");
                }
                fresh
            })
            .collect();
        Self { monitors }
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Monitor> {
        self.monitors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Monitor> {
        self.monitors.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter()
    }
}

/// Logical key tokens delivered by the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Tab,
    Enter,
    Escape,
    Space,
    Char(char),
}

/// Editable monitor property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Resolution,
    Position,
    RefreshRate,
    Enabled,
}

impl Property {
    /// Tab order
    pub const ALL: [Property; 4] = [
        Property::Resolution,
        Property::Position,
        Property::RefreshRate,
        Property::Enabled,
    ];

    /// Next property in Tab order, wrapping; `None` enters the first
    pub fn cycle(current: Option<Property>) -> Property {
        match current {
            None => Self::ALL[0],
            Some(property) => {
                let index = Self::ALL.iter().position(|p| *p == property).unwrap_or(0);
                Self::ALL[(index + 1) % Self::ALL.len()]
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Property::Resolution => "Resolution",
            Property::Position => "Position",
            Property::RefreshRate => "Refresh Rate",
            Property::Enabled => "Enabled",
        }
    }
}

#[cfg(test)]
pub(crate) fn test_monitor(id: i64, name: &str, x: i32, y: i32, width: u32, height: u32) -> Monitor {
    Monitor {
        id,
        name: name.to_string(),
        width,
        height,
        x,
        y,
        refresh_rate: 60.0,
        disabled: false,
        scale: 1.0,
        available_modes: vec![format!("{width}x{height}@60Hz")],
    }
}
