//! Mode catalog: sorted, deduplicated resolution and refresh-rate options
//!
//! Built from a monitor's advertised mode strings (`WIDTHxHEIGHT@RATEHz`).
//! Entries that don't match are skipped; an empty result is replaced by a
//! single 1920x1080@60 fallback so the editor always has something to offer.

use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::constants::modes::{FALLBACK_HEIGHT, FALLBACK_REFRESH_RATE, FALLBACK_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCatalog {
    /// Largest area first; equal areas ordered by width, then height, descending
    pub resolutions: Vec<Resolution>,
    /// Ascending
    pub refresh_rates: Vec<u32>,
}

impl ModeCatalog {
    pub fn from_modes<S: AsRef<str>>(modes: &[S]) -> Self {
        let mut resolutions = BTreeSet::new();
        let mut refresh_rates = BTreeSet::new();

        for mode in modes {
            match parse_mode(mode.as_ref()) {
                Some((resolution, rate)) => {
                    resolutions.insert(resolution);
                    refresh_rates.insert(rate);
                }
                None => debug!(mode = %mode.as_ref(), "Skipping unparseable mode string"),
            }
        }

        if resolutions.is_empty() {
            return Self::fallback();
        }

        let mut resolutions: Vec<Resolution> = resolutions.into_iter().collect();
        resolutions.sort_by(|a, b| {
            b.area()
                .cmp(&a.area())
                .then(b.width.cmp(&a.width))
                .then(b.height.cmp(&a.height))
        });

        Self {
            resolutions,
            refresh_rates: refresh_rates.into_iter().collect(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            resolutions: vec![Resolution::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)],
            refresh_rates: vec![FALLBACK_REFRESH_RATE],
        }
    }

    /// Index of an exact resolution match, or 0
    pub fn resolution_index(&self, width: u32, height: u32) -> usize {
        self.resolutions
            .iter()
            .position(|r| r.width == width && r.height == height)
            .unwrap_or(0)
    }

    /// Index of an exact refresh-rate match, or 0
    pub fn refresh_rate_index(&self, refresh_rate: f64) -> usize {
        self.refresh_rates
            .iter()
            .position(|rate| f64::from(*rate) == refresh_rate)
            .unwrap_or(0)
    }
}

/// Parse `WIDTHxHEIGHT@RATEHz` where all three are unsigned integers
fn parse_mode(mode: &str) -> Option<(Resolution, u32)> {
    let (size, rate) = mode.trim().split_once('@')?;
    let (width, height) = size.split_once('x')?;
    let rate = rate.strip_suffix("Hz")?;

    let width = parse_digits(width)?;
    let height = parse_digits(height)?;
    let rate = parse_digits(rate)?;
    if width == 0 || height == 0 || rate == 0 {
        return None;
    }
    Some((Resolution::new(width, height), rate))
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
