//! Hyprland `monitor = ...` configuration output

use crate::types::Monitor;

const HEADER: &str = "\
######################################################
## DO NOT EDIT THIS FILE!                           ##
## This file is automatically generated by          ##
## hypr-monitor-tui. Changes will be overwritten.   ##
######################################################
";

/// Header banner followed by one line per monitor
pub fn render_config(monitors: &[Monitor]) -> String {
    let mut out = String::from(HEADER);
    out.push_str(&render_monitors(monitors));
    out
}

/// One line per monitor, in store order
pub fn render_monitors(monitors: &[Monitor]) -> String {
    monitors
        .iter()
        .map(|monitor| monitor_line(monitor) + "\n")
        .collect()
}

pub fn monitor_line(monitor: &Monitor) -> String {
    if monitor.disabled {
        format!("monitor = {}, disabled", monitor.name)
    } else {
        format!(
            "monitor = {}, {}x{}@{}, {}x{}, {}",
            monitor.name,
            monitor.width,
            monitor.height,
            monitor.refresh_rate,
            monitor.x,
            monitor.y,
            two_significant_digits(monitor.scale),
        )
    }
}

/// Format like `Number.toPrecision(2)`: `1` → `1.0`, `1.25` → `1.3`,
/// `1.15` → `1.1` (the stored double sits below the half), `0.5` → `0.50`, `12` → `12`
pub fn two_significant_digits(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0.0".to_string();
    }

    let (digits, exponent) = round_to_two_digits(value.abs());
    let sign = if value < 0.0 { "-" } else { "" };
    let (first, second) = (digits / 10, digits % 10);

    let body = if !(-6..2).contains(&exponent) {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{first}.{second}e{exp_sign}{}", exponent.abs())
    } else if exponent == 1 {
        format!("{digits}")
    } else if exponent == 0 {
        format!("{first}.{second}")
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("0.{zeros}{digits:02}")
    };
    format!("{sign}{body}")
}

/// Leading two significant digits of a positive finite value and the decimal
/// exponent of the first one, rounding half up on the exact binary value
fn round_to_two_digits(value: f64) -> (u32, i32) {
    // Forty digits is far past any run of nines an f64 can produce, so the
    // third digit below is the exact one and not a rounding carry
    let exact = format!("{value:.40e}");
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let mut leading = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| u32::from(b - b'0'));
    let first = leading.next().unwrap_or(0);
    let second = leading.next().unwrap_or(0);
    let third = leading.next().unwrap_or(0);

    let mut digits = first * 10 + second + u32::from(third >= 5);
    if digits == 100 {
        digits = 10;
        exponent += 1;
    }
    (digits, exponent)
}
