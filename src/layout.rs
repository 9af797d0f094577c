//! Projection of absolute monitor geometry onto a character-cell canvas

use crate::constants::layout::{CELL_ASPECT, EMPTY_BOUNDS, MIN_BOX_HEIGHT, MIN_BOX_WIDTH};
use crate::types::Monitor;

/// Canvas size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u16,
    pub height: u16,
}

/// Axis-aligned box in absolute pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Bounding box of the enabled monitors, or the fixed default box if none is enabled
    pub fn of_enabled(monitors: &[Monitor]) -> Self {
        monitors
            .iter()
            .filter(|monitor| monitor.is_enabled())
            .fold(None, |acc: Option<Bounds>, monitor| {
                let next = Bounds {
                    min_x: i64::from(monitor.x),
                    min_y: i64::from(monitor.y),
                    max_x: monitor.right(),
                    max_y: monitor.bottom(),
                };
                Some(match acc {
                    None => next,
                    Some(b) => Bounds {
                        min_x: b.min_x.min(next.min_x),
                        min_y: b.min_y.min(next.min_y),
                        max_x: b.max_x.max(next.max_x),
                        max_y: b.max_y.max(next.max_y),
                    },
                })
            })
            .unwrap_or_else(|| {
                let (min_x, min_y, max_x, max_y) = EMPTY_BOUNDS;
                Bounds {
                    min_x: i64::from(min_x),
                    min_y: i64::from(min_y),
                    max_x: i64::from(max_x),
                    max_y: i64::from(max_y),
                }
            })
    }

    /// Horizontal extent, 1 when degenerate
    pub fn span_x(&self) -> f64 {
        span(self.max_x - self.min_x)
    }

    /// Vertical extent, 1 when degenerate
    pub fn span_y(&self) -> f64 {
        span(self.max_y - self.min_y)
    }
}

fn span(extent: i64) -> f64 {
    if extent <= 0 { 1.0 } else { extent as f64 }
}

/// Where to draw one monitor, relative to the canvas top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the monitor slice that was projected
    pub index: usize,
    pub col: i32,
    pub row: i32,
    pub width: u16,
    pub height: u16,
    pub selected: bool,
}

/// Project enabled monitors onto `canvas`, in `(y, x)` draw order
pub fn project(monitors: &[Monitor], canvas: Canvas, selected: usize) -> Vec<Placement> {
    let bounds = Bounds::of_enabled(monitors);
    let (span_x, span_y) = (bounds.span_x(), bounds.span_y());

    let scale_x = f64::from(canvas.width) / span_x;
    let scale_y = f64::from(canvas.height) / span_y;
    let scale = scale_x.min(scale_y);

    let offset_x = ((f64::from(canvas.width) - span_x * scale) / 2.0).round() as i32;
    let offset_y = ((f64::from(canvas.height) - span_y * scale * CELL_ASPECT) / 2.0).round() as i32;

    let selected_id = monitors.get(selected).map(|monitor| monitor.id);

    let mut order: Vec<usize> = monitors
        .iter()
        .enumerate()
        .filter(|(_, monitor)| monitor.is_enabled())
        .map(|(index, _)| index)
        .collect();
    order.sort_by_key(|&index| (monitors[index].y, monitors[index].x));

    order
        .into_iter()
        .map(|index| {
            let monitor = &monitors[index];
            let dx = (i64::from(monitor.x) - bounds.min_x) as f64 * scale;
            let dy = ((i64::from(monitor.y) - bounds.min_y) as f64 * scale).round() * CELL_ASPECT;

            Placement {
                index,
                col: offset_x + dx.round() as i32,
                row: offset_y + dy.round() as i32,
                width: scaled_cells(monitor.width, scale, MIN_BOX_WIDTH),
                height: scaled_cells(monitor.height, scale * CELL_ASPECT, MIN_BOX_HEIGHT),
                selected: Some(monitor.id) == selected_id,
            }
        })
        .collect()
}

fn scaled_cells(pixels: u32, scale: f64, min: u16) -> u16 {
    let cells = (f64::from(pixels) * scale).round();
    if cells.is_finite() && cells > f64::from(min) {
        cells.min(f64::from(u16::MAX)) as u16
    } else {
        min
    }
}
