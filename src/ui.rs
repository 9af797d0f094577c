//! Screen composition: monitor list, details, layout view and help

use anyhow::Result;

use crate::constants::ui::*;
use crate::layout::{self, Canvas};
use crate::screen::{Screen, Style};
use crate::selection::SelectionState;
use crate::types::{Monitor, MonitorStore, Property};

/// Draw one full frame
pub fn render<S: Screen + ?Sized>(
    screen: &mut S,
    store: &MonitorStore,
    selection: &SelectionState,
    canvas: Canvas,
) -> Result<()> {
    screen.clear()?;
    render_monitor_list(screen, store, selection)?;
    if let Some(monitor) = store.get(selection.selected_monitor) {
        render_details(screen, monitor, selection)?;
    }
    let layout_bottom = render_layout(screen, store, selection, canvas)?;
    render_help(screen, HELP_ROW.max(layout_bottom + 2))?;
    screen.flush()
}

fn draw_box<S: Screen + ?Sized>(
    screen: &mut S,
    col: u16,
    row: u16,
    width: u16,
    height: u16,
    title: Option<&str>,
) -> Result<()> {
    let inner = usize::from(width.saturating_sub(2));
    let title = title.map(|t| format!(" {t} ")).unwrap_or_default();
    let title: String = title.chars().take(inner).collect();
    let rule = "─".repeat(inner.saturating_sub(title.chars().count()));

    screen.move_to(col, row)?;
    screen.write(&format!("┌{title}{rule}┐"))?;
    for i in 1..height.saturating_sub(1) {
        screen.move_to(col, row + i)?;
        screen.write(&format!("│{}│", " ".repeat(inner)))?;
    }
    screen.move_to(col, row + height.saturating_sub(1))?;
    screen.write(&format!("└{}┘", "─".repeat(inner)))?;
    Ok(())
}

fn render_monitor_list<S: Screen + ?Sized>(
    screen: &mut S,
    store: &MonitorStore,
    selection: &SelectionState,
) -> Result<()> {
    let (col, row) = LIST_ORIGIN;
    let height = u16::try_from(store.len()).unwrap_or(u16::MAX).saturating_add(4);
    draw_box(screen, col, row, LIST_WIDTH, height, Some("Monitors"))?;

    for (index, monitor) in store.iter().enumerate() {
        let line = u16::try_from(index).unwrap_or(u16::MAX);
        let style = if index == selection.selected_monitor {
            Style::Selected
        } else if monitor.disabled {
            Style::Disabled
        } else {
            Style::Normal
        };
        let status = if monitor.disabled { "Off" } else { "On " };

        screen.move_to(col + 2, (row + 2).saturating_add(line))?;
        screen.set_style(style)?;
        screen.write(&format!(
            "  {:<10} [{status}] {}x{}",
            monitor.name, monitor.width, monitor.height
        ))?;
        screen.set_style(Style::Normal)?;
    }
    Ok(())
}

fn property_value(monitor: &Monitor, property: Property) -> String {
    match property {
        Property::Resolution => format!("{}x{}", monitor.width, monitor.height),
        Property::Position => format!("X:{} Y:{}", monitor.x, monitor.y),
        Property::RefreshRate => format!("{} Hz", monitor.refresh_rate),
        Property::Enabled => (if monitor.disabled { "No" } else { "Yes" }).to_string(),
    }
}

fn render_details<S: Screen + ?Sized>(
    screen: &mut S,
    monitor: &Monitor,
    selection: &SelectionState,
) -> Result<()> {
    let (col, row) = DETAILS_ORIGIN;
    draw_box(screen, col, row, DETAILS_WIDTH, DETAILS_HEIGHT, Some(&format!("Monitor: {}", monitor.name)))?;

    let (col, row) = (col + 2, row + 2);
    for (line, property) in (0u16..).zip(Property::ALL.iter()) {
        let focused = selection.selected_property == Some(*property);
        let editing = focused && selection.is_editing;
        let value = property_value(monitor, *property);

        screen.move_to(col, row + line * 2)?;
        screen.set_style(if focused { Style::Selected } else { Style::Normal })?;
        if editing {
            screen.write(&format!("{:<14}: > {value} <", property.label()))?;
        } else {
            screen.write(&format!("{:<14}:  {value}", property.label()))?;
        }
        screen.set_style(Style::Normal)?;
    }

    let scale_line = u16::try_from(Property::ALL.len()).unwrap_or(u16::MAX);
    screen.move_to(col, row + scale_line * 2)?;
    screen.write(&format!("{:<14}:  {}", "Scale", crate::serializer::two_significant_digits(monitor.scale)))?;

    screen.move_to(col, row + 12)?;
    screen.write("Press TAB to select property")?;
    screen.move_to(col, row + 13)?;
    screen.write("Press ENTER to edit selected property")?;
    Ok(())
}

/// Draws the layout box and returns its bottom row
fn render_layout<S: Screen + ?Sized>(
    screen: &mut S,
    store: &MonitorStore,
    selection: &SelectionState,
    canvas: Canvas,
) -> Result<u16> {
    let (col, row) = LAYOUT_ORIGIN;
    draw_box(screen, col - 2, row - 2, canvas.width + 4, canvas.height + 4, Some("Layout"))?;

    let monitors = store.as_slice();
    for placement in layout::project(monitors, canvas, selection.selected_monitor) {
        let monitor = &monitors[placement.index];
        let x = clamp_coord(i32::from(col) + placement.col);
        let y = clamp_coord(i32::from(row) + placement.row);

        screen.set_style(if placement.selected { Style::Highlight } else { Style::Normal })?;
        draw_box(screen, x, y, placement.width, placement.height, None)?;

        let inner = usize::from(placement.width.saturating_sub(2));
        let lines = [
            monitor.name.clone(),
            format!("{}x{}", monitor.width, monitor.height),
            format!("{}Hz", monitor.refresh_rate),
        ];
        for (i, line) in (0u16..).zip(lines.iter()) {
            if i + 2 >= placement.height {
                break;
            }
            let line: String = line.chars().take(inner).collect();
            screen.move_to(x.saturating_add(1), y.saturating_add(1 + i))?;
            screen.write(&line)?;
        }
        screen.set_style(Style::Normal)?;
    }

    let bottom = row + canvas.height + 1;
    screen.move_to(col, bottom)?;
    screen.write("Position: (0,0) is top-left")?;
    Ok(bottom)
}

fn clamp_coord(value: i32) -> u16 {
    u16::try_from(value.clamp(1, i32::from(u16::MAX))).unwrap_or(u16::MAX)
}

fn render_help<S: Screen + ?Sized>(screen: &mut S, row: u16) -> Result<()> {
    screen.move_to(1, row)?;
    screen.write("Controls: ↑/↓ - Select monitor | Tab - Select property | Enter - Edit | q/Esc - Save & quit")?;
    screen.move_to(1, row + 1)?;
    screen.write("When editing: ↑/↓/←/→ - Adjust values | Space - Toggle enabled | Enter/Esc - Done")?;
    Ok(())
}
