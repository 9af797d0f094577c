//! Screen capability: draw primitives and key input
//!
//! The editor only talks to [`Screen`]. [`TerminalScreen`] implements it on
//! top of crossterm; tests use a scripted screen that replays keys.

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use tracing::{debug, warn};

use crate::types::Key;

/// Text styles used by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    /// Cursor row / focused property
    Selected,
    /// Selected monitor in the layout view
    Highlight,
    Disabled,
}

pub trait Screen {
    fn clear(&mut self) -> Result<()>;

    /// Move to a 1-based column/row
    fn move_to(&mut self, col: u16, row: u16) -> Result<()>;

    fn set_style(&mut self, style: Style) -> Result<()>;

    fn write(&mut self, text: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Block for the next key; `None` once input is closed
    fn next_key(&mut self) -> Result<Option<Key>>;
}

/// Raw-mode, alternate-screen terminal; restored on drop
pub struct TerminalScreen {
    out: Stdout,
    active: bool,
}

impl TerminalScreen {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        debug!("Terminal entered raw mode");
        Ok(Self { out, active: true })
    }

    /// Leave raw mode and the alternate screen
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = ?e, "Failed to restore terminal");
        }
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn move_to(&mut self, col: u16, row: u16) -> Result<()> {
        queue!(self.out, MoveTo(col.saturating_sub(1), row.saturating_sub(1)))?;
        Ok(())
    }

    fn set_style(&mut self, style: Style) -> Result<()> {
        match style {
            Style::Normal => queue!(self.out, ResetColor)?,
            Style::Selected => queue!(self.out, SetForegroundColor(Color::Black), SetBackgroundColor(Color::White))?,
            Style::Highlight => queue!(self.out, SetForegroundColor(Color::Yellow), SetBackgroundColor(Color::Blue))?,
            Style::Disabled => queue!(self.out, ResetColor, SetForegroundColor(Color::DarkGrey))?,
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush terminal")
    }

    fn next_key(&mut self) -> Result<Option<Key>> {
        loop {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(key) = decode_key(key) {
                        return Ok(Some(key));
                    }
                }
                _ => {}
            }
        }
    }
}

/// Map a crossterm key event to an editor key; unmapped keys are dropped
pub fn decode_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Char('q'));
    }
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Replays a key script and records everything written
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedScreen {
    pub keys: std::collections::VecDeque<Key>,
    pub frames: Vec<String>,
    /// Fail the read after the last scripted key instead of closing input
    pub fail_when_empty: bool,
    current: String,
}

#[cfg(test)]
impl ScriptedScreen {
    pub fn new(keys: &[Key]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
impl Screen for ScriptedScreen {
    fn clear(&mut self) -> Result<()> {
        self.current.clear();
        Ok(())
    }

    fn move_to(&mut self, _col: u16, _row: u16) -> Result<()> {
        self.current.push('\n');
        Ok(())
    }

    fn set_style(&mut self, _style: Style) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.current.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.frames.push(self.current.clone());
        Ok(())
    }

    fn next_key(&mut self) -> Result<Option<Key>> {
        match self.keys.pop_front() {
            None if self.fail_when_empty => anyhow::bail!("terminal input lost"),
            key => Ok(key),
        }
    }
}
