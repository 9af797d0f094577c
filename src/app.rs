//! Editing session: key loop and exit path

use anyhow::Result;
use std::path::Path;
use tracing::{error, info};

use crate::layout::Canvas;
use crate::persistence::Persistence;
use crate::screen::Screen;
use crate::selection::{SelectionState, Transition};
use crate::serializer;
use crate::types::{Key, MonitorStore};
use crate::ui;

/// Mutable arrangement for one session
#[derive(Debug, Clone)]
pub struct Session {
    pub store: MonitorStore,
    pub selection: SelectionState,
    pub canvas: Canvas,
}

/// How the exit path went
#[derive(Debug)]
pub enum SaveOutcome {
    Written,
    Skipped,
    Failed(anyhow::Error),
}

impl Session {
    pub fn new(store: MonitorStore, canvas: Canvas) -> Self {
        let selection = SelectionState::new(&store);
        Self { store, selection, canvas }
    }

    pub fn handle_key(&mut self, key: Key) -> Transition {
        self.selection.handle_key(key, &mut self.store)
    }

    /// Render, read, transition until quit or end of input
    pub fn run<S: Screen + ?Sized>(&mut self, screen: &mut S) -> Result<()> {
        loop {
            ui::render(screen, &self.store, &self.selection, self.canvas)?;
            let Some(key) = screen.next_key()? else {
                info!("Input closed, ending session");
                return Ok(());
            };
            if self.handle_key(key) == Transition::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Serialized configuration for the current arrangement
    pub fn config_text(&self) -> String {
        serializer::render_config(self.store.as_slice())
    }

    /// Write the configuration; a failure is logged and returned, never raised
    pub fn save<P: Persistence + ?Sized>(&self, persistence: &mut P, path: Option<&Path>) -> SaveOutcome {
        let Some(path) = path else {
            return SaveOutcome::Skipped;
        };
        match persistence.write_config(&self.config_text(), path) {
            Ok(()) => SaveOutcome::Written,
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to save monitor configuration");
                SaveOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use crate::screen::ScriptedScreen;
    use crate::source::{load_store, FixtureSource};

    const CANVAS: Canvas = Canvas { width: 50, height: 15 };

    fn fixture_session() -> Session {
        Session::new(load_store(&FixtureSource), CANVAS)
    }

    #[test]
    fn test_run_until_quit() {
        let mut session = fixture_session();
        // Select DP-1, move it 20px right, leave edit mode, quit
        let mut screen = ScriptedScreen::new(&[
            Key::Down,
            Key::Tab,
            Key::Tab,
            Key::Enter,
            Key::Right,
            Key::Right,
            Key::Enter,
            Key::Escape,
            Key::Down,
        ]);
        session.run(&mut screen).unwrap();

        assert_eq!(session.store.get(1).unwrap().x, 1940);
        // Frame count: initial + one per key handled before quitting
        assert_eq!(screen.frames.len(), 8);
        assert_eq!(screen.keys.len(), 1);
    }

    #[test]
    fn test_run_ends_when_input_closes() {
        let mut session = fixture_session();
        let mut screen = ScriptedScreen::new(&[Key::Tab]);
        session.run(&mut screen).unwrap();
        assert_eq!(screen.frames.len(), 2);
        assert!(screen.last_frame().contains("Monitor: HDMI-A-1"));
    }

    #[test]
    fn test_save_writes_serialized_store() {
        let mut session = fixture_session();
        let mut screen = ScriptedScreen::new(&[Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Space, Key::Char('q')]);
        session.run(&mut screen).unwrap();

        let mut sink = MemoryPersistence::default();
        let outcome = session.save(&mut sink, Some(Path::new("/tmp/monitors.conf")));
        assert!(matches!(outcome, SaveOutcome::Written));

        let (path, contents) = &sink.writes[0];
        assert_eq!(path, Path::new("/tmp/monitors.conf"));
        assert!(contents.contains("monitor = HDMI-A-1, disabled\n"));
        assert!(contents.contains("monitor = DP-1, 2560x1440@144, 1920x0, 1.0\n"));
        assert!(contents.ends_with("monitor = DP-2, 1920x1080@144, 1920x1080, 1.0\n"));
    }

    #[test]
    fn test_input_failure_keeps_edits_for_saving() {
        let mut session = fixture_session();
        let mut screen = ScriptedScreen::new(&[Key::Tab, Key::Tab, Key::Enter, Key::Down, Key::Down]);
        screen.fail_when_empty = true;

        assert!(session.run(&mut screen).is_err());
        assert_eq!(session.store.get(0).unwrap().y, 20);

        let mut sink = MemoryPersistence::default();
        let outcome = session.save(&mut sink, Some(Path::new("/tmp/monitors.conf")));
        assert!(matches!(outcome, SaveOutcome::Written));
        assert!(sink.writes[0].1.contains("monitor = HDMI-A-1, 1920x1080@60, 0x20, 1.0\n"));
    }

    #[test]
    fn test_save_failure_is_reported_not_raised() {
        let session = fixture_session();
        let before = session.store.clone();
        let mut sink = MemoryPersistence { fail: true, ..Default::default() };

        let outcome = session.save(&mut sink, Some(Path::new("/tmp/monitors.conf")));
        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert_eq!(session.store, before);
    }

    #[test]
    fn test_save_skipped_without_path() {
        let session = fixture_session();
        let mut sink = MemoryPersistence::default();
        assert!(matches!(session.save(&mut sink, None), SaveOutcome::Skipped));
        assert!(sink.writes.is_empty());
    }
}
