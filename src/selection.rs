//! Navigation and edit state machine
//!
//! `SelectionState` tracks which monitor and property the cursor is on and
//! whether the property is being edited. Every key goes through
//! [`SelectionState::handle_key`], which mutates the store passed in.

use tracing::{debug, info};

use crate::constants::editing::POSITION_STEP;
use crate::modes::ModeCatalog;
use crate::types::{Key, Monitor, MonitorStore, Property};

/// What the controller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_monitor: usize,
    pub selected_property: Option<Property>,
    pub is_editing: bool,
    pub resolution_cursor: usize,
    pub refresh_rate_cursor: usize,
}

impl SelectionState {
    /// Navigate mode on the first monitor, cursors matched to its current mode
    pub fn new(store: &MonitorStore) -> Self {
        let mut state = Self {
            selected_monitor: 0,
            selected_property: None,
            is_editing: false,
            resolution_cursor: 0,
            refresh_rate_cursor: 0,
        };
        state.sync_cursors(store);
        state
    }

    pub fn handle_key(&mut self, key: Key, store: &mut MonitorStore) -> Transition {
        if key == Key::Char('q') {
            return Transition::Quit;
        }
        if store.is_empty() {
            return match key {
                Key::Escape => Transition::Quit,
                _ => Transition::Continue,
            };
        }

        if self.is_editing {
            self.handle_edit_key(key, store);
            Transition::Continue
        } else {
            self.handle_navigate_key(key, store)
        }
    }

    /// Catalog for the selected monitor
    pub fn catalog(&self, store: &MonitorStore) -> ModeCatalog {
        store
            .get(self.selected_monitor)
            .map(|monitor| ModeCatalog::from_modes(monitor.available_modes.as_slice()))
            .unwrap_or_else(ModeCatalog::fallback)
    }

    /// Point both cursors at the selected monitor's current mode
    pub fn sync_cursors(&mut self, store: &MonitorStore) {
        let Some(monitor) = store.get(self.selected_monitor) else {
            self.resolution_cursor = 0;
            self.refresh_rate_cursor = 0;
            return;
        };
        let catalog = ModeCatalog::from_modes(monitor.available_modes.as_slice());
        self.resolution_cursor = catalog.resolution_index(monitor.width, monitor.height);
        self.refresh_rate_cursor = catalog.refresh_rate_index(monitor.refresh_rate);
    }

    fn handle_navigate_key(&mut self, key: Key, store: &MonitorStore) -> Transition {
        match key {
            Key::Up => self.select_monitor(self.selected_monitor.saturating_sub(1), store),
            Key::Down => {
                let last = store.len().saturating_sub(1);
                self.select_monitor((self.selected_monitor + 1).min(last), store);
            }
            Key::Tab => {
                self.selected_property = Some(Property::cycle(self.selected_property));
            }
            Key::Enter => {
                if let Some(property) = self.selected_property {
                    self.is_editing = true;
                    self.sync_cursors(store);
                    debug!(property = ?property, monitor = self.selected_monitor, "Entering edit mode");
                }
            }
            Key::Escape => return Transition::Quit,
            _ => {}
        }
        Transition::Continue
    }

    fn select_monitor(&mut self, index: usize, store: &MonitorStore) {
        self.selected_monitor = index;
        self.selected_property = None;
        self.sync_cursors(store);
    }

    fn handle_edit_key(&mut self, key: Key, store: &mut MonitorStore) {
        if matches!(key, Key::Enter | Key::Escape) {
            self.is_editing = false;
            return;
        }
        let Some(property) = self.selected_property else {
            self.is_editing = false;
            return;
        };

        match property {
            Property::Resolution => self.edit_resolution(key, store),
            Property::Position => self.edit_position(key, store),
            Property::RefreshRate => self.edit_refresh_rate(key, store),
            Property::Enabled => self.edit_enabled(key, store),
        }
    }

    fn edit_resolution(&mut self, key: Key, store: &mut MonitorStore) {
        let Some(step) = cursor_step(key) else { return };
        let catalog = self.catalog(store);
        self.resolution_cursor = cycle_index(self.resolution_cursor, step, catalog.resolutions.len());
        let resolution = catalog.resolutions[self.resolution_cursor];

        if let Some(monitor) = store.get_mut(self.selected_monitor) {
            monitor.width = resolution.width;
            monitor.height = resolution.height;
            info!(monitor = %monitor.name, resolution = %resolution, "Resolution changed");
        }
    }

    fn edit_refresh_rate(&mut self, key: Key, store: &mut MonitorStore) {
        let Some(step) = cursor_step(key) else { return };
        let catalog = self.catalog(store);
        self.refresh_rate_cursor = cycle_index(self.refresh_rate_cursor, step, catalog.refresh_rates.len());
        let rate = catalog.refresh_rates[self.refresh_rate_cursor];

        if let Some(monitor) = store.get_mut(self.selected_monitor) {
            monitor.refresh_rate = f64::from(rate);
            info!(monitor = %monitor.name, refresh_rate = rate, "Refresh rate changed");
        }
    }

    fn edit_position(&mut self, key: Key, store: &mut MonitorStore) {
        let (dx, dy) = match key {
            Key::Up => (0, -POSITION_STEP),
            Key::Down => (0, POSITION_STEP),
            Key::Right => (POSITION_STEP, 0),
            Key::Left => (-POSITION_STEP, 0),
            _ => return,
        };
        if let Some(monitor) = store.get_mut(self.selected_monitor) {
            monitor.x = monitor.x.saturating_add(dx);
            monitor.y = monitor.y.saturating_add(dy);
            debug!(monitor = %monitor.name, x = monitor.x, y = monitor.y, "Position changed");
        }
    }

    fn edit_enabled(&mut self, key: Key, store: &mut MonitorStore) {
        if !matches!(key, Key::Space | Key::Left | Key::Right) {
            return;
        }
        let index = self.selected_monitor;
        let Some(monitor) = store.get(index) else { return };
        let enabling = monitor.disabled;
        let at_origin = monitor.x == 0 && monitor.y == 0;

        let new_x = if enabling && at_origin {
            Some(rightmost_edge(store.as_slice(), index))
                .filter(|max_x| *max_x > 0)
                .and_then(|max_x| i32::try_from(max_x).ok())
        } else {
            None
        };

        if let Some(monitor) = store.get_mut(index) {
            monitor.disabled = !monitor.disabled;
            if let Some(x) = new_x {
                monitor.x = x;
                info!(monitor = %monitor.name, x = x, "Re-enabled monitor moved right of the layout");
            }
            info!(monitor = %monitor.name, enabled = monitor.is_enabled(), "Enabled state toggled");
        }
    }
}

/// Max right edge over enabled monitors other than `skip`, 0 if there are none
fn rightmost_edge(monitors: &[Monitor], skip: usize) -> i64 {
    monitors
        .iter()
        .enumerate()
        .filter(|(index, monitor)| *index != skip && monitor.is_enabled())
        .map(|(_, monitor)| monitor.right())
        .max()
        .unwrap_or(0)
}

fn cursor_step(key: Key) -> Option<isize> {
    match key {
        Key::Up | Key::Right => Some(1),
        Key::Down | Key::Left => Some(-1),
        _ => None,
    }
}

fn cycle_index(current: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (current as isize + step).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_monitor;

    fn store_of(monitors: Vec<Monitor>) -> MonitorStore {
        MonitorStore::new(monitors)
    }

    fn three_monitors() -> MonitorStore {
        let mut dp1 = test_monitor(2, "DP-1", 1920, 0, 2560, 1440);
        dp1.refresh_rate = 144.0;
        dp1.available_modes = vec![
            "2560x1440@144Hz".into(),
            "2560x1440@120Hz".into(),
            "2560x1440@60Hz".into(),
            "1920x1080@144Hz".into(),
            "1920x1080@60Hz".into(),
        ];
        store_of(vec![
            test_monitor(1, "HDMI-A-1", 0, 0, 1920, 1080),
            dp1,
            test_monitor(3, "DP-2", 1920, 1440, 1920, 1080),
        ])
    }

    fn press(state: &mut SelectionState, store: &mut MonitorStore, keys: &[Key]) -> Transition {
        let mut last = Transition::Continue;
        for key in keys {
            last = state.handle_key(*key, store);
        }
        last
    }

    #[test]
    fn test_initial_state() {
        let store = three_monitors();
        let state = SelectionState::new(&store);
        assert_eq!(state.selected_monitor, 0);
        assert_eq!(state.selected_property, None);
        assert!(!state.is_editing);
    }

    #[test]
    fn test_navigation_clamps_to_store() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Down; 10]);
        assert_eq!(state.selected_monitor, 2);

        press(&mut state, &mut store, &[Key::Up; 10]);
        assert_eq!(state.selected_monitor, 0);
    }

    #[test]
    fn test_navigation_resets_property_and_syncs_cursors() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Tab, Key::Down]);
        assert_eq!(state.selected_monitor, 1);
        assert_eq!(state.selected_property, None);
        // DP-1 runs 2560x1440@144: first resolution, last of [60, 120, 144]
        assert_eq!(state.resolution_cursor, 0);
        assert_eq!(state.refresh_rate_cursor, 2);
    }

    #[test]
    fn test_tab_cycle_closed_under_four() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Tab]);
        assert_eq!(state.selected_property, Some(Property::Resolution));
        press(&mut state, &mut store, &[Key::Tab, Key::Tab, Key::Tab]);
        assert_eq!(state.selected_property, Some(Property::Enabled));
        press(&mut state, &mut store, &[Key::Tab]);
        assert_eq!(state.selected_property, Some(Property::Resolution));
    }

    #[test]
    fn test_enter_without_property_stays_in_navigate() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        press(&mut state, &mut store, &[Key::Enter]);
        assert!(!state.is_editing);
    }

    #[test]
    fn test_quit_keys() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        assert_eq!(state.handle_key(Key::Escape, &mut store), Transition::Quit);
        assert_eq!(state.handle_key(Key::Char('q'), &mut store), Transition::Quit);

        press(&mut state, &mut store, &[Key::Tab, Key::Enter]);
        assert_eq!(state.handle_key(Key::Escape, &mut store), Transition::Continue);
        assert!(!state.is_editing);
        assert_eq!(state.selected_property, Some(Property::Resolution));
    }

    #[test]
    fn test_resolution_cycle_wraps_both_ways() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        // DP-1: [2560x1440, 1920x1080], currently index 0
        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Enter]);
        assert!(state.is_editing);

        press(&mut state, &mut store, &[Key::Down]);
        assert_eq!(state.resolution_cursor, 1);
        let monitor = store.get(1).unwrap();
        assert_eq!((monitor.width, monitor.height), (1920, 1080));

        press(&mut state, &mut store, &[Key::Right]);
        assert_eq!(state.resolution_cursor, 0);
        assert_eq!(store.get(1).unwrap().width, 2560);

        press(&mut state, &mut store, &[Key::Up]);
        assert_eq!(state.resolution_cursor, 1);
        assert_eq!(store.get(1).unwrap().width, 1920);
    }

    #[test]
    fn test_refresh_rate_cycle_wraps_both_ways() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Tab, Key::Tab, Key::Enter]);
        assert_eq!(state.selected_property, Some(Property::RefreshRate));
        assert_eq!(state.refresh_rate_cursor, 2);

        press(&mut state, &mut store, &[Key::Up]);
        assert_eq!(state.refresh_rate_cursor, 0);
        assert_eq!(store.get(1).unwrap().refresh_rate, 60.0);

        press(&mut state, &mut store, &[Key::Left]);
        assert_eq!(state.refresh_rate_cursor, 2);
        assert_eq!(store.get(1).unwrap().refresh_rate, 144.0);

        press(&mut state, &mut store, &[Key::Down]);
        assert_eq!(store.get(1).unwrap().refresh_rate, 120.0);
    }

    #[test]
    fn test_unmatched_mode_starts_cursor_at_zero() {
        let mut monitor = test_monitor(1, "HDMI-A-1", 0, 0, 1280, 1024);
        monitor.refresh_rate = 59.94;
        monitor.available_modes = vec!["1920x1080@60Hz".into(), "1280x720@60Hz".into()];
        let mut store = store_of(vec![monitor]);
        let mut state = SelectionState::new(&store);
        assert_eq!(state.resolution_cursor, 0);
        assert_eq!(state.refresh_rate_cursor, 0);

        press(&mut state, &mut store, &[Key::Tab, Key::Enter, Key::Right]);
        assert_eq!(store.get(0).unwrap().width, 1280);
        assert_eq!(store.get(0).unwrap().height, 720);
    }

    #[test]
    fn test_position_edit_steps_by_ten() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        press(&mut state, &mut store, &[Key::Tab, Key::Tab, Key::Enter]);
        assert_eq!(state.selected_property, Some(Property::Position));

        press(&mut state, &mut store, &[Key::Left, Key::Left, Key::Up, Key::Right, Key::Down, Key::Down]);
        let monitor = store.get(0).unwrap();
        assert_eq!((monitor.x, monitor.y), (-10, 10));
    }

    #[test]
    fn test_position_edit_saturates_at_extremes() {
        let mut store = store_of(vec![test_monitor(1, "HDMI-A-1", i32::MAX - 5, i32::MIN + 5, 1920, 1080)]);
        let mut state = SelectionState::new(&store);
        press(&mut state, &mut store, &[Key::Tab, Key::Tab, Key::Enter, Key::Right, Key::Up]);

        let monitor = store.get(0).unwrap();
        assert_eq!((monitor.x, monitor.y), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_enable_with_layout_left_of_origin_stays_put() {
        let mut origin = test_monitor(2, "DP-1", 0, 0, 2560, 1440);
        origin.disabled = true;
        let mut store = store_of(vec![
            test_monitor(1, "eDP-1", -3840, 0, 1920, 1080),
            origin,
            test_monitor(3, "HDMI-A-1", -1920, 0, 1920, 1080),
        ]);
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Space]);
        let monitor = store.get(1).unwrap();
        assert!(monitor.is_enabled());
        assert_eq!((monitor.x, monitor.y), (0, 0));
    }

    #[test]
    fn test_enable_at_origin_moves_right_of_layout() {
        let mut disabled = test_monitor(2, "DP-1", 0, 0, 2560, 1440);
        disabled.disabled = true;
        let mut store = store_of(vec![test_monitor(1, "HDMI-A-1", 0, 0, 1920, 1080), disabled]);
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Space]);
        let monitor = store.get(1).unwrap();
        assert!(monitor.is_enabled());
        assert_eq!((monitor.x, monitor.y), (1920, 0));
    }

    #[test]
    fn test_enable_ignores_disabled_monitors_far_right() {
        let mut far = test_monitor(3, "DP-2", 5000, 0, 1920, 1080);
        far.disabled = true;
        let mut origin = test_monitor(2, "DP-1", 0, 0, 2560, 1440);
        origin.disabled = true;
        let mut store = store_of(vec![test_monitor(1, "HDMI-A-1", 0, 0, 1920, 1080), origin, far]);
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Space]);
        let monitor = store.get(1).unwrap();
        assert!(monitor.is_enabled());
        assert_eq!((monitor.x, monitor.y), (1920, 0));
        assert!(store.get(2).unwrap().disabled);
    }

    #[test]
    fn test_enable_away_from_origin_keeps_position() {
        let mut disabled = test_monitor(2, "DP-1", 500, 0, 2560, 1440);
        disabled.disabled = true;
        let mut store = store_of(vec![test_monitor(1, "HDMI-A-1", 0, 0, 1920, 1080), disabled]);
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Down, Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Right]);
        let monitor = store.get(1).unwrap();
        assert!(monitor.is_enabled());
        assert_eq!((monitor.x, monitor.y), (500, 0));
    }

    #[test]
    fn test_enable_with_no_other_enabled_stays_at_origin() {
        let mut first = test_monitor(1, "HDMI-A-1", 0, 0, 1920, 1080);
        first.disabled = true;
        let mut store = store_of(vec![first]);
        let mut state = SelectionState::new(&store);

        press(&mut state, &mut store, &[Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Left]);
        let monitor = store.get(0).unwrap();
        assert!(monitor.is_enabled());
        assert_eq!(monitor.x, 0);
    }

    #[test]
    fn test_disable_keeps_geometry() {
        let mut store = three_monitors();
        let mut state = SelectionState::new(&store);
        press(&mut state, &mut store, &[Key::Tab, Key::Tab, Key::Tab, Key::Tab, Key::Enter, Key::Space]);

        let monitor = store.get(0).unwrap();
        assert!(monitor.disabled);
        assert_eq!((monitor.width, monitor.height), (1920, 1080));
        assert_eq!(monitor.refresh_rate, 60.0);
    }

    #[test]
    fn test_cycle_index_wraps() {
        assert_eq!(cycle_index(0, -1, 3), 2);
        assert_eq!(cycle_index(2, 1, 3), 0);
        assert_eq!(cycle_index(0, 1, 1), 0);
    }
}
