//! Named constants, grouped by concern
//!
//! File locations, environment variable names, settings bounds, mode fallbacks,
//! layout geometry and screen anchors.

/// Settings file and output locations
pub mod config {
    /// Directory under the user's config/cache dir owned by this tool
    pub const APP_DIR: &str = "hypr-monitor-tui";

    /// Editor settings file name
    pub const FILENAME: &str = "settings.json";

    /// Log file name (placed in the cache dir)
    pub const LOG_FILENAME: &str = "hypr-monitor-tui.log";

    /// Hyprland config directory (relative to the config dir) holding generated files
    pub const OUTPUT_DIR: &str = "hypr/configs/autogen";

    /// Generated monitor configuration file name
    pub const OUTPUT_FILENAME: &str = "monitors.conf";
}

/// Environment variable names
pub mod env {
    /// Log level override (trace, debug, info, warn, error)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Output path override
    pub const OUTPUT: &str = "HYPR_MONITOR_TUI_OUTPUT";

    /// Set by Hyprland for every process started inside a session
    pub const INSTANCE_SIGNATURE: &str = "HYPRLAND_INSTANCE_SIGNATURE";
}

/// Settings validation bounds
pub mod validation {
    pub const MIN_CANVAS_WIDTH: u16 = 20;
    pub const MAX_CANVAS_WIDTH: u16 = 200;
    pub const MIN_CANVAS_HEIGHT: u16 = 5;
    pub const MAX_CANVAS_HEIGHT: u16 = 100;
}

/// Mode catalog fallbacks
pub mod modes {
    /// Offered when a monitor advertises no parseable modes
    pub const FALLBACK_WIDTH: u32 = 1920;
    pub const FALLBACK_HEIGHT: u32 = 1080;
    pub const FALLBACK_REFRESH_RATE: u32 = 60;
}

/// Editing behaviour
pub mod editing {
    /// Pixels moved per arrow key press while editing a position
    pub const POSITION_STEP: i32 = 10;
}

/// Layout projection constants
pub mod layout {
    /// Default canvas size in character cells
    pub const DEFAULT_CANVAS_WIDTH: u16 = 50;
    pub const DEFAULT_CANVAS_HEIGHT: u16 = 15;

    /// Bounding box used when no monitor is enabled
    pub const EMPTY_BOUNDS: (i32, i32, i32, i32) = (0, 0, 1000, 1000);

    /// Terminal cells are roughly twice as tall as they are wide
    pub const CELL_ASPECT: f64 = 0.5;

    /// Smallest rectangle drawn for a monitor (fits border + three text lines)
    pub const MIN_BOX_WIDTH: u16 = 13;
    pub const MIN_BOX_HEIGHT: u16 = 5;
}

/// Screen composition anchors (1-based terminal coordinates)
pub mod ui {
    pub const LIST_ORIGIN: (u16, u16) = (1, 1);
    pub const LIST_WIDTH: u16 = 32;

    pub const DETAILS_ORIGIN: (u16, u16) = (33, 1);
    pub const DETAILS_WIDTH: u16 = 50;
    pub const DETAILS_HEIGHT: u16 = 16;

    /// Top-left of the layout canvas interior; the box is drawn two cells around it
    pub const LAYOUT_ORIGIN: (u16, u16) = (33, 20);

    pub const HELP_ROW: u16 = 40;
}

/// Display source constants
pub mod hyprctl {
    pub const BINARY: &str = "hyprctl";
}
