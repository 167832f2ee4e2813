//! Shared clock logic: time formatting, gesture transform, preferences and
//! their store, and the display surface that ties them together.

pub mod config;
pub mod logging;
pub mod preferences;
pub mod store;
pub mod surface;
pub mod ticker;
pub mod time_format;
pub mod touch;
pub mod transform;

pub use config::{config_dir, config_path, ConfigError};
pub use preferences::{
    is_hex_color, parse_hex_color, ClockPreferences, SaveOutcome, SettingsDraft,
    ValidationNotice,
};
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use surface::{ClockSurface, CLOCK_BOX_HEIGHT, CLOCK_BOX_WIDTH, CLOCK_FONT_SIZE};
pub use ticker::{RefreshTicker, REFRESH_INTERVAL};
pub use time_format::{format_time, to_12_hour, Meridiem};
pub use touch::{TouchPhase, TouchTracker, PAN_MIN_DISTANCE};
pub use transform::{GestureEvent, ScreenBounds, TransformController, TransformState};
