//! Clock preferences: defaults, loading, validation and saving

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::store::SettingsStore;

pub const KEY_CLOCK_COLOR: &str = "clockColor";
pub const KEY_BACKGROUND_COLOR: &str = "backgroundColor";
pub const KEY_SHOW_SECONDS: &str = "showSeconds";
pub const KEY_USE_12H_FORMAT: &str = "use12HFormat";

pub const DEFAULT_CLOCK_COLOR: &str = "#fff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000";

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").expect("valid hex color regex"));

/// `#` followed by exactly 3 or 6 hex digits, any case
pub fn is_hex_color(candidate: &str) -> bool {
    HEX_COLOR_RE.is_match(candidate)
}

/// Parse a hex color into RGB bytes, expanding `#abc` to `#aabbcc`
pub fn parse_hex_color(candidate: &str) -> Option<[u8; 3]> {
    if !is_hex_color(candidate) {
        return None;
    }
    let digits = &candidate[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    if digits.len() == 3 {
        let mut rgb = [0u8; 3];
        for (i, c) in digits.chars().enumerate() {
            let nibble = channel(&c.to_string())?;
            rgb[i] = nibble * 17;
        }
        Some(rgb)
    } else {
        Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ])
    }
}

/// A color field that failed validation on save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationNotice {
    ClockColor,
    BackgroundColor,
}

impl ValidationNotice {
    pub fn title(&self) -> &'static str {
        "Invalid Settings"
    }

    pub fn message(&self) -> String {
        match self {
            ValidationNotice::ClockColor => format!(
                "Clock Color must be a hexadecimal color.\nIt has been reset to {}",
                DEFAULT_CLOCK_COLOR
            ),
            ValidationNotice::BackgroundColor => format!(
                "Background Color must be a hexadecimal color.\nIt has been reset to {}",
                DEFAULT_BACKGROUND_COLOR
            ),
        }
    }
}

/// Display preferences persisted between sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockPreferences {
    pub clock_color: String,
    pub background_color: String,
    pub show_seconds: bool,
    pub use_12h_format: bool,
}

impl Default for ClockPreferences {
    fn default() -> Self {
        Self {
            clock_color: DEFAULT_CLOCK_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            show_seconds: false,
            use_12h_format: false,
        }
    }
}

/// Result of a save: the preferences now in effect plus any notices to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub preferences: ClockPreferences,
    pub notices: Vec<ValidationNotice>,
}

impl ClockPreferences {
    /// Read preferences, falling back per field when absent or invalid
    pub fn load(store: &dyn SettingsStore) -> Self {
        let color = |key: &str, default: &str| match store.get(key) {
            Some(value) if is_hex_color(&value) => value,
            Some(value) => {
                warn!("Stored {} {:?} is not a hex color, using {}", key, value, default);
                default.to_string()
            }
            None => default.to_string(),
        };
        let flag = |key: &str| store.get(key).as_deref() == Some("true");

        Self {
            clock_color: color(KEY_CLOCK_COLOR, DEFAULT_CLOCK_COLOR),
            background_color: color(KEY_BACKGROUND_COLOR, DEFAULT_BACKGROUND_COLOR),
            show_seconds: flag(KEY_SHOW_SECONDS),
            use_12h_format: flag(KEY_USE_12H_FORMAT),
        }
    }

    /// Validate a draft, persist all four keys and return what took effect
    ///
    /// Each write is independent: a failed key is logged and the rest are
    /// still written.
    pub fn save(store: &mut dyn SettingsStore, draft: &SettingsDraft) -> SaveOutcome {
        let mut notices = Vec::new();

        let clock_color = if is_hex_color(&draft.clock_color) {
            draft.clock_color.clone()
        } else {
            notices.push(ValidationNotice::ClockColor);
            DEFAULT_CLOCK_COLOR.to_string()
        };
        let background_color = if is_hex_color(&draft.background_color) {
            draft.background_color.clone()
        } else {
            notices.push(ValidationNotice::BackgroundColor);
            DEFAULT_BACKGROUND_COLOR.to_string()
        };

        let preferences = Self {
            clock_color,
            background_color,
            show_seconds: draft.show_seconds,
            use_12h_format: draft.use_12h_format,
        };

        let writes = [
            (KEY_CLOCK_COLOR, preferences.clock_color.clone()),
            (KEY_BACKGROUND_COLOR, preferences.background_color.clone()),
            (KEY_SHOW_SECONDS, preferences.show_seconds.to_string()),
            (KEY_USE_12H_FORMAT, preferences.use_12h_format.to_string()),
        ];
        for (key, value) in writes {
            if let Err(e) = store.set(key, &value) {
                warn!("Failed to persist {}: {}", key, e);
            }
        }
        info!("Saved preferences: {:?}", preferences);

        SaveOutcome { preferences, notices }
    }
}

/// Editable copy of the preferences backing the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub clock_color: String,
    pub background_color: String,
    pub show_seconds: bool,
    pub use_12h_format: bool,
}

impl From<&ClockPreferences> for SettingsDraft {
    fn from(prefs: &ClockPreferences) -> Self {
        Self {
            clock_color: prefs.clock_color.clone(),
            background_color: prefs.background_color.clone(),
            show_seconds: prefs.show_seconds,
            use_12h_format: prefs.use_12h_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::store::MemoryStore;

    fn draft(clock: &str, background: &str) -> SettingsDraft {
        SettingsDraft {
            clock_color: clock.to_string(),
            background_color: background.to_string(),
            show_seconds: true,
            use_12h_format: false,
        }
    }

    #[test]
    fn test_hex_validation() {
        for ok in ["#ABC", "#aabbcc", "#000", "#FfFfFf", "#09a"] {
            assert!(is_hex_color(ok), "{ok}");
        }
        for bad in ["blue", "#12", "#1234", "#abcdefa", "abc", "#ggg", " #fff", "#fff\n", ""] {
            assert!(!is_hex_color(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#1A2"), Some([0x11, 0xaa, 0x22]));
        assert_eq!(parse_hex_color("#0080ff"), Some([0, 128, 255]));
        assert_eq!(parse_hex_color("red"), None);
    }

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(ClockPreferences::load(&store), ClockPreferences::default());
    }

    #[test]
    fn test_load_fields_default_independently() {
        let mut store = MemoryStore::new();
        store.set(KEY_CLOCK_COLOR, "not-a-color").unwrap();
        store.set(KEY_BACKGROUND_COLOR, "#123456").unwrap();
        store.set(KEY_SHOW_SECONDS, "true").unwrap();
        store.set(KEY_USE_12H_FORMAT, "yes").unwrap();

        let prefs = ClockPreferences::load(&store);
        assert_eq!(prefs.clock_color, DEFAULT_CLOCK_COLOR);
        assert_eq!(prefs.background_color, "#123456");
        assert!(prefs.show_seconds);
        assert!(!prefs.use_12h_format);
    }

    #[test]
    fn test_save_valid_colors_verbatim() {
        let mut store = MemoryStore::new();
        let outcome = ClockPreferences::save(&mut store, &draft("#ABC", "#aabbcc"));

        assert!(outcome.notices.is_empty());
        assert_eq!(outcome.preferences.clock_color, "#ABC");
        assert_eq!(store.get(KEY_CLOCK_COLOR).as_deref(), Some("#ABC"));
        assert_eq!(store.get(KEY_BACKGROUND_COLOR).as_deref(), Some("#aabbcc"));
        assert_eq!(store.get(KEY_SHOW_SECONDS).as_deref(), Some("true"));
        assert_eq!(store.get(KEY_USE_12H_FORMAT).as_deref(), Some("false"));
    }

    #[test]
    fn test_save_invalid_colors_reset_and_notify() {
        let mut store = MemoryStore::new();
        let outcome = ClockPreferences::save(&mut store, &draft("blue", "#12"));

        assert_eq!(
            outcome.notices,
            vec![ValidationNotice::ClockColor, ValidationNotice::BackgroundColor]
        );
        assert_eq!(outcome.preferences.clock_color, DEFAULT_CLOCK_COLOR);
        assert_eq!(outcome.preferences.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(store.get(KEY_CLOCK_COLOR).as_deref(), Some("#fff"));
        assert_eq!(store.get(KEY_BACKGROUND_COLOR).as_deref(), Some("#000"));
    }

    #[test]
    fn test_saved_preferences_load_back() {
        let mut store = MemoryStore::new();
        let outcome = ClockPreferences::save(&mut store, &draft("#0f0", "#222"));
        assert_eq!(ClockPreferences::load(&store), outcome.preferences);
    }

    struct FlakyStore {
        inner: MemoryStore,
        broken_key: &'static str,
    }

    impl SettingsStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
            if key == self.broken_key {
                return Err(ConfigError::NoConfigDir);
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_failed_write_does_not_block_others() {
        let mut store = FlakyStore {
            inner: MemoryStore::new(),
            broken_key: KEY_BACKGROUND_COLOR,
        };
        let outcome = ClockPreferences::save(&mut store, &draft("#abc", "#def"));

        assert_eq!(outcome.preferences.background_color, "#def");
        assert!(store.get(KEY_BACKGROUND_COLOR).is_none());
        assert_eq!(store.get(KEY_CLOCK_COLOR).as_deref(), Some("#abc"));
        assert_eq!(store.get(KEY_USE_12H_FORMAT).as_deref(), Some("false"));
    }

    #[test]
    fn test_notice_messages() {
        assert!(ValidationNotice::ClockColor.message().ends_with("reset to #fff"));
        assert!(ValidationNotice::BackgroundColor.message().ends_with("reset to #000"));
    }
}
