//! User preferences: five independent scalar keys in the same key-value
//! surface as the task collection. Reads fall back to defaults, writes log
//! and swallow their failures.

use crate::storage::kv::KvStore;

pub const AVATAR_KEY: &str = "user_avatar";
pub const NAME_KEY: &str = "user_name";
pub const THEME_KEY: &str = "user_theme";
pub const ACCENT_KEY: &str = "user_accent";
pub const NOTIFICATIONS_KEY: &str = "notifications_enabled";

pub const DEFAULT_ACCENT: &str = "#ff9696";

/// The accent swatches offered by the customization screen.
pub const ACCENT_OPTIONS: [&str; 5] = ["#ff9696", "#4CAF50", "#2196F3", "#FFC107", "#9C27B0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only the stored literal `dark` selects the dark theme.
    pub fn from_raw(raw: &str) -> Self {
        if raw == "dark" { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub avatar_uri: Option<String>,
    pub display_name: Option<String>,
    pub theme: Theme,
    pub accent: String,
    pub notifications_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            avatar_uri: None,
            display_name: None,
            theme: Theme::Light,
            accent: DEFAULT_ACCENT.to_string(),
            notifications_enabled: false,
        }
    }
}

pub fn load(store: &dyn KvStore) -> Preferences {
    Preferences {
        avatar_uri: read_scalar(store, AVATAR_KEY),
        display_name: read_scalar(store, NAME_KEY),
        theme: read_scalar(store, THEME_KEY)
            .map(|raw| Theme::from_raw(&raw))
            .unwrap_or_default(),
        accent: read_scalar(store, ACCENT_KEY).unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
        notifications_enabled: read_scalar(store, NOTIFICATIONS_KEY).as_deref() == Some("true"),
    }
}

pub fn set_avatar(store: &dyn KvStore, uri: &str) -> bool {
    write_scalar(store, AVATAR_KEY, uri)
}

pub fn set_display_name(store: &dyn KvStore, name: &str) -> bool {
    write_scalar(store, NAME_KEY, name)
}

pub fn set_theme(store: &dyn KvStore, theme: Theme) -> bool {
    write_scalar(store, THEME_KEY, theme.as_str())
}

pub fn set_accent(store: &dyn KvStore, color: &str) -> bool {
    write_scalar(store, ACCENT_KEY, color)
}

pub fn set_notifications_flag(store: &dyn KvStore, enabled: bool) -> bool {
    write_scalar(store, NOTIFICATIONS_KEY, if enabled { "true" } else { "false" })
}

fn read_scalar(store: &dyn KvStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|value| !value.is_empty()),
        Err(err) => {
            log::warn!("preference {key} unreadable, using default: {err}");
            None
        }
    }
}

fn write_scalar(store: &dyn KvStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("preference {key} not saved: {err}");
            false
        }
    }
}

pub fn parse_hex_color(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Terminal colors derived from the theme and accent preferences. An accent
/// that does not parse as a hex color disables coloring entirely.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: String,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_prefs(theme: Theme, accent: &str) -> Self {
        match parse_hex_color(accent) {
            Some((r, g, b)) => Self {
                accent: format!("\x1b[38;2;{r};{g};{b}m"),
                muted: match theme {
                    Theme::Dark => "\x1b[38;5;250m",
                    Theme::Light => "\x1b[38;5;244m",
                },
                reset: "\x1b[0m",
            },
            None => Self {
                accent: String::new(),
                muted: "",
                reset: "",
            },
        }
    }

    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}
