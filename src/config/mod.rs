//! Configuration management for Brooklet.
//!
//! Configuration is read from `~/.config/brooklet/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod interval;
pub mod keybindings;

pub use colors::ColorConfig;
pub use interval::{format_interval, parse_interval};
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::DEFAULT_WORKERS;
use crate::locale::Locale;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poll: PollConfig,
    pub fetch: FetchConfig,
    pub ui: UiConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Background refresh of subscribed feeds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Idle time between the end of one poll and the start of the next
    #[serde(deserialize_with = "interval::deserialize_interval")]
    pub interval: Duration,
    /// Maximum number of feeds fetched at the same time
    pub workers: usize,
    /// Poll once immediately instead of waiting a full interval first
    pub poll_on_start: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            workers: DEFAULT_WORKERS,
            poll_on_start: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// AllOrigins-style proxy endpoint; feeds are fetched directly when unset
    pub proxy: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("brooklet/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it when missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/brooklet/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("brooklet").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Brooklet Configuration
#
# Intervals accept "500ms", "5s", "2m", "1h", "1d" or a number of seconds.
#
# Colors accept names ("Cyan", "dark gray", "LightRed"), hex "#RRGGBB"
# or a 256-color palette index ("208").
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
# Keys that fail to parse are logged and ignored.

[poll]
# Idle time between two refreshes of all feeds
interval = "5s"

# Maximum number of feeds fetched concurrently
workers = 10

# Refresh immediately on start instead of waiting one interval
poll_on_start = false

[fetch]
# Request timeout in seconds
timeout_secs = 10

# Fetch through an AllOrigins-style proxy (expects {"contents": "..."})
# proxy = "https://allorigins.hexlet.app/get"

[ui]
# Interface language: "en" or "ru"
locale = "en"

[colors]
# Border colors
active_border = "Cyan"
inactive_border = "DarkGray"

# Selection highlight
selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"

# Post colors
viewed_post = "DarkGray"
unviewed_post = "White"

# Form feedback
feedback_success = "Green"
feedback_error = "Red"

# Post details
metadata_date = "Yellow"
metadata_link = "Blue"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]
focus_input = ["a", "/"]
select = ["Enter"]
close = ["Esc"]
open_in_browser = ["o"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
