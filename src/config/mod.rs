//! Configuration management.
//!
//! Read from `~/.config/ripple/config.toml` at startup. If the file doesn't
//! exist, a commented default is written there. Every field is optional.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::feed::paginator::{CursorAdvance, DEFAULT_PAGE_SIZE};
use crate::fetcher::DEFAULT_API_BASE;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub comments: CommentsConfig,
    pub live: LiveConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
            user_agent: concat!("ripple/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub page_size: usize,
    pub cursor_advance: CursorAdvance,
    /// Item fetches in flight per page; 1 fetches strictly one at a time.
    pub concurrency: usize,
    pub scroll_throttle_ms: u64,
    /// Rows from the bottom of the feed at which scrolling loads more.
    pub scroll_margin: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor_advance: CursorAdvance::FullPage,
            concurrency: 1,
            scroll_throttle_ms: 1000,
            scroll_margin: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub depth: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self { depth: 1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub interval_ms: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

impl Config {
    /// Load from the default path, writing a commented default file first if
    /// there is none.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load a specific file. Missing fields keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Rejects values that would stall the feed or stop the live poller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "feed.page_size",
                reason: "must be at least 1",
            });
        }
        if self.live.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "live.interval_ms",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// `~/.config/ripple/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("ripple").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# Ripple configuration

[api]
base_url = "https://hacker-news.firebaseio.com/v0"
timeout_secs = 10

[feed]
# Stories fetched per page
page_size = 10

# How the cursor moves after a page:
# - "full_page": always by page_size, even past the end of the list
# - "rendered": by the number of stories shown, waiting at the end
cursor_advance = "full_page"

# Story fetches in flight at once (order on screen never changes)
concurrency = 1

# Scrolling near the bottom loads at most one page per window
scroll_throttle_ms = 1000
scroll_margin = 3

[comments]
# 1 shows direct replies only
depth = 1

[live]
interval_ms = 5000

# Colors: named ("Cyan", "DarkGray", ...) or hex ("#FF6600", "#F60")
[colors]
active_border = "#FF6600"
inactive_border = "DarkGray"
selection_bg = "#FF6600"
selection_fg = "Black"
score = "#FF6600"
author = "Yellow"
domain = "Blue"
live = "Green"
status_fg = "White"
status_bg = "DarkGray"
error = "LightRed"

# Keys: characters ("j"), special keys ("Enter", "PageDown", "F5"),
# optionally with modifiers ("Ctrl+c", "Shift+Tab")
[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
page_up = ["PageUp"]
page_down = ["PageDown", "Space"]
next_pane = ["Tab", "BackTab"]
load_comments = ["Enter", "c"]
load_more = ["n"]
open_in_browser = ["o"]
"##
    }
}

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

    #[error("Invalid config value {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.cursor_advance, CursorAdvance::FullPage);
        assert_eq!(config.live.interval_ms, 5000);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.keybindings.load_more, vec!["n"]);
        assert!(config.keybindings.invalid_bindings().is_empty());
        assert_eq!(
            config.colors.active_border,
            ratatui::style::Color::Rgb(255, 102, 0)
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.feed.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.comments.depth, 1);
        assert_eq!(config.feed.scroll_throttle_ms, 1000);
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[feed]\npage_size = 30\ncursor_advance = \"rendered\"\n\n[comments]\ndepth = 3"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.feed.page_size, 30);
        assert_eq!(config.feed.cursor_advance, CursorAdvance::Rendered);
        assert_eq!(config.feed.concurrency, 1);
        assert_eq!(config.comments.depth, 3);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\ncursor_advance = \"sideways\"").unwrap();

        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.feed.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "feed.page_size",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_live_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[live]\ninterval_ms = 0").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "live.interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load_from(&dir.path().join("nope.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
