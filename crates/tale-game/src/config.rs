use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tale.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub font: FontConfig,
    pub story: StoryConfig,
    pub colors: ColorConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: PathBuf,
    /// Nominal size in pixels (points at 72 DPI).
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub path: PathBuf,
    pub start: String,
    /// Refuse to start when a choice leads to an undefined state. Otherwise
    /// such choices are only logged.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Prompt text, 8-bit RGB scaled by 1/256.
    pub text: [u8; 3],
    /// Choice lines, same encoding as `text`.
    pub choice: [u8; 3],
    /// Clear color, RGB in `[0, 1]`.
    pub background: [f32; 3],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter; overrides `RUST_LOG` when set.
    pub filter: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tale".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist/VT323-Regular.ttf"),
            size: 36.0,
        }
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist/story.json"),
            start: "start".to_owned(),
            strict: false,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            text: [179, 207, 120],
            choice: [179, 207, 120],
            background: [0.27, 0.31, 0.15],
        }
    }
}

impl GameConfig {
    /// The config file to use: `explicit` if given, else
    /// [`DEFAULT_CONFIG_FILE`] when it exists, else none (built-in defaults).
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        })
    }

    /// Loads the config file at `path`. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
