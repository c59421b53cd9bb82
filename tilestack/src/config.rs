//! Configuration file handling
//!
//! Settings live in an INI file at `<user config dir>/tilestack/config.ini`
//! with one section per concern:
//!
//! ```ini
//! [image]
//! url = https://cdn1-www.dogtime.com/assets/uploads/2011/03/puppy-development.jpg
//!
//! [tiles]
//! width = 100
//! height = 100
//! count = 1000
//!
//! [viewport]
//! width = 375
//! height = 667
//!
//! [download]
//! timeout = 30
//! ```
//!
//! Every key has a built-in default, so a missing file or an unparsable
//! value falls back per key rather than failing the whole load.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::layout::TileSize;
use crate::viewport::Viewport;

/// Image fetched when no URL is configured.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn1-www.dogtime.com/assets/uploads/2011/03/puppy-development.jpg";

/// Default number of tiles in the column.
pub const DEFAULT_TILE_COUNT: u32 = 1000;

/// Errors from loading, saving, or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or parsed.
    #[error("failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    /// The configuration file could not be written.
    #[error("failed to save {path}: {reason}")]
    Save { path: PathBuf, reason: String },
    /// A value failed validation for its key.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    /// The key is not one of the known `section.key` names.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[image]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    /// URL of the image to fetch and tile.
    pub url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

/// `[tiles]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesConfig {
    /// Tile slot width in pixels.
    pub width: u32,
    /// Tile slot height in pixels.
    pub height: u32,
    /// Number of tiles in the column.
    pub count: u32,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            width: TileSize::DEFAULT.width(),
            height: TileSize::DEFAULT.height(),
            count: DEFAULT_TILE_COUNT,
        }
    }
}

/// `[viewport]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: Viewport::DEFAULT_WIDTH,
            height: Viewport::DEFAULT_HEIGHT,
        }
    }
}

/// `[download]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Transport timeout in seconds.
    pub timeout: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// The full configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub image: ImageConfig,
    pub tiles: TilesConfig,
    pub viewport: ViewportConfig,
    pub download: DownloadConfig,
}

/// Returns the configuration file path.
///
/// Falls back to the current directory when the platform reports no user
/// configuration directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilestack")
        .join("config.ini")
}

impl ConfigFile {
    /// Loads the configuration from the default path.
    ///
    /// Callers typically chain `.unwrap_or_default()` so a missing file
    /// means defaults rather than a hard error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_ini(&ini))
    }

    /// Saves the configuration to the default path, creating the directory
    /// if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Save {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::Save {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    fn from_ini(ini: &Ini) -> Self {
        let defaults = Self::default();
        Self {
            image: ImageConfig {
                url: ini
                    .get_from(Some("image"), "url")
                    .map(str::to_string)
                    .unwrap_or(defaults.image.url),
            },
            tiles: TilesConfig {
                width: parse_or(ini, "tiles", "width", defaults.tiles.width),
                height: parse_or(ini, "tiles", "height", defaults.tiles.height),
                count: parse_or(ini, "tiles", "count", defaults.tiles.count),
            },
            viewport: ViewportConfig {
                width: parse_or(ini, "viewport", "width", defaults.viewport.width),
                height: parse_or(ini, "viewport", "height", defaults.viewport.height),
            },
            download: DownloadConfig {
                timeout: parse_or(ini, "download", "timeout", defaults.download.timeout),
            },
        }
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("image"))
            .set("url", self.image.url.clone());
        ini.with_section(Some("tiles"))
            .set("width", self.tiles.width.to_string())
            .set("height", self.tiles.height.to_string())
            .set("count", self.tiles.count.to_string());
        ini.with_section(Some("viewport"))
            .set("width", self.viewport.width.to_string())
            .set("height", self.viewport.height.to_string());
        ini.with_section(Some("download"))
            .set("timeout", self.download.timeout.to_string());
        ini
    }
}

/// One unparsable value falls back to its default without poisoning the
/// rest of the file.
fn parse_or<T: FromStr>(ini: &Ini, section: &str, key: &str, default: T) -> T {
    ini.get_from(Some(section), key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Typed handle on one `section.key` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ImageUrl,
    TilesWidth,
    TilesHeight,
    TilesCount,
    ViewportWidth,
    ViewportHeight,
    DownloadTimeout,
}

impl ConfigKey {
    /// Every key, grouped by section in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ImageUrl,
            ConfigKey::TilesWidth,
            ConfigKey::TilesHeight,
            ConfigKey::TilesCount,
            ConfigKey::ViewportWidth,
            ConfigKey::ViewportHeight,
            ConfigKey::DownloadTimeout,
        ]
    }

    /// Returns the INI section this key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ImageUrl => "image",
            ConfigKey::TilesWidth | ConfigKey::TilesHeight | ConfigKey::TilesCount => "tiles",
            ConfigKey::ViewportWidth | ConfigKey::ViewportHeight => "viewport",
            ConfigKey::DownloadTimeout => "download",
        }
    }

    /// Returns the key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ImageUrl => "url",
            ConfigKey::TilesWidth | ConfigKey::ViewportWidth => "width",
            ConfigKey::TilesHeight | ConfigKey::ViewportHeight => "height",
            ConfigKey::TilesCount => "count",
            ConfigKey::DownloadTimeout => "timeout",
        }
    }

    /// Returns the full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Reads this key's current value as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ImageUrl => config.image.url.clone(),
            ConfigKey::TilesWidth => config.tiles.width.to_string(),
            ConfigKey::TilesHeight => config.tiles.height.to_string(),
            ConfigKey::TilesCount => config.tiles.count.to_string(),
            ConfigKey::ViewportWidth => config.viewport.width.to_string(),
            ConfigKey::ViewportHeight => config.viewport.height.to_string(),
            ConfigKey::DownloadTimeout => config.download.timeout.to_string(),
        }
    }

    /// Validates and stores a new value for this key.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::ImageUrl => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(self.invalid(value, "must be an http(s) URL"));
                }
                config.image.url = value.to_string();
            }
            ConfigKey::TilesWidth => config.tiles.width = self.parse_nonzero_u32(value)?,
            ConfigKey::TilesHeight => config.tiles.height = self.parse_nonzero_u32(value)?,
            ConfigKey::TilesCount => {
                config.tiles.count = value
                    .parse()
                    .map_err(|_| self.invalid(value, "must be a whole number"))?;
            }
            ConfigKey::ViewportWidth => config.viewport.width = self.parse_nonzero_u32(value)?,
            ConfigKey::ViewportHeight => config.viewport.height = self.parse_nonzero_u32(value)?,
            ConfigKey::DownloadTimeout => {
                let timeout: u64 = value
                    .parse()
                    .map_err(|_| self.invalid(value, "must be a whole number of seconds"))?;
                if timeout == 0 {
                    return Err(self.invalid(value, "must be greater than zero"));
                }
                config.download.timeout = timeout;
            }
        }
        Ok(())
    }

    fn parse_nonzero_u32(&self, value: &str) -> Result<u32, ConfigError> {
        let parsed: u32 = value
            .parse()
            .map_err(|_| self.invalid(value, "must be a whole number"))?;
        if parsed == 0 {
            return Err(self.invalid(value, "must be greater than zero"));
        }
        Ok(parsed)
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .find(|key| key.name() == s)
            .copied()
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
