//! Process configuration.
//!
//! [`Config`] is a plain serde struct so it can be read from JSON or built
//! from environment variables. One configuration is installed per process;
//! font and license file names declared with relative paths are resolved
//! against [`Config::resource_dir`].
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "resourceDir": "/usr/share/myapp/iconfonts",
//!   "cacheCapacity": 256,
//!   "devicePixelRatio": 2.0,
//!   "defaultPixelSize": 16.0,
//!   "dpi": 96.0
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable overriding [`Config::resource_dir`].
pub const ENV_RESOURCE_DIR: &str = "FONTICONS_RESOURCE_DIR";
/// Environment variable overriding [`Config::cache_capacity`].
pub const ENV_CACHE_CAPACITY: &str = "FONTICONS_CACHE_CAPACITY";
/// Environment variable overriding [`Config::device_pixel_ratio`].
pub const ENV_DEVICE_PIXEL_RATIO: &str = "FONTICONS_DEVICE_PIXEL_RATIO";

static CURRENT: OnceLock<Config> = OnceLock::new();

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory that relative font and license file names are resolved against.
    ///
    /// `None` resolves them against the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,

    /// Maximum number of pixmaps kept by the default pixmap cache.
    pub cache_capacity: usize,

    /// Scale between logical and device pixels for offscreen surfaces.
    pub device_pixel_ratio: f32,

    /// Pixel size used when [`DrawOptions`](crate::DrawOptions) requests no size.
    pub default_pixel_size: f32,

    /// Resolution used to convert point sizes into pixels.
    pub dpi: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_dir: None,
            cache_capacity: 256,
            device_pixel_ratio: 1.0,
            default_pixel_size: 16.0,
            dpi: 96.0,
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource directory.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Sets the pixmap cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Builds a configuration from the defaults plus environment overrides.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(ENV_RESOURCE_DIR) {
            if !dir.is_empty() {
                config.resource_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(capacity) = parse_env(ENV_CACHE_CAPACITY) {
            config.cache_capacity = capacity;
        }

        if let Some(ratio) = parse_env(ENV_DEVICE_PIXEL_RATIO) {
            config.device_pixel_ratio = ratio;
        }

        config
    }

    /// Installs `config` as the process-wide configuration.
    ///
    /// Returns `false` if a configuration was already installed or already
    /// read through [`Config::current`]; the first one stays in effect.
    pub fn install(config: Config) -> bool {
        let installed = CURRENT.set(config).is_ok();
        if !installed {
            log::warn!(target: "fonticons", "Configuration already installed, ignoring new one");
        }
        installed
    }

    /// Returns the process-wide configuration, initialising it from the
    /// environment on first use.
    pub fn current() -> &'static Config {
        CURRENT.get_or_init(Config::from_env)
    }

    /// Resolves a declared resource file name against the resource directory.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        match &self.resource_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Converts a point size into pixels at the configured resolution.
    pub fn points_to_pixels(&self, points: f64) -> f32 {
        (points * self.dpi as f64 / 72.0) as f32
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!(target: "fonticons", "Ignoring invalid value for {name}: \"{value}\"");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let config = Config::new()
            .with_resource_dir("/opt/icons")
            .with_cache_capacity(32)
            .with_device_pixel_ratio(2.0);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"resourceDir\""));
        assert!(json.contains("\"devicePixelRatio\""));

        let restored = Config::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{\"cacheCapacity\": \"lots\"}").is_err());
    }

    #[test]
    fn resolves_relative_names_only() {
        let config = Config::new().with_resource_dir("/opt/icons");
        assert_eq!(
            config.resolve("fonts/icons.ttf"),
            PathBuf::from("/opt/icons/fonts/icons.ttf")
        );
        assert_eq!(
            config.resolve("/abs/icons.ttf"),
            PathBuf::from("/abs/icons.ttf")
        );

        let config = Config::new();
        assert_eq!(config.resolve("icons.ttf"), PathBuf::from("icons.ttf"));
    }

    #[test]
    fn point_conversion() {
        let config = Config::default();
        assert_eq!(config.points_to_pixels(12.0), 16.0);
        assert_eq!(config.points_to_pixels(9.0), 12.0);
    }
}
