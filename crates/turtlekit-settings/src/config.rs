//! Configuration and settings management for TurtleKit
//!
//! Configuration is stored as TOML under the platform config directory and
//! is organized into logical sections:
//! - Render defaults (canvas size, glyph asset)
//! - Logging preferences (filter directives)
//!
//! A missing config file is not an error; defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Render defaults applied when a request does not specify dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas width in pixels
    pub default_width: u32,
    /// Canvas height in pixels
    pub default_height: u32,
    /// Path to the turtle glyph PNG; the renderer degrades to a built-in
    /// glyph when absent
    pub glyph_path: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_width: 600,
            default_height: 600,
            glyph_path: None,
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Tracing filter directives, e.g. "info" or "turtlekit=debug"
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Platform config directory for TurtleKit
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("turtlekit"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform("no config directory available".to_string())
            })
    }

    /// Full path of the config file
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> SettingsResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a config file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.render.default_width == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "render.default_width".to_string(),
                value: "0".to_string(),
            });
        }
        if self.render.default_height == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "render.default_height".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.render.default_width, 600);
        assert_eq!(config.render.default_height, 600);
        assert!(config.render.glyph_path.is_none());
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.render.default_width = 800;
        config.render.glyph_path = Some(PathBuf::from("/srv/assets/turtle.png"));
        config.logging.filter = "turtlekit=debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.render.default_width, 800);
        assert_eq!(
            loaded.render.glyph_path.as_deref(),
            Some(Path::new("/srv/assets/turtle.png"))
        );
        assert_eq!(loaded.logging.filter, "turtlekit=debug");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\ndefault_width = 1024\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.render.default_width, 1024);
        assert_eq!(loaded.render.default_height, 600);
        assert_eq!(loaded.logging.filter, "info");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\ndefault_height = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("default_height"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "render = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(SettingsError::TomlError(_))
        ));
    }
}
