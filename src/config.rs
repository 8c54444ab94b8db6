// src/config.rs

//! Defines the configuration structures for the `bitmap-text` binary.
//!
//! Configuration is read from the JSON file named by the
//! `BITMAP_TEXT_CONFIG` environment variable. Every field has a default, so
//! a partial file (or no file at all) is fine.

use crate::options::TextOptions;
use anyhow::Context;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the config file path.
pub const CONFIG_ENV_VAR: &str = "BITMAP_TEXT_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

/// Root of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output canvas settings.
    pub canvas: CanvasConfig,
    /// Default text options used when no options file is given.
    pub text: TextOptions,
    /// Font lookup settings.
    pub fonts: FontsConfig,
}

/// Size of the output canvas and where text is placed on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    pub origin_x: i64,
    pub origin_y: i64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 320,
            height: 64,
            origin_x: 8,
            origin_y: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FontsConfig {
    /// Directory relative font paths are resolved against.
    /// `None` resolves them against the working directory.
    pub root: Option<PathBuf>,
}

impl Config {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load from `BITMAP_TEXT_CONFIG`, falling back to defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            info!("{} not set, using default configuration", CONFIG_ENV_VAR);
            return Config::default();
        };
        match Config::from_file(&path) {
            Ok(config) => {
                info!("Configuration loaded from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load configuration from {}: {:#}. Using defaults.",
                    Path::new(&path).display(),
                    e
                );
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpec;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(r#"{ "canvas": { "width": 640 } }"#).unwrap();
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, CanvasConfig::default().height);
        assert_eq!(config.text, TextOptions::default());
        assert!(config.fonts.root.is_none());
    }

    #[test]
    fn test_text_defaults_from_config() {
        let config = Config::from_json(
            r#"{ "text": { "scale_x": 2, "scale_y": 2, "color": "gold" },
                 "fonts": { "root": "/usr/share/bitmap-fonts" } }"#,
        )
        .unwrap();
        assert_eq!(config.text.scale_x, 2);
        assert_eq!(config.text.color, Some(ColorSpec::from("gold")));
        assert_eq!(
            config.fonts.root,
            Some(PathBuf::from("/usr/share/bitmap-fonts"))
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::from_file("/nonexistent/bitmap-text.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/bitmap-text.json"));
    }
}
