//! Host settings.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` uses `Default::default()` for missing fields, so a
//! settings file only has to mention what it changes.
//!
//! ```toml
//! [word_highlighter]
//! config_path = "/home/me/.config/words.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from the host's settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Word highlighter section
    pub word_highlighter: WordHighlighterSettings,
}

/// The `word_highlighter` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordHighlighterSettings {
    /// Path of the JSON word → color file
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("Using default settings: {}", err);
                Self::default()
            }
        }
    }

    /// Loads settings from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Loads from the default settings path.
    fn load_from_default_path() -> Result<Self, SettingsError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default settings file path.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(config_dir.join("wordlight").join("settings.toml"))
    }

    /// Configured path of the word map, ignoring blank values.
    pub fn config_path(&self) -> Option<&Path> {
        self.word_highlighter
            .config_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Returns true if switching to `other` changes the word map path.
    pub fn affects_config_path(&self, other: &Settings) -> bool {
        self.config_path() != other.config_path()
    }
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
