//! Talk configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::errors::{Result, TalkError};
use crate::render::highlight;

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TalkConfig {
    /// syntect theme used for code panes
    pub theme: String,

    /// How long the status spinner runs before the deck moves on
    pub hold_seconds: u64,

    /// Slide to open on, by index or name
    pub start: Option<String>,

    /// Horizontal padding around markdown blocks
    pub padding: u16,
}

impl Default for TalkConfig {
    fn default() -> Self {
        Self {
            theme: highlight::DEFAULT_THEME.to_string(),
            hold_seconds: 3,
            start: None,
            padding: 5,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub theme: Option<String>,
    pub hold_seconds: Option<u64>,
    pub start: Option<String>,
}

impl TalkConfig {
    /// Directory holding `config.toml`
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "lightning-talk", "lightning-talk")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load from an explicit path, which must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| TalkError::ConfigRead {
            path: path.to_path_buf(),
            message: Arc::new(e.to_string()),
        })?;

        toml::from_str(&content).map_err(|e| TalkError::ConfigParse {
            path: path.to_path_buf(),
            message: Arc::new(e.to_string()),
        })
    }

    /// Load `explicit` if given, else the default file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = Self::config_path().ok_or(TalkError::NoConfigDir)?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::info!("Loading config from {}", path.display());
        Self::from_file(&path)
    }

    /// Apply command-line overrides and validate the result
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(secs) = overrides.hold_seconds {
            self.hold_seconds = secs;
        }
        if overrides.start.is_some() {
            self.start = overrides.start;
        }

        highlight::ensure_theme(&self.theme)?;
        Ok(self)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_secs(self.hold_seconds)
    }
}
