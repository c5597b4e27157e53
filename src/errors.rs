use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building or presenting the deck
#[derive(Error, Debug)]
pub enum TalkError {
    /// Error related to IO operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error when reading the config file
    #[error("Failed to read config {path}: {message}")]
    ConfigRead { path: PathBuf, message: Arc<String> },

    /// Error when the config file is not valid TOML for `TalkConfig`
    #[error("Invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: Arc<String> },

    /// Error when the config directory cannot be determined
    #[error("Could not determine config path")]
    NoConfigDir,

    /// Error when a syntax theme is not bundled with syntect
    #[error("Unknown theme '{name}' (available: {available})")]
    UnknownTheme { name: Arc<String>, available: Arc<String> },

    /// Error when `--start` names no slide in the deck
    #[error("No slide matches '{selector}' (deck has {len} slides)")]
    UnknownSlide { selector: Arc<String>, len: usize },

    /// Error when a sample record is asked for an attribute it does not have
    #[error("'{record}' object has no attribute '{attribute}'")]
    MissingAttribute {
        record: &'static str,
        attribute: Arc<String>,
    },

    /// Error when serializing a sample record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with `TalkError`
pub type Result<T> = std::result::Result<T, TalkError>;
