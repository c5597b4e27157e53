//! # Lightning Talk
//!
//! A scripted terminal slideshow that puts the default way of printing Rust
//! data, logs and errors next to a styled rendering of the same thing.
//! Slides are `Region` trees drawn with ratatui, stepped through with the
//! keyboard, or dumped to stdout without a terminal.

pub mod capture;
pub mod config;
pub mod deck;
pub mod errors;
pub mod export;
pub mod render;
pub mod sample;
pub mod slide;
pub mod tui;

pub use config::TalkConfig;
pub use errors::{Result, TalkError};
pub use slide::Slide;
