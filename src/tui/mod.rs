//! Slideshow TUI
//!
//! Full-screen presenter using ratatui.
//!
//! ## Architecture
//!
//! - `app.rs` - Presenter state and key handling
//! - `terminal.rs` - Terminal setup/teardown and hooks
//! - `ui.rs` - Drawing the current slide

pub mod app;
pub mod terminal;
pub mod ui;

// Re-exports
pub use app::App;
pub use terminal::{init, install_hooks, restore};

use color_eyre::Result;

use crate::slide::Slide;

/// Present `slides` starting at `start`
///
/// Initializes the terminal, runs the app loop, and restores on exit.
pub fn run(slides: Vec<Slide>, start: usize) -> Result<()> {
    let mut terminal = terminal::init()?;

    let mut app = App::new(slides, start);
    let result = app.run(&mut terminal);

    // Always restore terminal, even on error
    terminal::restore()?;

    result
}
