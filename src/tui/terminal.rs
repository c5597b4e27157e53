//! Terminal setup and teardown
//!
//! Handles crossterm raw mode and the alternate screen, plus the color-eyre
//! hooks. The panic hook restores the terminal before anything is printed.

use std::io::{self, stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use color_eyre::config::HookBuilder;
use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Set while raw mode and the alternate screen are on
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install the color-eyre report handler and a terminal-restoring panic hook.
/// Without this, a panic in raw mode leaves the terminal unusable.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal FIRST, before printing anything
        if ACTIVE.load(Ordering::SeqCst) {
            let _ = restore();
        }
        panic_hook(panic_info);
    }));

    Ok(())
}

/// Initialize the terminal for the slideshow
///
/// - Enables raw mode (keys arrive one at a time)
/// - Enters alternate screen (preserves scrollback)
/// - Hides the cursor
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    ACTIVE.store(true, Ordering::SeqCst);

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    ACTIVE.store(false, Ordering::SeqCst);
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

/// Set the terminal title
pub fn set_title(title: &str) {
    let mut stdout = stdout();
    // OSC 0 ; title ST - works in most terminals
    let _ = write!(stdout, "\x1b]0;{title}\x1b\\");
    let _ = stdout.flush();
}

/// Current terminal size, if stdout is a terminal
pub fn size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}
