//! Slides and their containers

mod region;

pub use region::{Body, Content, Panel, Region};

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;

/// Frames of the "aesthetic" status spinner
pub const SPINNER_FRAMES: &[&str] = &[
    "▰▱▱▱▱▱▱",
    "▰▰▱▱▱▱▱",
    "▰▰▰▱▱▱▱",
    "▰▰▰▰▱▱▱",
    "▰▰▰▰▰▱▱",
    "▰▰▰▰▰▰▱",
    "▰▰▰▰▰▰▰",
    "▰▱▱▱▱▱▱",
];

/// Time between spinner frames
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// How a slide waits before the next one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Hold {
    /// Until the presenter presses a key
    #[default]
    Key,
    /// Animate a status spinner, then advance on its own
    Spinner { message: String, duration: Duration },
}

/// One screen of the talk
#[derive(Debug, Clone)]
pub struct Slide {
    pub name: String,
    pub root: Region,
    pub hold: Hold,
}

impl Slide {
    pub fn new(name: impl Into<String>, root: Region) -> Self {
        Self {
            name: name.into(),
            root,
            hold: Hold::Key,
        }
    }

    #[must_use]
    pub fn with_spinner(mut self, message: impl Into<String>, duration: Duration) -> Self {
        self.hold = Hold::Spinner {
            message: message.into(),
            duration,
        };
        self
    }

    /// Spinner line for the given frame, if this slide holds on a spinner
    pub fn spinner_line(&self, frame: usize) -> Option<String> {
        match &self.hold {
            Hold::Key => None,
            Hold::Spinner { message, .. } => Some(format!(
                "{} {}",
                SPINNER_FRAMES[frame % SPINNER_FRAMES.len()],
                message
            )),
        }
    }

    /// Draw the slide, with the spinner at `frame` on the second row
    pub fn render(&self, area: Rect, buf: &mut Buffer, frame: usize) {
        Widget::render(&self.root, area, buf);

        if let Some(spinner) = self.spinner_line(frame) {
            if area.height > 1 {
                let row = Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                };
                Line::styled(spinner, Style::new().fg(Color::Cyan)).render(row, buf);
            }
        }
    }
}
