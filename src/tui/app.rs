//! Presenter state and main loop

use std::time::Instant;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use super::terminal::{self, Tui};
use super::ui;
use crate::slide::{Hold, Slide, SPINNER_INTERVAL};

/// Slideshow state
pub struct App {
    /// Should the app exit?
    pub should_quit: bool,
    /// The talk
    pub slides: Vec<Slide>,
    /// Index of the slide on screen
    pub current: usize,
    /// Spinner frame index
    pub spinner_frame: usize,

    /// When the current spinner hold began
    hold_started: Option<Instant>,
    /// Last tick time (for animations)
    last_tick: Instant,
}

impl App {
    /// Create a new App showing `start` first
    pub fn new(slides: Vec<Slide>, start: usize) -> Self {
        let current = start.min(slides.len().saturating_sub(1));
        let mut app = Self {
            should_quit: slides.is_empty(),
            slides,
            current,
            spinner_frame: 0,
            hold_started: None,
            last_tick: Instant::now(),
        };
        app.enter();
        app
    }

    /// Run the main event loop
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal::set_title("lightning-talk");

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            // Handle events with timeout for animations
            let timeout = SPINNER_INTERVAL.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.last_tick.elapsed() >= SPINNER_INTERVAL {
                self.on_tick();
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        ui::render(frame, self);
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Is a timed hold still running?
    pub fn is_holding(&self) -> bool {
        self.hold_started.is_some()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'));
        if quit {
            self.should_quit = true;
            return;
        }

        if self.is_holding() {
            return;
        }

        match key.code {
            KeyCode::Enter
            | KeyCode::Char(' ' | 'l' | 'n')
            | KeyCode::Right
            | KeyCode::PageDown => self.next(),
            KeyCode::Left | KeyCode::Backspace | KeyCode::PageUp | KeyCode::Char('h' | 'p') => {
                self.previous();
            }
            KeyCode::Home | KeyCode::Char('g') => self.go_to(0),
            KeyCode::End | KeyCode::Char('G') => self.go_to(self.slides.len().saturating_sub(1)),
            _ => {}
        }
    }

    /// Advance; past the last slide the talk is over
    pub fn next(&mut self) {
        if self.current + 1 >= self.slides.len() {
            tracing::debug!("End of deck");
            self.should_quit = true;
        } else {
            self.go_to(self.current + 1);
        }
    }

    pub fn previous(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() && index != self.current {
            self.current = index;
            self.enter();
        }
    }

    /// Reset per-slide state on arrival
    fn enter(&mut self) {
        self.spinner_frame = 0;
        self.hold_started = match self.current_slide().map(|s| &s.hold) {
            Some(Hold::Spinner { .. }) => Some(Instant::now()),
            _ => None,
        };
        if let Some(slide) = self.current_slide() {
            tracing::debug!("Showing slide {} ({})", self.current, slide.name);
        }
    }

    pub fn on_tick(&mut self) {
        let Some(started) = self.hold_started else {
            return;
        };
        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        let done = match self.current_slide().map(|s| &s.hold) {
            Some(Hold::Spinner { duration, .. }) => started.elapsed() >= *duration,
            _ => true,
        };
        if done {
            self.hold_started = None;
            self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::Region;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn deck(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide::new(format!("s{i}"), Region::empty()))
            .collect()
    }

    #[test]
    fn test_app_new() {
        let app = App::new(deck(3), 0);
        assert!(!app.should_quit);
        assert_eq!(app.current, 0);
        assert!(!app.is_holding());
    }

    #[test]
    fn test_start_is_clamped() {
        let app = App::new(deck(3), 10);
        assert_eq!(app.current, 2);
        assert!(App::new(Vec::new(), 0).should_quit);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = App::new(deck(4), 0);

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.current, 2);

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.current, 1);

        app.handle_key(key(KeyCode::End));
        assert_eq!(app.current, 3);

        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.current, 0);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.current, 0);
    }

    #[test]
    fn test_past_last_slide_quits() {
        let mut app = App::new(deck(2), 1);
        app.handle_key(key(KeyCode::Right));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(deck(2), 0);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new(deck(2), 0);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_spinner_hold_ignores_navigation() {
        let mut slides = deck(3);
        slides[1] = Slide::new("job", Region::empty()).with_spinner("busy", Duration::from_secs(60));
        let mut app = App::new(slides, 1);
        assert!(app.is_holding());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.current, 1);

        app.on_tick();
        assert_eq!(app.spinner_frame, 1);
        assert_eq!(app.current, 1);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_spinner_hold_advances_when_elapsed() {
        let mut slides = deck(3);
        slides[1] = Slide::new("job", Region::empty()).with_spinner("busy", Duration::ZERO);
        let mut app = App::new(slides, 0);

        app.next();
        assert!(app.is_holding());

        app.on_tick();
        assert_eq!(app.current, 2);
        assert!(!app.is_holding());
    }
}
