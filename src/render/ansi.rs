//! ANSI escape stream to styled text
//!
//! Reports from color-eyre arrive as strings with SGR sequences. This feeds
//! them through a vte parser and rebuilds the colors as ratatui spans so
//! they can be laid out inside a pane.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use vte::{Parser, Perform};

/// Convert text containing ANSI escapes into styled text
pub fn to_text(input: &str) -> Text<'static> {
    let mut performer = SpanPerformer::default();
    let mut parser = Parser::new();
    parser.advance(&mut performer, input.as_bytes());
    performer.finish()
}

/// Strip ANSI escapes, keeping only printable text
pub fn strip(input: &str) -> String {
    super::plain_text(&to_text(input))
}

/// Collects printed characters into spans, one line per `\n`
#[derive(Debug, Default)]
struct SpanPerformer {
    style: Style,
    buffer: String,
    spans: Vec<Span<'static>>,
    lines: Vec<Line<'static>>,
}

impl SpanPerformer {
    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.spans.push(Span::styled(text, self.style));
        }
    }

    fn set_style(&mut self, style: Style) {
        if style != self.style {
            self.flush();
            self.style = style;
        }
    }

    fn newline(&mut self) {
        self.flush();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn finish(mut self) -> Text<'static> {
        if !self.buffer.is_empty() || !self.spans.is_empty() {
            self.newline();
        }
        Text::from(self.lines)
    }

    /// Apply one SGR sequence (`ESC [ ... m`)
    fn select_graphic_rendition(&mut self, values: &[u16]) {
        let mut style = self.style;
        let mut iter = values.iter().copied();

        if values.is_empty() {
            style = Style::default();
        }

        while let Some(code) = iter.next() {
            style = match code {
                0 => Style::default(),
                1 => style.add_modifier(Modifier::BOLD),
                2 => style.add_modifier(Modifier::DIM),
                3 => style.add_modifier(Modifier::ITALIC),
                4 => style.add_modifier(Modifier::UNDERLINED),
                5 => style.add_modifier(Modifier::SLOW_BLINK),
                7 => style.add_modifier(Modifier::REVERSED),
                9 => style.add_modifier(Modifier::CROSSED_OUT),
                22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
                23 => style.remove_modifier(Modifier::ITALIC),
                24 => style.remove_modifier(Modifier::UNDERLINED),
                25 => style.remove_modifier(Modifier::SLOW_BLINK),
                27 => style.remove_modifier(Modifier::REVERSED),
                29 => style.remove_modifier(Modifier::CROSSED_OUT),
                30..=37 => style.fg(base_color(code - 30)),
                38 => match extended_color(&mut iter) {
                    Some(color) => style.fg(color),
                    None => style,
                },
                39 => style.fg(Color::Reset),
                40..=47 => style.bg(base_color(code - 40)),
                48 => match extended_color(&mut iter) {
                    Some(color) => style.bg(color),
                    None => style,
                },
                49 => style.bg(Color::Reset),
                90..=97 => style.fg(bright_color(code - 90)),
                100..=107 => style.bg(bright_color(code - 100)),
                other => {
                    tracing::trace!("Unhandled SGR code: {}", other);
                    style
                }
            };
        }

        self.set_style(style);
    }
}

fn base_color(idx: u16) -> Color {
    match idx {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(idx: u16) -> Color {
    match idx {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}

/// `5;n` or `2;r;g;b` following a 38/48
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => Some(Color::Indexed(u8::try_from(iter.next()?).ok()?)),
        2 => {
            let mut channel = || iter.next().and_then(|v| u8::try_from(v).ok());
            Some(Color::Rgb(channel()?, channel()?, channel()?))
        }
        _ => None,
    }
}

impl Perform for SpanPerformer {
    fn print(&mut self, c: char) {
        self.buffer.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => self.newline(),
            b'\t' => self.buffer.push_str("    "),
            // carriage returns and bells carry nothing printable
            _ => {}
        }
    }

    fn hook(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _c: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(
        &mut self,
        params: &vte::Params,
        _intermediates: &[u8],
        _ignore: bool,
        c: char,
    ) {
        if c == 'm' {
            let values: Vec<u16> = params.iter().flat_map(|p| p.iter().copied()).collect();
            self.select_graphic_rendition(&values);
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let text = to_text("hello\nworld");
        assert_eq!(text.lines.len(), 2);
        assert_eq!(strip("hello\nworld"), "hello\nworld");
    }

    #[test]
    fn test_basic_colors() {
        let text = to_text("\x1b[31mred\x1b[0m plain");
        let spans = &text.lines[0].spans;
        assert_eq!(spans[0].content, "red");
        assert_eq!(spans[0].style.fg, Some(Color::Red));
        assert_eq!(spans[1].content, " plain");
        assert_eq!(spans[1].style, Style::default());
    }

    #[test]
    fn test_truecolor_and_bold() {
        let text = to_text("\x1b[1;38;2;29;161;242mbrand\x1b[22m");
        let span = &text.lines[0].spans[0];
        assert_eq!(span.style.fg, Some(Color::Rgb(29, 161, 242)));
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_indexed_background() {
        let text = to_text("\x1b[48;5;236mcode\x1b[49m");
        assert_eq!(text.lines[0].spans[0].style.bg, Some(Color::Indexed(236)));
    }

    #[test]
    fn test_bright_and_reset_empty_params() {
        let text = to_text("\x1b[96mcyan\x1b[mdone");
        let spans = &text.lines[0].spans;
        assert_eq!(spans[0].style.fg, Some(Color::LightCyan));
        assert_eq!(spans[1].style, Style::default());
    }

    #[test]
    fn test_strip_removes_escapes() {
        assert_eq!(strip("\x1b[1m\x1b[33mWarning\x1b[0m: x"), "Warning: x");
    }
}
