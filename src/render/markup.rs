//! Console markup
//!
//! `[bold italic yellow on red]text[/]` style tags, closed by name
//! (`[/bold]`) or by the bare `[/]`. Tags that do not parse are kept as
//! literal text, and `\[` escapes a bracket.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::emoji;

/// Parse markup into styled text, expanding emoji shortcodes
pub fn parse(markup: &str) -> Text<'static> {
    let source = emoji::replace(markup);
    let mut builder = Builder::default();
    let mut rest: &str = &source;

    while let Some(idx) = rest.find(['[', '\\', '\n']) {
        builder.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("\\[") {
            builder.push_str("[");
            rest = after;
        } else if let Some(after) = tail.strip_prefix('\\') {
            builder.push_str("\\");
            rest = after;
        } else if let Some(after) = tail.strip_prefix('\n') {
            builder.newline();
            rest = after;
        } else {
            // tail starts with '['
            match tail.find(']') {
                Some(end) if builder.apply_tag(&tail[1..end]) => rest = &tail[end + 1..],
                _ => {
                    builder.push_str("[");
                    rest = &tail[1..];
                }
            }
        }
    }
    builder.push_str(rest);
    builder.finish()
}

/// Parse a style definition such as `bold italic #1DA1F2 on white`
pub fn parse_style(spec: &str) -> Option<Style> {
    let mut style = Style::default();
    let mut words = spec.split_whitespace().peekable();
    if words.peek().is_none() {
        return None;
    }

    while let Some(word) = words.next() {
        let word = word.to_ascii_lowercase();
        if word == "on" {
            let bg = parse_color(words.next()?)?;
            style = style.bg(bg);
        } else if let Some(modifier) = parse_modifier(&word) {
            style = style.add_modifier(modifier);
        } else {
            style = style.fg(parse_color(&word)?);
        }
    }

    Some(style)
}

fn parse_modifier(word: &str) -> Option<Modifier> {
    let modifier = match word {
        "bold" | "b" => Modifier::BOLD,
        "dim" | "d" => Modifier::DIM,
        "italic" | "i" => Modifier::ITALIC,
        "underline" | "u" => Modifier::UNDERLINED,
        "blink" => Modifier::SLOW_BLINK,
        "blink2" => Modifier::RAPID_BLINK,
        "reverse" | "r" => Modifier::REVERSED,
        "strike" | "s" => Modifier::CROSSED_OUT,
        "conceal" => Modifier::HIDDEN,
        _ => return None,
    };
    Some(modifier)
}

/// Parse a color name, `#rrggbb`, `rgb(r,g,b)` or `color(n)`
pub fn parse_color(word: &str) -> Option<Color> {
    let word = word.to_ascii_lowercase();

    if let Some(hex) = word.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    if let Some(inner) = word.strip_prefix("rgb(").and_then(|w| w.strip_suffix(')')) {
        let parts: Vec<u8> = inner
            .split(',')
            .map(|p| p.trim().parse().ok())
            .collect::<Option<_>>()?;
        return match parts[..] {
            [r, g, b] => Some(Color::Rgb(r, g, b)),
            _ => None,
        };
    }

    if let Some(inner) = word.strip_prefix("color(").and_then(|w| w.strip_suffix(')')) {
        return inner.trim().parse().ok().map(Color::Indexed);
    }

    let color = match word.as_str() {
        "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::Gray,
        "bright_black" | "grey" | "gray" => Color::DarkGray,
        "bright_red" => Color::LightRed,
        "bright_green" => Color::LightGreen,
        "bright_yellow" => Color::LightYellow,
        "bright_blue" => Color::LightBlue,
        "bright_magenta" => Color::LightMagenta,
        "bright_cyan" => Color::LightCyan,
        "bright_white" => Color::White,
        _ => return None,
    };
    Some(color)
}

/// Accumulates spans and lines while walking the markup
#[derive(Default)]
struct Builder {
    stack: Vec<(String, Style)>,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    buffer: String,
}

impl Builder {
    fn current_style(&self) -> Style {
        self.stack
            .iter()
            .fold(Style::default(), |acc, (_, style)| acc.patch(*style))
    }

    fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.spans.push(Span::styled(text, self.current_style()));
        }
    }

    fn newline(&mut self) {
        self.flush();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    /// Apply an open or close tag, returning false if it is not a tag
    fn apply_tag(&mut self, tag: &str) -> bool {
        if let Some(name) = tag.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            let position = if name.is_empty() {
                self.stack.len().checked_sub(1)
            } else {
                self.stack.iter().rposition(|(open, _)| *open == name)
            };
            return match position {
                Some(idx) => {
                    self.flush();
                    self.stack.remove(idx);
                    true
                }
                None => false,
            };
        }

        match parse_style(tag) {
            Some(style) => {
                self.flush();
                self.stack.push((tag.trim().to_ascii_lowercase(), style));
                true
            }
            None => false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.newline();
        Text::from(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plain_text;

    #[test]
    fn test_parse_nested_tags() {
        let text = parse("[bold]Bold[italic] bold and italic [/bold]italic[/italic]");
        assert_eq!(plain_text(&text), "Bold bold and italic italic");

        let spans = &text.lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.add_modifier, Modifier::BOLD);
        assert_eq!(spans[1].style.add_modifier, Modifier::BOLD | Modifier::ITALIC);
        assert_eq!(spans[2].style.add_modifier, Modifier::ITALIC);
    }

    #[test]
    fn test_unclosed_tag_runs_to_end() {
        let text = parse("[bold italic yellow on red blink]WILL TRIM");
        let span = &text.lines[0].spans[0];
        assert_eq!(span.content, "WILL TRIM");
        assert_eq!(span.style.fg, Some(Color::Yellow));
        assert_eq!(span.style.bg, Some(Color::Red));
        assert!(span.style.add_modifier.contains(Modifier::SLOW_BLINK));
    }

    #[test]
    fn test_bare_close_pops_last() {
        let text = parse("[red]a[green]b[/]c[/]d");
        let fgs: Vec<_> = text.lines[0].spans.iter().map(|s| s.style.fg).collect();
        assert_eq!(
            fgs,
            [Some(Color::Red), Some(Color::Green), Some(Color::Red), None]
        );
    }

    #[test]
    fn test_non_tags_stay_literal() {
        let text = parse("list[0] and [Hit Enter] and \\[bold]");
        assert_eq!(plain_text(&text), "list[0] and [Hit Enter] and [bold]");
    }

    #[test]
    fn test_newlines_split_lines() {
        let text = parse("[bold]one\ntwo[/bold]\nthree");
        assert_eq!(text.lines.len(), 3);
        assert_eq!(
            text.lines[1].spans[0].style.add_modifier,
            Modifier::BOLD
        );
        assert_eq!(text.lines[2].spans[0].style, Style::default());
    }

    #[test]
    fn test_emoji_expanded() {
        let text = parse("[bold white]We did it! :sunglasses:");
        assert_eq!(plain_text(&text), "We did it! 😎");
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#1DA1F2"), Some(Color::Rgb(0x1d, 0xa1, 0xf2)));
        assert_eq!(parse_color("rgb(1,2,3)"), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(parse_color("color(208)"), Some(Color::Indexed(208)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_parse_style_requires_color_after_on() {
        assert!(parse_style("black on green").is_some());
        assert!(parse_style("black on").is_none());
        assert!(parse_style("").is_none());
    }
}
