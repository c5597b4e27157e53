//! Markdown rendering for slide headings and prose
//!
//! Covers the subset the deck writes: headings, bullet lists, fenced code
//! blocks and inline bold, italic, code and links. Text is dedented first so
//! slides can indent their markdown literals.

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::highlight::Highlighter;

const RULE: &str = "━";

/// Markdown renderer producing aligned ratatui lines
pub struct MarkdownRender<'a> {
    highlighter: Option<&'a Highlighter>,
    alignment: Alignment,
    in_code_block: bool,
    code_lang: Option<String>,
    code_buffer: String,
}

impl<'a> MarkdownRender<'a> {
    /// Create new centered renderer
    pub fn new() -> Self {
        Self {
            highlighter: None,
            alignment: Alignment::Center,
            in_code_block: false,
            code_lang: None,
            code_buffer: String::new(),
        }
    }

    /// Highlight fenced code blocks with `highlighter`
    pub fn with_highlighter(mut self, highlighter: &'a Highlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Render complete markdown text
    pub fn render(&mut self, markdown: &str) -> Text<'static> {
        let source = textwrap::dedent(markdown);
        let mut lines = Vec::new();

        for line in source.lines() {
            lines.extend(self.render_line(line));
        }

        // Unterminated fence: show what was collected
        if self.in_code_block {
            let code = std::mem::take(&mut self.code_buffer);
            let lang = self.code_lang.take();
            self.in_code_block = false;
            lines.extend(self.code_block(&code, lang.as_deref()));
        }

        Text::from(lines)
    }

    /// Render single line
    fn render_line(&mut self, line: &str) -> Vec<Line<'static>> {
        let trimmed = line.trim();

        // Code block markers
        if let Some(lang) = trimmed.strip_prefix("```") {
            if self.in_code_block {
                let code = std::mem::take(&mut self.code_buffer);
                let lang = self.code_lang.take();
                self.in_code_block = false;
                return self.code_block(&code, lang.as_deref());
            }
            self.in_code_block = true;
            self.code_lang = Some(lang.trim().to_string()).filter(|l| !l.is_empty());
            self.code_buffer.clear();
            return Vec::new();
        }

        if self.in_code_block {
            self.code_buffer.push_str(line);
            self.code_buffer.push('\n');
            return Vec::new();
        }

        // Headers
        if let Some(title) = trimmed.strip_prefix("# ") {
            let style = Style::new().add_modifier(Modifier::BOLD);
            let width = unicode_width::UnicodeWidthStr::width(title) + 4;
            let rule = Line::styled(RULE.repeat(width), Style::new().fg(Color::Magenta));
            return vec![
                rule.clone().alignment(self.alignment),
                Line::from(inline(title, style)).alignment(self.alignment),
                rule.alignment(self.alignment),
            ];
        }
        if let Some(title) = trimmed.strip_prefix("## ") {
            let style = Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            return vec![Line::from(inline(title, style)).alignment(self.alignment)];
        }
        if let Some(title) = trimmed.strip_prefix("### ") {
            let style = Style::new().add_modifier(Modifier::BOLD | Modifier::ITALIC);
            return vec![Line::from(inline(title, style)).alignment(self.alignment)];
        }

        // List items
        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let mut spans = vec![Span::styled(" • ", Style::new().fg(Color::Yellow))];
            spans.extend(inline(item, Style::new()));
            return vec![Line::from(spans).alignment(Alignment::Left)];
        }

        vec![Line::from(inline(trimmed, Style::new())).alignment(self.alignment)]
    }

    fn code_block(&self, code: &str, lang: Option<&str>) -> Vec<Line<'static>> {
        match self.highlighter {
            Some(highlighter) => highlighter
                .highlight(code, lang.unwrap_or("txt"))
                .lines
                .into_iter()
                .map(|line| line.alignment(Alignment::Left))
                .collect(),
            None => code
                .lines()
                .map(|line| {
                    Line::styled(line.to_string(), Style::new().fg(Color::Gray))
                        .alignment(Alignment::Left)
                })
                .collect(),
        }
    }
}

impl Default for MarkdownRender<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render centered markdown without code highlighting
pub fn render(markdown: &str) -> Text<'static> {
    MarkdownRender::new().render(markdown)
}

/// Format inline markdown (bold, italic, code, links) on top of `base`
fn inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::styled(std::mem::take(plain), base));
        }
    };

    while let Some(idx) = rest.find(['*', '`', '[']) {
        plain.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        let matched = if let Some(after) = tail.strip_prefix("**") {
            after.find("**").map(|end| {
                let style = base.add_modifier(Modifier::BOLD);
                (Span::styled(after[..end].to_string(), style), &after[end + 2..])
            })
        } else if let Some(after) = tail.strip_prefix('`') {
            after.find('`').map(|end| {
                let style = base.fg(Color::Gray).bg(Color::Indexed(236));
                (Span::styled(after[..end].to_string(), style), &after[end + 1..])
            })
        } else if let Some(after) = tail.strip_prefix('[') {
            link(after).map(|(label, remaining)| {
                let style = base.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED);
                (Span::styled(label.to_string(), style), remaining)
            })
        } else {
            let after = &tail[1..];
            after.find('*').filter(|&end| end > 0).map(|end| {
                let style = base.add_modifier(Modifier::ITALIC);
                (Span::styled(after[..end].to_string(), style), &after[end + 1..])
            })
        };

        match matched {
            Some((span, remaining)) => {
                flush(&mut plain, &mut spans);
                spans.push(span);
                rest = remaining;
            }
            None => {
                // Lone marker, keep it literally
                plain.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    plain.push_str(rest);
    flush(&mut plain, &mut spans);
    spans
}

/// Split `label](url)rest` into the label and what follows the link
fn link(after_bracket: &str) -> Option<(&str, &str)> {
    let close = after_bracket.find("](")?;
    let label = &after_bracket[..close];
    if label.contains('[') {
        return None;
    }
    let url_and_rest = &after_bracket[close + 2..];
    let end = url_and_rest.find(')')?;
    Some((label, &url_and_rest[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plain_text;

    #[test]
    fn test_render_header() {
        let text = render("# Hello");
        assert_eq!(text.lines.len(), 3);
        assert_eq!(plain_text(&text).lines().nth(1), Some("Hello"));
        assert!(text.lines[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text.lines[1].alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_render_subheader() {
        let text = render("## Printing a dictionary:");
        let style = text.lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_render_list() {
        let text = render("* Green for good\n* Bold the **important** stuff");
        assert_eq!(text.lines.len(), 2);
        assert!(plain_text(&text).contains("•"));
        let bold = &text.lines[1].spans[2];
        assert_eq!(bold.content, "important");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_link_shows_label_only() {
        let text = render("This talk is on [GitHub](https://github.com/x/y)!");
        assert_eq!(plain_text(&text), "This talk is on GitHub!");
        let link = &text.lines[0].spans[1];
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_brackets_without_link_stay() {
        let text = render("[Hit Enter to advance]");
        assert_eq!(plain_text(&text), "[Hit Enter to advance]");
    }

    #[test]
    fn test_inline_code_and_italic() {
        let text = render("Use `print(goose)` *now*");
        let spans = &text.lines[0].spans;
        assert_eq!(spans[1].content, "print(goose)");
        assert_eq!(spans[1].style.bg, Some(Color::Indexed(236)));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_dedent_and_code_block() {
        let text = render(
            "
            ## Code
            ```rust
            let x = 1;
            ```
            ",
        );
        let plain = plain_text(&text);
        assert!(plain.contains("let x = 1;"));
        assert!(!plain.contains("```"));
    }

    #[test]
    fn test_highlighted_code_block() {
        let highlighter = Highlighter::new(crate::render::highlight::DEFAULT_THEME).expect("theme");
        let text = MarkdownRender::new()
            .with_highlighter(&highlighter)
            .render("```rust\nlet x = 1;\n```");
        assert_eq!(text.lines.len(), 1);
        assert!(text.lines[0].spans.len() > 1);
    }
}
