//! Syntax highlighting for code panes
//!
//! Wraps syntect and converts its styled ranges into ratatui spans.

use std::sync::Arc;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::errors::{Result, TalkError};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Names of the themes bundled with syntect
pub fn theme_names() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Fail with the list of valid names unless `name` is bundled
pub fn ensure_theme(name: &str) -> Result<()> {
    let names = theme_names();
    if names.iter().any(|n| n == name) {
        Ok(())
    } else {
        Err(TalkError::UnknownTheme {
            name: Arc::new(name.to_string()),
            available: Arc::new(names.join(", ")),
        })
    }
}

/// Code highlighter with a fixed theme
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Create highlighter for a bundled theme
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.remove(theme_name).ok_or_else(|| {
            let available: Vec<_> = theme_set.themes.keys().cloned().collect();
            TalkError::UnknownTheme {
                name: Arc::new(theme_name.to_string()),
                available: Arc::new(available.join(", ")),
            }
        })?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlight `code` for the language token `lang` (`rust`, `json`, ...)
    pub fn highlight(&self, code: &str, lang: &str) -> Text<'static> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let lines = LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => Line::from(
                    ranges
                        .into_iter()
                        .filter_map(|(style, text)| {
                            let text = text.trim_end_matches(['\n', '\r']);
                            (!text.is_empty()).then(|| Span::styled(text.to_string(), to_style(style)))
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    tracing::debug!("Highlighting failed, using raw line: {}", e);
                    Line::raw(line.trim_end_matches(['\n', '\r']).to_string())
                }
            })
            .collect::<Vec<_>>();

        Text::from(lines)
    }
}

fn to_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));

    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plain_text;

    #[test]
    fn test_default_theme_exists() {
        assert!(ensure_theme(DEFAULT_THEME).is_ok());
        assert!(theme_names().len() > 1);
    }

    #[test]
    fn test_unknown_theme() {
        let err = Highlighter::new("no-such-theme").err();
        assert!(matches!(err, Some(TalkError::UnknownTheme { .. })));
    }

    #[test]
    fn test_highlight_keeps_text() {
        let highlighter = Highlighter::new(DEFAULT_THEME).expect("theme");
        let code = "fn main() {\n    let goose = 1;\n}\n";
        let text = highlighter.highlight(code, "rust");
        assert_eq!(plain_text(&text), code.trim_end());
    }

    #[test]
    fn test_highlight_colors_spans() {
        let highlighter = Highlighter::new(DEFAULT_THEME).expect("theme");
        let text = highlighter.highlight("let x = 60;", "rust");
        let spans = &text.lines[0].spans;
        assert!(spans.len() > 1);
        assert!(spans.iter().all(|s| matches!(s.style.fg, Some(Color::Rgb(..)))));
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let highlighter = Highlighter::new(DEFAULT_THEME).expect("theme");
        let text = highlighter.highlight("plain words", "klingon");
        assert_eq!(plain_text(&text), "plain words");
    }
}
