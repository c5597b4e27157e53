//! Text renderers
//!
//! Everything here turns some source (markdown, markup, code, ANSI, values)
//! into `ratatui` text that a slide region can lay out.

pub mod ansi;
pub mod emoji;
pub mod highlight;
pub mod markdown;
pub mod markup;
pub mod pretty;

use ratatui::text::Text;

/// The characters of `text` without styling, lines joined by `\n`
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::{Line, Span};

    #[test]
    fn test_plain_text_joins_lines() {
        let text = Text::from(vec![
            Line::from(vec![Span::raw("a"), Span::raw("b")]),
            Line::from("c"),
        ]);
        assert_eq!(plain_text(&text), "ab\nc");
    }
}
