//! Width-aware pretty printer for JSON-shaped values
//!
//! A container goes on one line when it fits in the available width and is
//! expanded one item per line otherwise, recursively. Tokens are colored
//! by kind: strings green, numbers cyan, booleans and null italic.
//!
//! A leaf too wide for its line is folded at spaces, continuation lines
//! hanging one indent step deeper than the line they belong to.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const INDENT: usize = 4;

/// Pretty print `value` to fit `width` columns. With a `record` name a
/// top-level object prints as a named record (`Bird { name: ..., }`)
pub fn render_named(record: Option<&str>, value: &Value, width: u16) -> Text<'static> {
    let printer = Printer {
        width: usize::from(width.max(1)),
    };
    let mut lines = Vec::new();
    printer.emit(value, record, 0, Vec::new(), "", &mut lines);
    Text::from(lines)
}

mod styles {
    use super::{Color, Modifier, Style};

    pub const BRACE: Style = Style::new().add_modifier(Modifier::BOLD);
    pub const STRING: Style = Style::new().fg(Color::Green);
    pub const NUMBER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const TRUE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::ITALIC);
    pub const FALSE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::ITALIC);
    pub const NULL: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::ITALIC);
    pub const RECORD: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    pub const FIELD: Style = Style::new().fg(Color::Yellow);
}

struct Printer {
    width: usize,
}

impl Printer {
    fn emit(
        &self,
        value: &Value,
        record: Option<&str>,
        indent: usize,
        mut lead: Vec<Span<'static>>,
        trail: &'static str,
        lines: &mut Vec<Line<'static>>,
    ) {
        let flat = flat(value, record);
        let used = spans_width(&lead) + spans_width(&flat) + trail.len();
        let expandable = match value {
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => false,
        };

        if used <= self.width || !expandable {
            lead.extend(flat);
            push_trail(&mut lead, trail);
            lines.extend(fold(lead, self.width));
            return;
        }

        let (open, close) = brackets(value, record);
        lead.extend(open);
        lines.extend(fold(lead, self.width));

        let child_indent = indent + INDENT;
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let child_lead = vec![Span::raw(" ".repeat(child_indent))];
                    let trail = if i + 1 == items.len() { "" } else { "," };
                    self.emit(item, None, child_indent, child_lead, trail, lines);
                }
            }
            Value::Object(map) => {
                for (i, (key, item)) in map.iter().enumerate() {
                    let mut child_lead = vec![Span::raw(" ".repeat(child_indent))];
                    child_lead.extend(key_spans(key, record.is_some()));
                    let trail = if i + 1 == map.len() { "" } else { "," };
                    self.emit(item, None, child_indent, child_lead, trail, lines);
                }
            }
            _ => {}
        }

        let mut closing = vec![Span::raw(" ".repeat(indent)), close];
        push_trail(&mut closing, trail);
        lines.push(Line::from(closing));
    }
}

/// Split `spans` into lines of at most `width` columns
fn fold(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if spans_width(&spans) <= width {
        return vec![Line::from(spans)];
    }

    let indent = spans.first().map_or(0, |span| {
        span.content.len() - span.content.trim_start_matches(' ').len()
    });
    let mut folder = Folder {
        width,
        hang: (indent + INDENT).min(width / 2),
        lines: Vec::new(),
        current: Vec::new(),
        used: 0,
        start: indent,
    };
    for span in &spans {
        for word in span.content.split_inclusive(' ') {
            folder.push(word, span.style);
        }
    }
    folder.finish()
}

/// Line filling state for `fold`
struct Folder {
    width: usize,
    hang: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    used: usize,
    /// Column where text starts on the current line
    start: usize,
}

impl Folder {
    fn push(&mut self, word: &str, style: Style) {
        // trailing spaces may run past the edge; they are trimmed on break
        if self.used + word.trim_end().width() > self.width && self.used > self.start {
            self.break_line();
        }

        let mut rest = word;
        while self.used + rest.trim_end().width() > self.width {
            let mut taken = 0;
            let mut split = rest.len();
            for (idx, ch) in rest.char_indices() {
                let ch_width = ch.width().unwrap_or(0);
                if self.used + taken + ch_width > self.width {
                    split = idx;
                    break;
                }
                taken += ch_width;
            }
            if split == 0 {
                if self.used > self.start {
                    self.break_line();
                    continue;
                }
                // not even one character fits past the hang
                split = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }
            self.current.push(Span::styled(rest[..split].to_string(), style));
            self.break_line();
            rest = &rest[split..];
        }

        if !rest.is_empty() {
            self.used += rest.width();
            self.current.push(Span::styled(rest.to_string(), style));
        }
    }

    fn break_line(&mut self) {
        if let Some(last) = self.current.last_mut() {
            let trimmed = last.content.trim_end_matches(' ').to_string();
            last.content = trimmed.into();
        }
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        self.current.push(Span::raw(" ".repeat(self.hang)));
        self.used = self.hang;
        self.start = self.hang;
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if self.used > self.start || self.lines.is_empty() {
            self.lines.push(Line::from(self.current));
        }
        self.lines
    }
}

fn push_trail(spans: &mut Vec<Span<'static>>, trail: &'static str) {
    if !trail.is_empty() {
        spans.push(Span::raw(trail));
    }
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Opening spans and closing span of an expanded container
fn brackets(value: &Value, record: Option<&str>) -> (Vec<Span<'static>>, Span<'static>) {
    match (value, record) {
        (Value::Object(_), Some(name)) => (
            vec![
                Span::styled(name.to_string(), styles::RECORD),
                Span::styled(" {", styles::BRACE),
            ],
            Span::styled("}", styles::BRACE),
        ),
        (Value::Array(_), _) => (
            vec![Span::styled("[", styles::BRACE)],
            Span::styled("]", styles::BRACE),
        ),
        _ => (
            vec![Span::styled("{", styles::BRACE)],
            Span::styled("}", styles::BRACE),
        ),
    }
}

fn key_spans(key: &str, is_field: bool) -> Vec<Span<'static>> {
    if is_field {
        vec![Span::styled(key.to_string(), styles::FIELD), Span::raw(": ")]
    } else {
        vec![Span::styled(quoted(key), styles::STRING), Span::raw(": ")]
    }
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Single-line spans for `value`
fn flat(value: &Value, record: Option<&str>) -> Vec<Span<'static>> {
    match value {
        Value::Null => vec![Span::styled("null", styles::NULL)],
        Value::Bool(true) => vec![Span::styled("true", styles::TRUE)],
        Value::Bool(false) => vec![Span::styled("false", styles::FALSE)],
        Value::Number(n) => vec![Span::styled(n.to_string(), styles::NUMBER)],
        Value::String(s) => vec![Span::styled(quoted(s), styles::STRING)],
        Value::Array(items) => {
            let mut spans = vec![Span::styled("[", styles::BRACE)];
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.extend(flat(item, None));
            }
            spans.push(Span::styled("]", styles::BRACE));
            spans
        }
        Value::Object(map) => {
            let (mut spans, close) = brackets(value, record);
            if record.is_some() && !map.is_empty() {
                spans.push(Span::raw(" "));
            }
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(", "));
                }
                spans.extend(key_spans(key, record.is_some()));
                spans.extend(flat(item, None));
            }
            if record.is_some() && !map.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(close);
            spans
        }
    }
}
