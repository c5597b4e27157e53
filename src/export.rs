//! Off-screen rendering
//!
//! Draws slides into a `Buffer` instead of the live terminal, then prints the
//! buffer as plain text or ANSI. Used by `--dump` and by the tests.

use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use nu_ansi_term::{Color as AnsiColor, Style as AnsiStyle};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use unicode_width::UnicodeWidthStr;

use crate::slide::{Hold, Slide, SPINNER_FRAMES, SPINNER_INTERVAL};

/// Size and color settings for a dump
#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
    pub width: u16,
    pub height: u16,
    pub color: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
            color: true,
        }
    }
}

/// Draw `slide` into a fresh buffer, spinner shown fully filled
pub fn render_slide(slide: &Slide, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    slide.render(area, &mut buffer, SPINNER_FRAMES.len() - 2);
    buffer
}

/// Buffer rows as text, trailing blanks trimmed
pub fn buffer_to_plain(buffer: &Buffer) -> String {
    rows(buffer)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Buffer rows with styles as ANSI escapes
pub fn buffer_to_ansi(buffer: &Buffer) -> String {
    rows(buffer)
        .map(|cells| {
            let mut line = String::new();
            let mut run = String::new();
            let mut run_style: Option<AnsiStyle> = None;

            for cell in cells {
                let style = ansi_style(cell);
                if run_style != Some(style) {
                    if let Some(previous) = run_style {
                        line.push_str(&previous.paint(run.as_str()).to_string());
                    }
                    run.clear();
                    run_style = Some(style);
                }
                run.push_str(cell.symbol());
            }
            if let Some(previous) = run_style {
                line.push_str(&previous.paint(run.as_str()).to_string());
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cells of each row, skipping the cells hidden behind wide symbols
fn rows(buffer: &Buffer) -> impl Iterator<Item = Vec<&Cell>> + '_ {
    let area = buffer.area;
    (area.top()..area.bottom()).map(move |y| {
        let mut skip = 0;
        let mut cells = Vec::with_capacity(usize::from(area.width));
        for x in area.left()..area.right() {
            let Some(cell) = buffer.cell((x, y)) else {
                continue;
            };
            if skip > 0 {
                skip -= 1;
                continue;
            }
            skip = cell.symbol().width().saturating_sub(1);
            cells.push(cell);
        }
        cells
    })
}

fn ansi_style(cell: &Cell) -> AnsiStyle {
    let mut style = AnsiStyle::new();
    if let Some(fg) = ansi_color(cell.fg) {
        style = style.fg(fg);
    }
    if let Some(bg) = ansi_color(cell.bg) {
        style = style.on(bg);
    }

    let modifier = cell.modifier;
    if modifier.contains(Modifier::BOLD) {
        style = style.bold();
    }
    if modifier.contains(Modifier::DIM) {
        style = style.dimmed();
    }
    if modifier.contains(Modifier::ITALIC) {
        style = style.italic();
    }
    if modifier.contains(Modifier::UNDERLINED) {
        style = style.underline();
    }
    if modifier.intersects(Modifier::SLOW_BLINK | Modifier::RAPID_BLINK) {
        style = style.blink();
    }
    if modifier.contains(Modifier::REVERSED) {
        style = style.reverse();
    }
    if modifier.contains(Modifier::HIDDEN) {
        style = style.hidden();
    }
    if modifier.contains(Modifier::CROSSED_OUT) {
        style = style.strikethrough();
    }
    style
}

fn ansi_color(color: Color) -> Option<AnsiColor> {
    let color = match color {
        Color::Reset => return None,
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Magenta => AnsiColor::Purple,
        Color::Cyan => AnsiColor::Cyan,
        Color::Gray => AnsiColor::White,
        Color::DarkGray => AnsiColor::DarkGray,
        Color::LightRed => AnsiColor::LightRed,
        Color::LightGreen => AnsiColor::LightGreen,
        Color::LightYellow => AnsiColor::LightYellow,
        Color::LightBlue => AnsiColor::LightBlue,
        Color::LightMagenta => AnsiColor::LightPurple,
        Color::LightCyan => AnsiColor::LightCyan,
        Color::White => AnsiColor::LightGray,
        Color::Rgb(r, g, b) => AnsiColor::Rgb(r, g, b),
        Color::Indexed(i) => AnsiColor::Fixed(i),
    };
    Some(color)
}

/// Rule printed above each slide in a dump
fn rule(index: usize, name: &str, width: u16) -> String {
    let label = format!("── {index:>2} {name} ");
    let fill = usize::from(width).saturating_sub(label.width());
    format!("{label}{}", "─".repeat(fill))
}

/// Show the status spinner on stderr for `duration`
fn hold_spinner(message: &str, duration: Duration) {
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("{spinner:.cyan} {msg}")
    {
        Ok(style) => spinner.set_style(style),
        Err(e) => tracing::warn!("Spinner template rejected: {}", e),
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(SPINNER_INTERVAL);
    std::thread::sleep(duration);
    spinner.finish_and_clear();
}

/// Print every slide from `start` onward to `out`
pub fn dump<W: Write>(
    slides: &[Slide],
    start: usize,
    options: DumpOptions,
    out: &mut W,
) -> io::Result<()> {
    for (index, slide) in slides.iter().enumerate().skip(start) {
        tracing::debug!("Dumping slide {} ({})", index, slide.name);

        if let Hold::Spinner { message, duration } = &slide.hold {
            hold_spinner(message, *duration);
        }

        let buffer = render_slide(slide, options.width, options.height);
        let body = if options.color {
            buffer_to_ansi(&buffer)
        } else {
            buffer_to_plain(&buffer)
        };

        writeln!(out, "{}", rule(index, &slide.name, options.width))?;
        writeln!(out, "{body}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::{Content, Region};
    use ratatui::style::Style;
    use ratatui::text::Span;

    #[test]
    fn test_plain_dump_of_split() {
        let slide = Slide::new(
            "split",
            Region::split(Content::text("top"), Content::text("L"), Content::text("R")),
        );
        let plain = buffer_to_plain(&render_slide(&slide, 30, 8));
        assert!(plain.starts_with("top"));
        assert!(plain.contains("Default"));
        assert!(plain.contains("│L"));
    }

    #[test]
    fn test_wide_symbols_not_padded() {
        let slide = Slide::new("emoji", Region::new(Content::text("😎!")));
        let plain = buffer_to_plain(&render_slide(&slide, 10, 1));
        assert_eq!(plain, "😎!");
    }

    #[test]
    fn test_ansi_contains_escapes() {
        let slide = Slide::new(
            "red",
            Region::new(Content::text(Span::styled("alarm", Style::new().fg(Color::Red)))),
        );
        let ansi = buffer_to_ansi(&render_slide(&slide, 10, 1));
        assert!(ansi.contains("\x1b[31malarm"));
        assert_eq!(crate::render::ansi::strip(&ansi).trim_end(), "alarm");
    }

    #[test]
    fn test_dump_writes_rules_from_start() {
        let slides = vec![
            Slide::new("first", Region::new(Content::text("one"))),
            Slide::new("second", Region::new(Content::text("two"))),
        ];
        let mut out = Vec::new();
        let options = DumpOptions {
            width: 20,
            height: 2,
            color: false,
        };
        dump(&slides, 1, options, &mut out).expect("dump");

        let text = String::from_utf8(out).expect("utf8");
        assert!(!text.contains("first"));
        assert!(text.starts_with("──  1 second ─"));
        assert!(text.contains("two"));
    }

    #[test]
    fn test_zero_hold_spinner_returns() {
        let slides = vec![Slide::new("job", Region::empty()).with_spinner("busy", Duration::ZERO)];
        let mut out = Vec::new();
        dump(&slides, 0, DumpOptions::default(), &mut out).expect("dump");
        assert!(String::from_utf8_lossy(&out).contains("busy"));
    }
}
