//! The talk, slide by slide
//!
//! Every builder here is a leaf: it makes its sample data, captures what the
//! plain and the styled formatting produce, and drops both into a container.
//! The order of `build` is the order of the talk.

use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use color_eyre::{Section, SectionExt};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use serde_json::Value;

use crate::capture;
use crate::config::TalkConfig;
use crate::errors::{Result, TalkError};
use crate::render::highlight::Highlighter;
use crate::render::markdown::{self, MarkdownRender};
use crate::render::{ansi, markup};
use crate::sample::{self, Bird};
use crate::slide::{Content, Panel, Region, Slide};

const GITHUB: &str = "[GitHub](https://github.com/e-staats/rich-lightning-talk)";
const SPIEL: &str = "[Spiel](https://github.com/JoshKarpel/spiel)";

const BRAND: Color = Color::Rgb(0x1D, 0xA1, 0xF2);

/// How a formatting step's raw string turns into its rendered line
enum Rendered {
    /// The raw string is console markup
    Markup,
    /// The raw string is code producing this styled span
    Span(&'static str, Style),
}

impl Rendered {
    fn render(&self, raw: &str) -> Text<'static> {
        match self {
            Rendered::Markup => markup::parse(raw),
            Rendered::Span(content, style) => Text::from(Span::styled(*content, *style)),
        }
    }
}

/// Raw strings shown before their rendered form on the formatting slides
const FORMATTING: &[(&str, Rendered)] = &[
    (
        "[bold]Bold[italic] bold and italic [/bold]italic[/italic]",
        Rendered::Markup,
    ),
    (
        "[bold italic yellow on red blink]WILL TRIM ADDY ARMOR FOR FREE - ONE MINUTE TURNAROUND",
        Rendered::Markup,
    ),
    (
        r#"Span::styled("Print in your official brand colors!", Style::new().fg(Color::Rgb(0x1D, 0xA1, 0xF2)))"#,
        Rendered::Span("Print in your official brand colors!", Style::new().fg(BRAND)),
    ),
    (
        "Built-in emoji support (see src/render/emoji.rs): :star-struck: :100: :stuck_out_tongue_winking_eye: :triumph: :floppy_disk:",
        Rendered::Markup,
    ),
];

const SPLIT_CODE: &str = r#"let lower = Region::columns([
    Region::new(left).panel(Panel::titled("Default")),
    Region::new(right).panel(Panel::titled("Rich")),
])
.ratio(3);

let root = Region::rows([Region::new(top), lower]);
"#;

const STATUS_CODE: &str = r#"let message = Content::aligned(markup::parse("[bold white]We did it! :sunglasses:"), Alignment::Center);
let detail = Content::aligned("Yep, this job sure did complete alright.", Alignment::Center);
let main = Region::rows([Region::new(message), Region::new(detail)]).ratio(2);

let side = Region::new(Content::text(markup::parse(
    "Here's all the things that went great:
:heavy_check_mark: That one thing
:heavy_check_mark: The other thing
:heavy_check_mark: Oh you know",
)))
.panel(Panel::styled(Style::new().fg(Color::Black).bg(Color::Green)));

let success = Region::columns([main, side]);
"#;

/// Builds the slides with one shared highlighter
pub struct Deck<'a> {
    config: &'a TalkConfig,
    highlighter: Highlighter,
}

/// Build the whole talk in presentation order
pub fn build(config: &TalkConfig) -> Result<Vec<Slide>> {
    Deck::new(config)?.build()
}

/// Resolve a slide selector: an index, or a slide name
pub fn find(slides: &[Slide], selector: &str) -> Result<usize> {
    let selector = selector.trim();
    let found = match selector.parse::<usize>() {
        Ok(index) => (index < slides.len()).then_some(index),
        Err(_) => slides.iter().position(|slide| slide.name == selector),
    };

    found.ok_or_else(|| TalkError::UnknownSlide {
        selector: Arc::new(selector.to_string()),
        len: slides.len(),
    })
}

impl<'a> Deck<'a> {
    pub fn new(config: &'a TalkConfig) -> Result<Self> {
        Ok(Self {
            config,
            highlighter: Highlighter::new(&config.theme)?,
        })
    }

    pub fn build(&self) -> Result<Vec<Slide>> {
        let mut slides = vec![
            self.title(),
            self.dict_comp(),
            self.json_comp()?,
            self.object_comp(),
            self.nested_comp()?,
            self.traceback_plain(),
            self.traceback_rich(),
        ];
        slides.extend(self.formatting());
        slides.extend(self.layouts());
        slides.push(self.together());
        slides.push(self.status_job());
        slides.push(self.status_report());
        slides.push(self.conclusion());

        tracing::debug!("Built deck with {} slides", slides.len());
        Ok(slides)
    }

    fn pad_markdown(&self, source: &str) -> Content {
        Content::padded(markdown::render(source), self.config.padding)
    }

    fn title(&self) -> Slide {
        let content = self.pad_markdown(
            "
            # If I Were a Rich Man

            A tour of ratatui, syntect and color-eyre: rich text and beautiful formatting in the terminal

            [Everything you see here is drawn with ratatui]

            [Hit Enter to advance]
            ",
        );
        Slide::new("title", Region::full(content))
    }

    fn dict_comp(&self) -> Slide {
        let goose_map = sample::goose_map();
        let top = self.pad_markdown(
            r#"
            ## Printing a map:

            `println!("{goose_map:?}")`
            "#,
        );

        let left = Content::text(capture::plain(&goose_map));
        let right = Content::pretty(Value::Object(goose_map));
        Slide::new("dict", Region::split(top, left, right))
    }

    fn json_comp(&self) -> Result<Slide> {
        let goose_json = sample::goose_json();
        let top = self.pad_markdown(
            r#"
            ## Printing JSON:

            `println!("{goose_json}")`
            "#,
        );

        let parsed: Value = serde_json::from_str(&goose_json)?;
        let pretty = serde_json::to_string_pretty(&parsed)?;

        let left = Content::text(goose_json);
        let right = Content::text(self.highlighter.highlight(&pretty, "json"));
        Ok(Slide::new("json", Region::split(top, left, right)))
    }

    fn object_comp(&self) -> Slide {
        let goose = sample::goose();
        let top = self.pad_markdown(
            r#"
            ## Printing a struct:

            `let goose = Bird { .. };`

            `println!("{goose:?}")`
            "#,
        );

        let left = Content::text(capture::plain(&goose));
        let right = Content::text(self.highlighter.highlight(&capture::pretty(&goose), "rust"));
        Slide::new("object", Region::split(top, left, right))
    }

    fn nested_comp(&self) -> Result<Slide> {
        let tevye = sample::tevye();
        let top = self.pad_markdown(
            r#"
            ## Printing a nested record:

            `println!("{tevye:?}")`
            "#,
        );

        let left = Content::text(capture::plain(&tevye));
        let right = Content::record("Performer", serde_json::to_value(&tevye)?);
        Ok(Slide::new("nested", Region::split(top, left, right)))
    }

    fn traceback_top(&self, code: &str) -> Content {
        self.pad_markdown(&format!(
            "
            ## Printing an error:

            `Err(e) => ...`

            `{code}`
            "
        ))
    }

    fn traceback_plain(&self) -> Slide {
        let goose = sample::goose();
        let top = self.traceback_top(r#"tracing::error!(error = %e, "failed to print goose weight")"#);

        let output = capture::log_output(|| match goose.attribute("weight") {
            Ok(weight) => tracing::info!(%weight, "goose weight"),
            Err(e) => tracing::error!(error = %e, "failed to print goose weight"),
        });

        let bottom = Content::padded(Text::raw(output), self.config.padding);
        Slide::new("traceback-plain", Region::one_case(top, bottom))
    }

    fn traceback_rich(&self) -> Slide {
        let goose = sample::goose();
        let top = self.traceback_top(r#"eprintln!("{:?}", Report::new(e).with_section(|| locals))"#);

        let output = match print_weight(&goose) {
            Ok(()) => String::new(),
            Err(report) => capture::report(&report),
        };

        let bottom = Content::padded(ansi::to_text(&output), self.config.padding);
        Slide::new("traceback-rich", Region::one_case(top, bottom))
    }

    /// Heading alone, then one more raw/rendered line per slide
    fn formatting(&self) -> Vec<Slide> {
        let heading = "\n## Getting Crazy with Formatting\n";

        let mut steps: Vec<Text<'static>> = Vec::new();
        for (raw, rendered) in FORMATTING {
            steps.push(Text::raw(*raw));
            steps.push(rendered.render(raw));
        }

        (0..=steps.len())
            .map(|shown| {
                let mut lines: Vec<Line<'static>> = Vec::new();
                for (i, step) in steps.iter().take(shown).enumerate() {
                    if i > 0 && i % 2 == 0 {
                        lines.push(Line::default());
                    }
                    lines.extend(step.lines.iter().cloned());
                }

                let bottom = Content::padded(Text::from(lines), self.config.padding);
                Slide::new(
                    format!("formatting-{shown}"),
                    Region::one_case(self.pad_markdown(heading), bottom),
                )
            })
            .collect()
    }

    fn layouts(&self) -> Vec<Slide> {
        let top = self.pad_markdown(
            "
            ## Layouts and Panels

            ratatui has flexible layouts and bordered blocks to make your renderings prettier.
            ",
        );
        let listing = MarkdownRender::new()
            .with_highlighter(&self.highlighter)
            .render(&format!("```rust\n{SPLIT_CODE}```"));
        let code = Content::padded(listing, self.config.padding);

        vec![
            Slide::new("layouts", Region::one_case(top, code)),
            Slide::new(
                "layouts-demo",
                Region::split(Content::Empty, Content::Empty, Content::Empty),
            ),
        ]
    }

    fn together(&self) -> Slide {
        let top = self.pad_markdown("\n## Putting it all together\n");

        let mut text = MarkdownRender::new().with_alignment(Alignment::Left).render(
            "
            Let's make a status message:
            * Green for good, red for bad
            * **Bold** the important stuff
            * Use some panels
            * And emojis, why not
            ",
        );
        text.lines.push(Line::default());
        text.lines.extend(STATUS_CODE.lines().map(|l| Line::raw(l.to_string())));

        let bottom = Content::padded(text, self.config.padding);
        Slide::new("together", Region::one_case(top, bottom))
    }

    fn status_job(&self) -> Slide {
        let pointer = markup::parse(":arrow_down_small: Yep, this thing is drawn with ratatui too");
        Slide::new("status-job", Region::new(Content::text(pointer)))
            .with_spinner("Very important job in progress", self.config.hold())
    }

    fn status_report(&self) -> Slide {
        let centered = |markup_text: &str| Content::aligned(markup::parse(markup_text), Alignment::Center);

        let success_main = Region::rows([
            Region::new(centered("[bold white]We did it! :sunglasses:")),
            Region::new(centered("Yep, this job sure did complete alright.")),
        ])
        .ratio(2);
        let success_side = Region::new(Content::text(markup::parse(
            "Here's all the things that went great:\n\
             :heavy_check_mark: That one thing\n\
             :heavy_check_mark: The other thing\n\
             :heavy_check_mark: Oh you know",
        )))
        .panel(Panel::styled(Style::new().fg(Color::Black).bg(Color::Green)));
        let success = Region::columns([success_main, success_side]);

        let failure_main = Region::rows([
            Region::new(centered("[bold white]This job failed!")),
            Region::new(Content::text(markup::parse(
                "[bold italic white]Status Report:[/bold italic white]\n\
                 :white_check_mark: [white]That one thing[/white]\n\
                 :x: [bold yellow]The other thing[/bold yellow]\n\
                 :white_check_mark: [white]Oh you know[/white]",
            )))
            .ratio(6),
        ])
        .ratio(2);
        let failure_side = Region::new(centered(
            ":police_car_light: WEE WOO WEE WOO :police_car_light:",
        ))
        .panel(Panel::styled(Style::new().fg(Color::White).bg(Color::Red)));
        let failure = Region::columns([failure_main, failure_side]);

        let root = Region::rows([
            success.panel(Panel::titled("Status").with_style(Style::new().fg(Color::Green))),
            failure.panel(Panel::titled("Status").with_style(Style::new().fg(Color::Red))),
        ]);
        Slide::new("status-report", root)
    }

    fn conclusion(&self) -> Slide {
        let content = self.pad_markdown(&format!(
            "
            ## The End

            This presentation is on my {GITHUB}!

            Several components of this talk were borrowed in part or whole from Josh Karpel's excellent {SPIEL} library.
            "
        ));
        Slide::new("conclusion", Region::full(content))
    }
}

/// Look up the goose's weight, failing with a report that carries the locals
fn print_weight(goose: &Bird) -> color_eyre::Result<()> {
    let locals = format!("goose = {goose:#?}");
    let weight = goose
        .attribute("weight")
        .wrap_err("failed to print goose weight")
        .with_section(move || locals.header("Locals:"))
        .suggestion("`Bird` has no `weight` field; try `wingspan` instead")?;

    tracing::info!(%weight, "goose weight");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plain_text;

    fn deck() -> Vec<Slide> {
        build(&TalkConfig::default()).expect("deck builds")
    }

    #[test]
    fn test_names_are_unique() {
        let slides = deck();
        let mut names: Vec<_> = slides.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), slides.len());
    }

    #[test]
    fn test_order_of_talk() {
        let slides = deck();
        assert_eq!(slides.first().map(|s| s.name.as_str()), Some("title"));
        assert_eq!(slides.last().map(|s| s.name.as_str()), Some("conclusion"));
        assert!(find(&slides, "dict").expect("dict") < find(&slides, "json").expect("json"));
        assert!(find(&slides, "status-job").expect("job") < find(&slides, "status-report").expect("report"));
    }

    #[test]
    fn test_find_by_index_and_name() {
        let slides = deck();
        assert_eq!(find(&slides, "0").expect("index"), 0);
        assert_eq!(find(&slides, "json").expect("name"), 2);
        assert!(matches!(
            find(&slides, "999"),
            Err(TalkError::UnknownSlide { .. })
        ));
        assert!(matches!(
            find(&slides, "intermission"),
            Err(TalkError::UnknownSlide { .. })
        ));
    }

    #[test]
    fn test_formatting_steps_accumulate() {
        let slides = deck();
        let steps: Vec<_> = slides
            .iter()
            .filter(|s| s.name.starts_with("formatting-"))
            .collect();
        assert_eq!(steps.len(), FORMATTING.len() * 2 + 1);

        let last = steps.last().expect("last step");
        let text: String = last
            .root
            .contents()
            .iter()
            .filter_map(|c| match c {
                Content::Text { text, .. } => Some(plain_text(text)),
                _ => None,
            })
            .collect();
        assert!(text.contains("[bold]Bold[italic]"));
        assert!(text.contains("Bold bold and italic italic"));
        assert!(text.contains("🤩 💯"));
    }

    #[test]
    fn test_brand_color_step_uses_brand() {
        let (raw, rendered) = FORMATTING
            .iter()
            .find(|(raw, _)| raw.starts_with("Span::styled"))
            .expect("brand step");
        let text = rendered.render(raw);
        assert_eq!(plain_text(&text), "Print in your official brand colors!");
        assert_eq!(text.lines[0].spans[0].style.fg, Some(BRAND));
    }

    #[test]
    fn test_layouts_listing_is_highlighted_code() {
        let slides = deck();
        let slide = &slides[find(&slides, "layouts").expect("slide")];
        let Content::Text { text, .. } = slide.root.contents()[1] else {
            panic!("expected code listing");
        };
        let listing = plain_text(text);
        assert!(listing.starts_with("let lower = Region::columns(["));
        assert!(!listing.contains("```"));
        assert!(text.lines.iter().all(|l| l.alignment == Some(Alignment::Left)));
        assert!(text.lines[0]
            .spans
            .iter()
            .all(|s| matches!(s.style.fg, Some(Color::Rgb(..)))));
    }

    #[test]
    fn test_plain_traceback_is_log_line() {
        let slides = deck();
        let slide = &slides[find(&slides, "traceback-plain").expect("slide")];
        let Content::Text { text, .. } = slide.root.contents()[1] else {
            panic!("expected text body");
        };
        let body = plain_text(text);
        assert!(body.contains("ERROR"));
        assert!(body.contains("'Bird' object has no attribute 'weight'"));
    }

    #[test]
    fn test_print_weight_report() {
        let report = print_weight(&sample::goose()).unwrap_err();
        let text = ansi::strip(&capture::report(&report));
        assert!(text.contains("failed to print goose weight"));
        assert!(text.contains("no attribute 'weight'"));
    }

    #[test]
    fn test_spinner_hold_uses_config() {
        let config = TalkConfig {
            hold_seconds: 7,
            ..TalkConfig::default()
        };
        let slides = build(&config).expect("deck");
        let job = &slides[find(&slides, "status-job").expect("slide")];
        assert_eq!(
            job.hold,
            crate::slide::Hold::Spinner {
                message: "Very important job in progress".to_string(),
                duration: std::time::Duration::from_secs(7),
            }
        );
    }
}
