//! Layout tree for slide compositions
//!
//! A `Region` is a leaf holding `Content`, or a row/column split of child
//! regions sized by ratio. Any region can be wrapped in a bordered `Panel`.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use serde_json::Value;

use crate::render::pretty;

/// What a leaf region shows
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// Nothing; keeps its share of the space
    #[default]
    Empty,
    /// Pre-styled text
    Text {
        text: Text<'static>,
        padding: u16,
        wrap: bool,
    },
    /// A value pretty printed for whatever width the region gets
    Pretty {
        record: Option<String>,
        value: Value,
    },
}

impl Content {
    /// Wrapped text with no padding
    pub fn text(text: impl Into<Text<'static>>) -> Self {
        Self::Text {
            text: text.into(),
            padding: 0,
            wrap: true,
        }
    }

    /// Wrapped text with horizontal padding on both sides
    pub fn padded(text: impl Into<Text<'static>>, padding: u16) -> Self {
        Self::Text {
            text: text.into(),
            padding,
            wrap: true,
        }
    }

    /// Text whose lines default to `alignment`
    ///
    /// `Paragraph` reads alignment per line, so it is set on every line that
    /// does not already carry one.
    pub fn aligned(text: impl Into<Text<'static>>, alignment: Alignment) -> Self {
        let mut text = text.into();
        for line in &mut text.lines {
            line.alignment = line.alignment.or(Some(alignment));
        }
        Self::text(text)
    }

    pub fn pretty(value: Value) -> Self {
        Self::Pretty {
            record: None,
            value,
        }
    }

    pub fn record(name: impl Into<String>, value: Value) -> Self {
        Self::Pretty {
            record: Some(name.into()),
            value,
        }
    }
}

impl Widget for &Content {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            Content::Empty => {}
            Content::Text {
                text,
                padding,
                wrap,
            } => {
                let mut paragraph = Paragraph::new(text.clone())
                    .block(Block::new().padding(Padding::horizontal(*padding)));
                if *wrap {
                    paragraph = paragraph.wrap(Wrap { trim: false });
                }
                paragraph.render(area, buf);
            }
            Content::Pretty { record, value } => {
                let text = pretty::render_named(record.as_deref(), value, area.width);
                Paragraph::new(text)
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }
        }
    }
}

/// Bordered frame around a region
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub title: Option<String>,
    pub style: Style,
}

impl Panel {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            style: Style::default(),
        }
    }

    pub fn styled(style: Style) -> Self {
        Self { title: None, style }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn block(&self) -> Block<'static> {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(self.style);
        match &self.title {
            Some(title) => block
                .title(title.clone())
                .title_alignment(Alignment::Center),
            None => block,
        }
    }
}

/// How a region's space is used
#[derive(Debug, Clone)]
pub enum Body {
    Leaf(Content),
    Rows(Vec<Region>),
    Columns(Vec<Region>),
}

/// Node of the layout tree
#[derive(Debug, Clone)]
pub struct Region {
    pub ratio: u16,
    pub body: Body,
    pub panel: Option<Panel>,
}

impl Region {
    pub fn new(content: Content) -> Self {
        Self {
            ratio: 1,
            body: Body::Leaf(content),
            panel: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Content::Empty)
    }

    /// Children stacked top to bottom
    pub fn rows(children: impl IntoIterator<Item = Region>) -> Self {
        Self {
            ratio: 1,
            body: Body::Rows(children.into_iter().collect()),
            panel: None,
        }
    }

    /// Children side by side
    pub fn columns(children: impl IntoIterator<Item = Region>) -> Self {
        Self {
            ratio: 1,
            body: Body::Columns(children.into_iter().collect()),
            panel: None,
        }
    }

    #[must_use]
    pub fn ratio(mut self, ratio: u16) -> Self {
        self.ratio = ratio.max(1);
        self
    }

    #[must_use]
    pub fn panel(mut self, panel: Panel) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Full-screen slide: blank upper half, content in the lower half
    pub fn full(content: Content) -> Self {
        Self::rows([Self::empty(), Self::new(content)])
    }

    /// Heading over a body three times its height
    pub fn one_case(top: Content, bottom: Content) -> Self {
        Self::rows([Self::new(top), Self::new(bottom).ratio(3)])
    }

    /// Heading over a "Default" pane and a "Rich" pane
    pub fn split(top: Content, left: Content, right: Content) -> Self {
        let lower = Self::columns([
            Self::new(left).panel(Panel::titled("Default")),
            Self::new(right).panel(Panel::titled("Rich")),
        ])
        .ratio(3);
        Self::rows([Self::new(top), lower])
    }

    /// Leaf contents in depth-first order
    pub fn contents(&self) -> Vec<&Content> {
        match &self.body {
            Body::Leaf(content) => vec![content],
            Body::Rows(children) | Body::Columns(children) => {
                children.iter().flat_map(Region::contents).collect()
            }
        }
    }
}

impl Widget for &Region {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.panel {
            Some(panel) => {
                let block = panel.block();
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        match &self.body {
            Body::Leaf(content) => content.render(inner, buf),
            Body::Rows(children) => render_split(Direction::Vertical, children, inner, buf),
            Body::Columns(children) => render_split(Direction::Horizontal, children, inner, buf),
        }
    }
}

fn render_split(direction: Direction, children: &[Region], area: Rect, buf: &mut Buffer) {
    let areas = Layout::default()
        .direction(direction)
        .constraints(children.iter().map(|child| Constraint::Fill(child.ratio)))
        .split(area);

    for (child, rect) in children.iter().zip(areas.iter()) {
        child.render(*rect, buf);
    }
}
