//! Semantic model of a diagram document.
//!
//! These types are produced by `scenic-parser` after validation and consumed
//! by the compiler. They carry exactly what the document said: defaults are
//! applied, but no geometry has been snapped and no style resolved yet.

use crate::{
    geometry::Side,
    style::{StyleOverrides, StylePresets},
    text::FontMetrics,
};

/// Default grid size when a document does not specify one.
pub const DEFAULT_GRID: f64 = 10.0;

/// A validated diagram document.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    grid: f64,
    styles: StylePresets,
    fit_text: bool,
    elements: Vec<Element>,
}

impl Diagram {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            grid: DEFAULT_GRID,
            styles: StylePresets::new(),
            fit_text: false,
            elements,
        }
    }

    /// Set the grid size. `0` disables snapping.
    pub fn with_grid(mut self, grid: f64) -> Self {
        self.grid = grid;
        self
    }

    /// Set the named style presets.
    pub fn with_styles(mut self, styles: StylePresets) -> Self {
        self.styles = styles;
        self
    }

    /// Force auto-sizing of every text element.
    pub fn with_fit_text(mut self, fit_text: bool) -> Self {
        self.fit_text = fit_text;
        self
    }

    pub fn grid(&self) -> f64 {
        self.grid
    }

    pub fn styles(&self) -> &StylePresets {
        &self.styles
    }

    pub fn fit_text(&self) -> bool {
        self.fit_text
    }

    /// Elements in declaration order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// Attributes shared by every element variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Common {
    pub id: Option<String>,
    pub style: Option<String>,
    pub style_overrides: Option<StyleOverrides>,
}

impl Common {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_style_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.style_overrides = Some(overrides);
        self
    }
}

/// The kind of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Ellipse,
    Diamond,
}

impl ShapeKind {
    /// Prefix used for generated ids, e.g. `box-3`.
    pub fn id_prefix(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Diamond => "diamond",
        }
    }
}

/// A box, ellipse or diamond with explicit geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub common: Common,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Shape {
    pub fn new(kind: ShapeKind, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            kind,
            common: Common::default(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn with_common(mut self, common: Common) -> Self {
        self.common = common;
        self
    }
}

/// A free-standing text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: Common,
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Explicit width; `None` together with `h` triggers auto-sizing
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub font_size: f64,
    pub font_family: i64,
    pub line_height: f64,
    pub padding: f64,
    pub text_align: String,
    pub vertical_align: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        let metrics = FontMetrics::default();
        Self {
            common: Common::default(),
            x: 0.0,
            y: 0.0,
            text: text.into(),
            w: None,
            h: None,
            font_size: metrics.font_size,
            font_family: 1,
            line_height: metrics.line_height,
            padding: metrics.padding,
            text_align: "center".to_string(),
            vertical_align: "middle".to_string(),
        }
    }

    pub fn with_common(mut self, common: Common) -> Self {
        self.common = common;
        self
    }

    pub fn with_size(mut self, w: Option<f64>, h: Option<f64>) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    /// Metrics used by the size estimator
    pub fn metrics(&self) -> FontMetrics {
        FontMetrics {
            font_size: self.font_size,
            line_height: self.line_height,
            padding: self.padding,
        }
    }
}

/// One end of an arrow: the id of a shape or text element and an anchor on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowEndpoint {
    pub target: String,
    pub side: Side,
}

impl ArrowEndpoint {
    pub fn new(target: impl Into<String>, side: Side) -> Self {
        Self {
            target: target.into(),
            side,
        }
    }
}

/// A straight arrow between two anchored endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub common: Common,
    pub from: ArrowEndpoint,
    pub to: ArrowEndpoint,
}

impl Arrow {
    pub fn new(from: ArrowEndpoint, to: ArrowEndpoint) -> Self {
        Self {
            common: Common::default(),
            from,
            to,
        }
    }

    pub fn with_common(mut self, common: Common) -> Self {
        self.common = common;
        self
    }
}

/// A diagram element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    Text(Text),
    Arrow(Arrow),
}

impl Element {
    /// Returns the attributes shared by all variants
    pub fn common(&self) -> &Common {
        match self {
            Element::Shape(shape) => &shape.common,
            Element::Text(text) => &text.common,
            Element::Arrow(arrow) => &arrow.common,
        }
    }

    /// Returns the explicit id, if one was supplied
    pub fn id(&self) -> Option<&str> {
        self.common().id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_defaults() {
        let diagram = Diagram::new(Vec::new());

        assert_eq!(diagram.grid(), DEFAULT_GRID);
        assert!(diagram.styles().is_empty());
        assert!(!diagram.fit_text());
        assert!(diagram.elements().is_empty());
    }

    #[test]
    fn test_text_defaults() {
        let text = Text::new("Hello");

        assert_eq!(text.x, 0.0);
        assert_eq!(text.y, 0.0);
        assert_eq!(text.font_size, 20.0);
        assert_eq!(text.font_family, 1);
        assert_eq!(text.line_height, 1.25);
        assert_eq!(text.padding, 6.0);
        assert_eq!(text.text_align, "center");
        assert_eq!(text.vertical_align, "middle");
        assert!(text.w.is_none() && text.h.is_none());
    }

    #[test]
    fn test_element_common_access() {
        let shape = Element::Shape(
            Shape::new(ShapeKind::Diamond, 0.0, 0.0, 10.0, 10.0)
                .with_common(Common::default().with_id("d").with_style("primary")),
        );
        let arrow = Element::Arrow(Arrow::new(
            ArrowEndpoint::new("a", Side::Right),
            ArrowEndpoint::new("b", Side::Left),
        ));

        assert_eq!(shape.id(), Some("d"));
        assert_eq!(shape.common().style.as_deref(), Some("primary"));
        assert_eq!(arrow.id(), None);
        assert!(arrow.common().style_overrides.is_none());
    }

    #[test]
    fn test_shape_kind_id_prefix() {
        assert_eq!(ShapeKind::Box.id_prefix(), "box");
        assert_eq!(ShapeKind::Ellipse.id_prefix(), "ellipse");
        assert_eq!(ShapeKind::Diamond.id_prefix(), "diamond");
    }
}
