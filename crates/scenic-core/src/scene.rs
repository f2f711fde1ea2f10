//! Output scene model.
//!
//! A [`Scene`] is the compiled document handed to the drawing surface. Its
//! serialized form is a JSON object with a single `elements` array; every
//! element carries the same bookkeeping scaffold, the resolved style
//! inlined, and a few variant-specific fields.
//!
//! Geometry is stored as the top-left corner plus size, except for arrows
//! where `width`/`height` hold the displacement from start to end.

use serde::Serialize;

use crate::{
    geometry::{BBox, Point},
    style::Style,
};

/// A compiled scene document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    elements: Vec<SceneElement>,
}

impl Scene {
    pub fn new(elements: Vec<SceneElement>) -> Self {
        Self { elements }
    }

    /// Elements in declaration order
    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Corner rendering style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    kind: u8,
}

impl Roundness {
    /// Radius proportional to the element size (ellipses, diamonds, arrows)
    pub const PROPORTIONAL: Roundness = Roundness { kind: 2 };
    /// Fixed radius that adapts to small elements (rectangles)
    pub const ADAPTIVE: Roundness = Roundness { kind: 3 };
}

/// Arrowhead decoration on an arrow end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
}

/// Per-element values derived from the compilation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub seed: u64,
    pub version_nonce: u64,
    pub updated: i64,
}

/// Fields specific to text elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFields {
    pub text: String,
    pub font_size: f64,
    pub font_family: i64,
    pub text_align: String,
    pub vertical_align: String,
    pub baseline: i64,
    pub container_id: Option<String>,
    pub original_text: String,
    pub line_height: f64,
}

/// Fields specific to arrow elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowFields {
    /// Polyline relative to the element origin
    pub points: Vec<[f64; 2]>,
    // Always null; arrows are never bound to shapes.
    pub start_binding: (),
    pub end_binding: (),
    pub last_committed_point: (),
    pub start_arrowhead: Option<Arrowhead>,
    pub end_arrowhead: Option<Arrowhead>,
}

impl ArrowFields {
    /// A two-point arrow from the element origin along `delta`.
    pub fn straight(delta: Point) -> Self {
        Self {
            points: vec![[0.0, 0.0], [delta.x(), delta.y()]],
            start_binding: (),
            end_binding: (),
            last_committed_point: (),
            start_arrowhead: None,
            end_arrowhead: Some(Arrowhead::Arrow),
        }
    }
}

/// Variant tag and variant-specific fields of a [`SceneElement`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text(TextFields),
    Arrow(ArrowFields),
}

impl SceneElementKind {
    /// The serialized `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            SceneElementKind::Rectangle => "rectangle",
            SceneElementKind::Ellipse => "ellipse",
            SceneElementKind::Diamond => "diamond",
            SceneElementKind::Text(_) => "text",
            SceneElementKind::Arrow(_) => "arrow",
        }
    }

    fn roundness(&self) -> Option<Roundness> {
        match self {
            SceneElementKind::Rectangle => Some(Roundness::ADAPTIVE),
            SceneElementKind::Ellipse | SceneElementKind::Diamond | SceneElementKind::Arrow(_) => {
                Some(Roundness::PROPORTIONAL)
            }
            SceneElementKind::Text(_) => None,
        }
    }
}

/// One element of a compiled scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneElement {
    id: String,
    #[serde(flatten)]
    kind: SceneElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    angle: f64,
    #[serde(flatten)]
    style: Style,
    group_ids: Vec<String>,
    frame_id: Option<String>,
    roundness: Option<Roundness>,
    seed: u64,
    version: u64,
    version_nonce: u64,
    is_deleted: bool,
    bound_elements: Option<Vec<String>>,
    updated: i64,
    link: Option<String>,
    locked: bool,
}

impl SceneElement {
    /// Create an element with the constant bookkeeping scaffold.
    ///
    /// `bbox` is the placed geometry; for arrows its size is the
    /// start-to-end displacement. Roundness follows from `kind`.
    pub fn new(
        id: impl Into<String>,
        kind: SceneElementKind,
        bbox: BBox,
        style: Style,
        stamp: Stamp,
    ) -> Self {
        let roundness = kind.roundness();
        Self {
            id: id.into(),
            kind,
            x: bbox.x(),
            y: bbox.y(),
            width: bbox.width(),
            height: bbox.height(),
            angle: 0.0,
            style,
            group_ids: Vec::new(),
            frame_id: None,
            roundness,
            seed: stamp.seed,
            version: 1,
            version_nonce: stamp.version_nonce,
            is_deleted: false,
            bound_elements: None,
            updated: stamp.updated,
            link: None,
            locked: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn roundness(&self) -> Option<Roundness> {
        self.roundness
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn updated(&self) -> i64 {
        self.updated
    }

    /// Text fields, if this is a text element
    pub fn text(&self) -> Option<&TextFields> {
        match &self.kind {
            SceneElementKind::Text(fields) => Some(fields),
            _ => None,
        }
    }

    /// Arrow fields, if this is an arrow
    pub fn arrow(&self) -> Option<&ArrowFields> {
        match &self.kind {
            SceneElementKind::Arrow(fields) => Some(fields),
            _ => None,
        }
    }
}
