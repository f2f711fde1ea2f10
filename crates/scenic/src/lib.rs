//! Scenic - compile declarative diagram documents into drawable scenes.
//!
//! A Scenic document is a small JSON description of boxes, ellipses,
//! diamonds, text labels and arrows. This crate validates it, snaps it to
//! a grid, resolves styles and arrow anchors, and emits the element list of
//! an Excalidraw-compatible scene.

pub mod config;

mod error;
mod render;

pub use scenic_core::{geometry, scene, semantic, style, text};

pub use error::ScenicError;
pub use render::{RenderError, RenderErrorKind, compile};
pub use scenic_parser::Parsed;

use log::{debug, info, trace, warn};
use serde_json::Value;

use config::AppConfig;

/// Builder for parsing and compiling Scenic diagrams.
///
/// # Examples
///
/// ```rust
/// use scenic::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{ "elements": [
///     { "type": "box", "id": "a", "x": 0, "y": 0, "w": 100, "h": 60 }
/// ] }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to semantic model
/// let diagram = builder.parse(source).expect("Failed to parse");
///
/// // Compile to the scene document
/// let json = builder.render_json(&diagram).expect("Failed to render");
/// assert!(json.contains("\"rectangle\""));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse JSON source text into a semantic diagram.
    ///
    /// Validation warnings are logged at `warn` level.
    ///
    /// # Errors
    ///
    /// Returns `ScenicError::Parse` carrying every diagnostic for invalid
    /// JSON or an invalid document.
    pub fn parse(&self, source: &str) -> Result<semantic::Diagram, ScenicError> {
        let parsed = self.parse_document(source)?;
        log_warnings(&parsed);
        Ok(parsed.into_diagram())
    }

    /// Parse JSON source text, returning the diagram with its validation
    /// warnings for the caller to report.
    ///
    /// # Errors
    ///
    /// Same as [`DiagramBuilder::parse`].
    pub fn parse_document(&self, source: &str) -> Result<Parsed, ScenicError> {
        info!("Parsing diagram");

        let parsed = scenic_parser::parse_document(source)
            .map_err(|err| ScenicError::new_parse_error(err, source))?;

        debug!(warnings = parsed.warnings().len(); "Diagram parsed successfully");
        trace!(diagram:? = parsed.diagram(); "Parsed diagram");

        Ok(parsed)
    }

    /// Validate an already decoded JSON value into a semantic diagram.
    ///
    /// # Errors
    ///
    /// Returns `ScenicError::Parse` carrying every validation diagnostic.
    pub fn parse_value(&self, value: &Value) -> Result<semantic::Diagram, ScenicError> {
        info!("Validating diagram value");

        let parsed = scenic_parser::parse_document_value(value)
            .map_err(|err| ScenicError::new_parse_error(err, value.to_string()))?;

        log_warnings(&parsed);
        trace!(diagram:? = parsed.diagram(); "Parsed diagram");
        Ok(parsed.into_diagram())
    }

    /// Compile a semantic diagram into a scene.
    ///
    /// # Errors
    ///
    /// Returns `ScenicError::Render` for unknown presets, unresolved arrow
    /// references, empty text or duplicate ids.
    pub fn compile(&self, diagram: &semantic::Diagram) -> Result<scene::Scene, ScenicError> {
        let scene = render::compile(diagram, self.config.render().start_time())?;
        Ok(scene)
    }

    /// Compile a semantic diagram and serialize the scene document.
    ///
    /// The output is `{"elements": [...]}`, pretty-printed unless the
    /// output configuration disables it.
    ///
    /// # Errors
    ///
    /// Returns `ScenicError::Render` for compile failures and
    /// `ScenicError::Serialize` if the scene cannot be encoded.
    pub fn render_json(&self, diagram: &semantic::Diagram) -> Result<String, ScenicError> {
        let scene = self.compile(diagram)?;

        let json = if self.config.output().pretty() {
            serde_json::to_string_pretty(&scene)?
        } else {
            serde_json::to_string(&scene)?
        };

        info!(bytes = json.len(), pretty = self.config.output().pretty(); "Scene serialized");
        Ok(json)
    }
}

fn log_warnings(parsed: &Parsed) {
    for warning in parsed.warnings() {
        warn!(path = warning.path().unwrap_or_default(); "{}", warning.message());
    }
}
