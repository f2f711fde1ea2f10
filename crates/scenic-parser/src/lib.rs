//! # Scenic Parser
//!
//! Parser and validator for Scenic diagram documents. A document is a JSON
//! object describing boxes, ellipses, diamonds, text labels and arrows; this
//! crate turns it into the semantic [`Diagram`] consumed by the compiler.
//!
//! ## Usage
//!
//! ```
//! # use scenic_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "elements": [
//!             { "type": "box", "id": "a", "x": 0, "y": 0, "w": 100, "h": 60 },
//!             { "type": "box", "id": "b", "x": 200, "y": 0, "w": 100, "h": 60 },
//!             { "type": "arrow", "from": { "ref": "a", "side": "right" },
//!               "to": { "ref": "b", "side": "left" } }
//!         ]
//!     }"#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.elements().len(), 3);
//!     Ok(())
//! }
//! ```

mod document;
pub mod error;
mod span;

pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use span::Span;

use log::{debug, info};
use serde_json::Value;

use scenic_core::semantic::Diagram;

use document::Builder;

/// A validated diagram together with the warnings raised while reading it.
///
/// Warnings never block compilation. Style presets that are not objects,
/// for example, are dropped from the diagram and reported here.
#[derive(Debug)]
pub struct Parsed {
    diagram: Diagram,
    warnings: Vec<Diagnostic>,
}

impl Parsed {
    pub(crate) fn new(diagram: Diagram, warnings: Vec<Diagnostic>) -> Self {
        Self { diagram, warnings }
    }

    /// Get the validated diagram.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Get the warnings in document order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Discard the warnings and keep the diagram.
    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }
}

/// Parse document source text into a semantic diagram.
///
/// This is the main entry point for reading Scenic documents:
///
/// 1. **Decode** - Read the source as JSON
/// 2. **Validate** - Check document and element shapes, collecting every problem
/// 3. **Build** - Produce the semantic model with defaults applied
///
/// Warnings are discarded; use [`parse_document`] to keep them.
///
/// # Errors
///
/// Returns a [`ParseError`] when the source is not valid JSON (with a
/// source span pointing at the problem) or when validation fails (with a
/// JSON pointer path per diagnostic).
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    parse_document(source).map(Parsed::into_diagram)
}

/// Parse document source text, keeping the validation warnings.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_document(source: &str) -> Result<Parsed, ParseError> {
    info!(bytes = source.len(); "Parsing document");

    let root: Value = serde_json::from_str(source).map_err(|err| {
        debug!(line = err.line(), column = err.column(); "Document is not valid JSON");
        let span = Span::from_line_column(source, err.line(), err.column());
        Diagnostic::error(format!("invalid JSON: {err}"))
            .with_code(ErrorCode::E001)
            .with_label(span, "invalid JSON here")
    })?;

    parse_document_value(&root)
}

/// Validate an already decoded JSON value into a semantic diagram.
///
/// # Errors
///
/// Returns a [`ParseError`] with every validation diagnostic found.
pub fn parse_value(root: &Value) -> Result<Diagram, ParseError> {
    parse_document_value(root).map(Parsed::into_diagram)
}

/// Validate an already decoded JSON value, keeping the validation warnings.
///
/// # Errors
///
/// Same as [`parse_value`].
pub fn parse_document_value(root: &Value) -> Result<Parsed, ParseError> {
    let parsed = Builder::new().build(root)?;
    info!(
        elements = parsed.diagram().elements().len(),
        warnings = parsed.warnings().len();
        "Document parsed"
    );
    Ok(parsed)
}
