//! Collector for accumulating diagnostics while validating a document.
//!
//! Each element is validated independently, so a document with several
//! broken elements reports all of them at once. Any error still rejects
//! the whole document.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics and converts them into a result at the end.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, marking the collector as failed if it is an error.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns `Err(ParseError)` carrying every diagnostic if any error was
    /// emitted, otherwise the warnings in emission order.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        Ok(self
            .diagnostics
            .into_iter()
            .filter(|diagnostic| diagnostic.severity().is_warning())
            .collect())
    }
}
