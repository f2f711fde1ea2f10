//! The core diagnostic type for the Scenic error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the JSON pointer of the offending value, labeled source spans
//! and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message about a document.
///
/// # Example
///
/// ```text
/// error[E203]: missing required field `w` (at /elements/1/w)
///   = help: box elements require numeric `x`, `y`, `w` and `h`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    path: Option<String>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use scenic_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("unsupported element type `star`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_path("/elements/4/type")
    ///     .with_help("expected one of: box, ellipse, diamond, text, arrow");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// Warnings never reject a document; they are returned alongside the
    /// diagram.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the JSON pointer of the offending value, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the JSON pointer of the offending value.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a source label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            path: None,
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E203]: message (at /elements/0/x)"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.path().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("element id `a` is defined multiple times")
            .with_code(ErrorCode::E208)
            .with_path("/elements/3/id")
            .with_help("first defined at /elements/0/id");

        assert_eq!(diag.code(), Some(ErrorCode::E208));
        assert_eq!(diag.path(), Some("/elements/3/id"));
        assert_eq!(diag.help(), Some("first defined at /elements/0/id"));
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("expected value")
            .with_label(Span::new(4..5), "invalid JSON here");

        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.labels()[0].span().start(), 4);
        assert_eq!(diag.labels()[0].message(), "invalid JSON here");
    }

    #[test]
    fn test_diagnostic_display_with_code_and_path() {
        let diag = Diagnostic::error("missing required field `x`")
            .with_code(ErrorCode::E203)
            .with_path("/elements/0/x");

        assert_eq!(
            diag.to_string(),
            "error[E203]: missing required field `x` (at /elements/0/x)"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("style preset `ghost` is not an object");

        assert_eq!(
            diag.to_string(),
            "warning: style preset `ghost` is not an object"
        );
    }
}
