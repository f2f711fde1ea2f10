//! Labeled source spans for diagnostic messages.
//!
//! Only syntax errors carry labels: once the document is valid JSON the
//! validator works on an untyped value tree without byte positions, and
//! reports locations as JSON pointers instead.

use crate::span::Span;

/// A labeled span in the document source.
///
/// # Example
///
/// ```text
/// error[E001]: expected `,` or `}` at line 3 column 5
///   ,-[input.json:3:5]
/// 3 |     "type": "box"
///   :     ^ invalid JSON here
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label marking the location of a problem.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let label = Label::new(Span::new(10..11), "invalid JSON here");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 11);
        assert_eq!(label.message(), "invalid JSON here");
    }
}
