//! Errors raised while compiling a validated diagram.

use thiserror::Error;

/// Broad category of a [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderErrorKind {
    /// A name or id that does not resolve, or resolves ambiguously
    Reference,
    /// An element whose content cannot be rendered
    Content,
}

/// An error raised by the compiler. Any error aborts the whole compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("element `{element}` uses unknown style preset `{preset}`")]
    UnknownStylePreset { element: String, preset: String },

    #[error("arrow `{arrow}` refs must point to existing elements: `{target}` not found")]
    UnresolvedReference { arrow: String, target: String },

    #[error("text elements require a non-empty `text`")]
    EmptyText { id: Option<String> },

    #[error("element id `{id}` is already in use")]
    DuplicateId { id: String },
}

impl RenderError {
    /// Returns the category of this error.
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            RenderError::UnknownStylePreset { .. }
            | RenderError::UnresolvedReference { .. }
            | RenderError::DuplicateId { .. } => RenderErrorKind::Reference,
            RenderError::EmptyText { .. } => RenderErrorKind::Content,
        }
    }

    pub fn is_reference_error(&self) -> bool {
        self.kind() == RenderErrorKind::Reference
    }
}
