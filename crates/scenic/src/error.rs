//! Error types for Scenic operations.
//!
//! This module provides the main error type [`ScenicError`] which wraps
//! the failures that can occur while reading, compiling and serializing a
//! diagram.

use std::io;

use thiserror::Error;

use scenic_parser::error::ParseError;

use crate::render::RenderError;

/// The main error type for Scenic operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every validation diagnostic together with
/// the document source, so callers can render source snippets for syntax
/// errors.
#[derive(Debug, Error)]
pub enum ScenicError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScenicError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Returns true when the failure is a broken reference: an unknown
    /// style preset, an arrow ref with no target, an unknown anchor side or
    /// a duplicate id.
    pub fn is_reference_error(&self) -> bool {
        match self {
            ScenicError::Parse { err, .. } => err
                .diagnostics()
                .iter()
                .filter_map(|diag| diag.code())
                .any(|code| code.is_reference_error()),
            ScenicError::Render(err) => err.is_reference_error(),
            ScenicError::Io(_) | ScenicError::Serialize(_) => false,
        }
    }
}
