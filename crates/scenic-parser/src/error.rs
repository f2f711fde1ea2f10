//! Error and diagnostic system for the Scenic parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - JSON pointer paths locating the offending value
//! - Labeled spans for syntax errors
//! - Severity levels (errors reject a document, warnings do not)
//! - A diagnostic collector so every broken element is reported at once
//!
//! # Example
//!
//! ```
//! # use scenic_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("missing required field `h`")
//!     .with_code(ErrorCode::E203)
//!     .with_path("/elements/2/h")
//!     .with_help("box elements require numeric `x`, `y`, `w` and `h`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
