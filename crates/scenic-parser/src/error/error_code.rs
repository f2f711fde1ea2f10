//! Error codes for the Scenic diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - JSON syntax errors
//! - `E1xx` - Document-level errors
//! - `E2xx` - Element-level errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Invalid JSON.
    ///
    /// The document is not well-formed JSON.
    E001,

    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Root is not an object.
    E100,

    /// Missing `elements` array.
    ///
    /// The document has no `elements` key, or its value is not an array.
    E101,

    /// Invalid grid.
    ///
    /// `grid` must be a non-negative number (or `null` to disable snapping).
    E102,

    /// Invalid styles table.
    ///
    /// `styles` must be an object mapping preset names to style records.
    E103,

    /// Invalid `fitText` flag.
    E104,

    // =========================================================================
    // Element Errors (E2xx)
    // =========================================================================
    /// Element is not an object.
    E200,

    /// Missing element type.
    ///
    /// Every element needs a string `type`.
    E201,

    /// Unsupported element type.
    ///
    /// `type` must be one of `box`, `ellipse`, `diamond`, `text`, `arrow`
    /// (compared case-insensitively).
    E202,

    /// Missing or non-numeric required field.
    ///
    /// Boxes, ellipses and diamonds require numeric `x`, `y`, `w` and `h`.
    E203,

    /// Invalid field type.
    ///
    /// An optional field such as `id`, `style` or a font metric has the
    /// wrong JSON type.
    E204,

    /// Invalid style overrides.
    ///
    /// `styleOverrides` (or a preset) is not an object, or one of its
    /// fields has the wrong type.
    E205,

    /// Invalid arrow endpoint.
    ///
    /// `from` and `to` must be objects with a string `ref`.
    E206,

    /// Unknown anchor side.
    ///
    /// `side` must be one of `left`, `right`, `top`, `bottom`, `center`.
    E207,

    /// Duplicate element id.
    ///
    /// Two elements declare the same explicit `id`.
    E208,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON",
            ErrorCode::E100 => "root is not an object",
            ErrorCode::E101 => "missing elements array",
            ErrorCode::E102 => "invalid grid",
            ErrorCode::E103 => "invalid styles",
            ErrorCode::E104 => "invalid fitText",
            ErrorCode::E200 => "element is not an object",
            ErrorCode::E201 => "missing element type",
            ErrorCode::E202 => "unsupported element type",
            ErrorCode::E203 => "missing required field",
            ErrorCode::E204 => "invalid field type",
            ErrorCode::E205 => "invalid style overrides",
            ErrorCode::E206 => "invalid arrow endpoint",
            ErrorCode::E207 => "unknown side",
            ErrorCode::E208 => "duplicate element id",
        }
    }

    /// Returns true for codes reporting a broken reference between values.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, ErrorCode::E207 | ErrorCode::E208)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E208.to_string(), "E208");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "invalid JSON");
        assert_eq!(ErrorCode::E202.description(), "unsupported element type");
        assert_eq!(ErrorCode::E207.description(), "unknown side");
    }

    #[test]
    fn test_reference_error_codes() {
        assert!(ErrorCode::E207.is_reference_error());
        assert!(ErrorCode::E208.is_reference_error());
        assert!(!ErrorCode::E203.is_reference_error());
    }
}
