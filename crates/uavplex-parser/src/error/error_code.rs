//! Error codes for parser diagnostics.
//!
//! Codes are grouped by the kind of problem:
//! - `E0xx` - JSON syntax errors
//! - `E1xx` - Descriptor schema errors
//! - `E2xx` - Design graph validation errors
//! - `E3xx` - STL mesh errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // JSON Errors (E0xx)
    // =========================================================================
    /// Invalid JSON syntax.
    E001,

    /// Unexpected end of input.
    ///
    /// The file ended before the JSON document was complete.
    E002,

    /// Value of the wrong JSON type.
    ///
    /// For example a string where a list of components is expected.
    E003,

    // =========================================================================
    // Schema Errors (E1xx)
    // =========================================================================
    /// Missing required field.
    E100,

    /// Invalid field value.
    ///
    /// A field is present but its value cannot be used; a default is applied.
    E101,

    /// Missing section.
    ///
    /// An optional section of the design tree is absent; defaults are used.
    E102,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Undefined component reference.
    ///
    /// A connection endpoint names a component that is not in `components`.
    E200,

    /// Duplicate component definition.
    E201,

    // =========================================================================
    // STL Errors (E3xx)
    // =========================================================================
    /// Truncated binary STL.
    ///
    /// The file is shorter than its header and triangle count require.
    E300,

    /// Malformed ASCII STL facet.
    ///
    /// A facet does not have exactly three vertices.
    E301,

    /// Invalid number in ASCII STL.
    E302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON syntax",
            ErrorCode::E002 => "unexpected end of input",
            ErrorCode::E003 => "value of the wrong type",
            ErrorCode::E100 => "missing required field",
            ErrorCode::E101 => "invalid field value",
            ErrorCode::E102 => "missing section",
            ErrorCode::E200 => "undefined component",
            ErrorCode::E201 => "duplicate component definition",
            ErrorCode::E300 => "truncated binary STL",
            ErrorCode::E301 => "malformed STL facet",
            ErrorCode::E302 => "invalid number in STL",
        }
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
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E302.as_str(), "E302");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E200.description(), "undefined component");
        assert_eq!(ErrorCode::E201.description(), "duplicate component definition");
    }
}
