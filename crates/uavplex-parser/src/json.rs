//! Shared JSON helpers.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// Deserializes `source`, mapping `serde_json` failures to a diagnostic
/// pointing at the reported position.
pub(crate) fn from_source<T: DeserializeOwned>(source: &str) -> Result<T> {
    serde_json::from_str(source).map_err(|err| to_diagnostic(source, &err))
}

fn to_diagnostic(source: &str, err: &serde_json::Error) -> Diagnostic {
    let span = Span::at_line_column(source, err.line(), err.column());
    let (code, label, help) = match err.classify() {
        Category::Eof => (
            ErrorCode::E002,
            "input ends here",
            "the file looks truncated; check that every `{` and `[` is closed",
        ),
        Category::Data => (
            ErrorCode::E003,
            "unexpected value",
            "check the value against the descriptor format",
        ),
        Category::Syntax | Category::Io => (
            ErrorCode::E001,
            "invalid JSON",
            "the descriptor must be a single JSON document",
        ),
    };

    Diagnostic::error(err.to_string())
        .with_code(code)
        .with_label(span, label)
        .with_help(help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_code() {
        let err = from_source::<serde_json::Value>("{ \"a\": ]").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E001));
        assert_eq!(err.labels().len(), 1);
    }

    #[test]
    fn test_eof_error_code() {
        let err = from_source::<serde_json::Value>("{ \"a\": [1, 2").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E002));
    }

    #[test]
    fn test_data_error_code() {
        let err = from_source::<Vec<u32>>("{\"a\": 1}").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E003));
    }
}
