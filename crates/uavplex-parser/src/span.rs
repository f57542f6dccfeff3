//! Byte ranges into parsed sources.

use std::ops::Range;

/// A half-open byte range in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range. A reversed range is treated as empty.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Span of the 1-based `line`/`column` position reported by `serde_json`.
    ///
    /// Positions past the end of the source are clamped to its last byte.
    pub fn at_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let offset = (line_start + column.saturating_sub(1)).min(source.len().saturating_sub(1));
        let end = (offset + 1).min(source.len());
        Self::new(offset..end)
    }

    /// Span of the first `"needle"` string literal at or after `from`.
    ///
    /// The surrounding quotes are not part of the span.
    pub fn of_quoted(source: &str, needle: &str, from: usize) -> Option<Self> {
        let quoted = format!("\"{needle}\"");
        let from = from.min(source.len());
        let found = source.get(from..)?.find(&quoted)?;
        let start = from + found + 1;
        Some(Self::new(start..start + needle.len()))
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_column() {
        let source = "{\n  \"a\": x\n}";
        let span = Span::at_line_column(source, 2, 8);
        assert_eq!(&source[span.start()..span.end()], "x");
    }

    #[test]
    fn test_at_line_column_clamped() {
        let source = "{";
        let span = Span::at_line_column(source, 3, 40);
        assert_eq!(span, Span::new(0..1));
    }

    #[test]
    fn test_of_quoted() {
        let source = r#"{"from_ci": "Hub", "to_ci": "X"}"#;
        let span = Span::of_quoted(source, "X", 0).unwrap();
        assert_eq!(&source[span.start()..span.end()], "X");
        assert!(Span::of_quoted(source, "Y", 0).is_none());
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let span = Span::new(5..2);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn check_line_column_in_bounds(
            source: &str,
            line: usize,
            column: usize,
        ) -> Result<(), TestCaseError> {
            let span = Span::at_line_column(source, line, column);
            prop_assert!(span.end() <= source.len());
            prop_assert!(span.start() <= span.end());
            Ok(())
        }

        fn check_quoted_found(prefix: &str, needle: &str) -> Result<(), TestCaseError> {
            let source = format!("{prefix}\"{needle}\"");
            let span = Span::of_quoted(&source, needle, 0);
            prop_assert!(span.is_some());
            let span = span.unwrap_or_default();
            prop_assert_eq!(&source[span.start()..span.end()], needle);
            Ok(())
        }

        proptest! {
            #[test]
            fn line_column_in_bounds(
                source in "[a-z{}\n ]{0,40}",
                line in 0usize..10,
                column in 0usize..60,
            ) {
                check_line_column_in_bounds(&source, line, column)?;
            }

            #[test]
            fn quoted_found(prefix in "[a-z:, ]{0,20}", needle in "[A-Za-z_0-9]{1,12}") {
                check_quoted_found(&prefix, &needle)?;
            }
        }
    }
}
