//! Byte-offset spans into document source text.

use std::ops::Range;

/// A half-open byte range into the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Locate a one-based line/column position reported by `serde_json`.
    ///
    /// The resulting span covers the offending character, or is empty when
    /// the position is at the end of the source.
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let end = source[offset..]
            .chars()
            .next()
            .map_or(offset, |c| offset + c.len_utf8());
        Self::new(offset..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(3..7);

        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_from_line_column_first_line() {
        let span = Span::from_line_column("{\"a\" 1}", 1, 6);

        assert_eq!(span, Span::new(5..6));
    }

    #[test]
    fn test_from_line_column_later_line() {
        let source = "{\n  \"a\": ,\n}";
        let span = Span::from_line_column(source, 2, 8);

        assert_eq!(&source[span.start()..span.end()], ",");
    }

    #[test]
    fn test_from_line_column_past_end() {
        let span = Span::from_line_column("{", 1, 2);

        assert_eq!(span, Span::new(1..1));
    }
}
