//! Source location tracking for tokens and error messages.

use std::fmt;

use miette::SourceSpan;

/// A location in source text (byte offset, line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from start of file
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open byte range in source text.
///
/// Tokens only keep byte offsets; line and column are computed on demand
/// with [`offset_to_location`] when an error needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Byte length of the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text this span covers.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Merge two spans into one covering both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Convert a byte offset to a Location (line/column).
pub fn offset_to_location(source: &str, offset: usize) -> Location {
    let offset = offset.min(source.len());
    let before = &source[..offset];

    let line = before.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[last_newline..].chars().count() as u32 + 1;

    Location { offset, line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_location_simple() {
        let source = "a {\n  b: c;\n}";

        assert_eq!(offset_to_location(source, 0), Location::new(0, 1, 1));
        assert_eq!(offset_to_location(source, 3), Location::new(3, 1, 4)); // newline
        assert_eq!(offset_to_location(source, 6), Location::new(6, 2, 3)); // 'b'
        assert_eq!(offset_to_location(source, 99), Location::new(13, 3, 2)); // clamped
    }

    #[test]
    fn test_offset_to_location_counts_chars() {
        let source = "é: x";
        // 'é' is two bytes but one column
        assert_eq!(offset_to_location(source, 2), Location::new(2, 1, 2));
    }

    #[test]
    fn test_span_merge_and_slice() {
        let source = "hello world";
        let merged = Span::new(6, 11).merge(Span::new(0, 5));

        assert_eq!(merged, Span::new(0, 11));
        assert_eq!(Span::new(6, 11).slice(source), "world");
        assert!(Span::new(4, 4).is_empty());
    }
}
