//! User-facing positions
//!
//! Requests address documents with 1-based `line:column` pairs, where the
//! column counts bytes. [`Span`] is the pair of positions printed for a
//! declaration location, e.g. `3:14-3:33`.

use std::fmt;

/// A span between two positions (end-exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in a document (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::from_coords(3, 14, 3, 33).to_string(), "3:14-3:33");
    }

    #[test]
    fn test_span_contains_is_end_exclusive() {
        let span = Span::from_coords(1, 5, 2, 3);
        assert!(span.contains(Position::new(1, 5)));
        assert!(span.contains(Position::new(1, 80)));
        assert!(span.contains(Position::new(2, 2)));
        assert!(!span.contains(Position::new(2, 3)));
        assert!(!span.contains(Position::new(1, 4)));
    }
}
