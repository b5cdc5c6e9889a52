//! Offset and line/column conversion

pub use text_size::{TextRange, TextSize};

use super::Position;

/// A zero-based line and byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    /// The 1-based position shown to users
    pub fn to_position(self) -> Position {
        Position::new(self.line + 1, self.col + 1)
    }
}

/// Precomputed index of line start offsets for fast offset/line-col conversion.
///
/// Build once per document in O(n); each lookup is O(log n) via binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets where each line begins; `line_starts[0] == 0`
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a zero-based line/column
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a zero-based line/column to a byte offset.
    ///
    /// Returns `None` when the line does not exist or the column runs past
    /// the end of the line (the newline itself is addressable).
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        let line_end = self
            .line_starts
            .get(line_col.line as usize + 1)
            .copied()
            .unwrap_or(self.len + TextSize::new(1));
        let offset = TextSize::new(u32::from(start).checked_add(line_col.col)?);
        (offset < line_end).then_some(offset)
    }

    /// Convert a 1-based user position to a byte offset
    pub fn offset_of_position(&self, position: Position) -> Option<TextSize> {
        if position.line == 0 || position.column == 0 {
            return None;
        }
        self.offset(LineCol {
            line: position.line - 1,
            col: position.column - 1,
        })
    }

    /// The 1-based span covering `range`
    pub fn span(&self, range: TextRange) -> super::Span {
        super::Span::new(
            self.line_col(range.start()).to_position(),
            self.line_col(range.end()).to_position(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_round_trip() {
        let index = LineIndex::new("ab\ncde\n\nf");
        assert_eq!(index.line_count(), 4);
        let lc = index.line_col(TextSize::new(4));
        assert_eq!(lc, LineCol { line: 1, col: 1 });
        assert_eq!(index.offset(lc), Some(TextSize::new(4)));
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 2, col: 0 });
    }

    #[test]
    fn test_offset_rejects_columns_past_line_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(LineCol { line: 0, col: 2 }), Some(TextSize::new(2)));
        assert_eq!(index.offset(LineCol { line: 0, col: 3 }), None);
        assert_eq!(index.offset(LineCol { line: 1, col: 2 }), Some(TextSize::new(5)));
        assert_eq!(index.offset(LineCol { line: 5, col: 0 }), None);
    }

    #[test]
    fn test_offset_rejects_overflowing_columns() {
        let index = LineIndex::new("import Foo\nclass A {}\n");
        assert_eq!(index.offset(LineCol { line: 1, col: u32::MAX }), None);
        assert_eq!(index.offset_of_position(Position::new(2, u32::MAX)), None);
        assert_eq!(index.offset_of_position(Position::new(2, 1)), Some(TextSize::new(11)));
    }

    #[test]
    fn test_user_positions_are_one_based() {
        let index = LineIndex::new("import Foo\n\npublic class A {}\n");
        let offset = index.offset_of_position(Position::new(3, 14)).unwrap();
        assert_eq!(offset, TextSize::new(25));
        assert_eq!(index.offset_of_position(Position::new(0, 1)), None);
        assert_eq!(
            index.span(TextRange::new(TextSize::new(25), TextSize::new(26))).to_string(),
            "3:14-3:15"
        );
    }
}
