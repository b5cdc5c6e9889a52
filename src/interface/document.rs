//! The generated interface text and its position index.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::InterfaceError;
use crate::base::{LineIndex, Position};
use crate::hir::SymbolId;

/// A run of rendered text belonging to one declaration.
///
/// A declaration with a body owns several spans (its header line, the
/// closing brace); its members own the spans in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclSpan {
    pub range: TextRange,
    pub symbol: SymbolId,
}

/// Whether an occurrence declares its symbol or refers to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OccurrenceRole {
    Decl,
    Ref,
}

/// A rendered token that names a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub range: TextRange,
    pub symbol: SymbolId,
    pub role: OccurrenceRole,
}

/// A generated interface.
///
/// Both span lists are sorted by offset and non-overlapping, and every
/// occurrence lies inside a declaration span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDocument {
    module: SmolStr,
    text: String,
    decl_spans: Vec<DeclSpan>,
    occurrences: Vec<Occurrence>,
    line_index: LineIndex,
    diagnostics: Vec<InterfaceError>,
}

impl InterfaceDocument {
    pub(crate) fn new(
        module: SmolStr,
        text: String,
        decl_spans: Vec<DeclSpan>,
        occurrences: Vec<Occurrence>,
        diagnostics: Vec<InterfaceError>,
    ) -> Self {
        let line_index = LineIndex::new(&text);
        Self {
            module,
            text,
            decl_spans,
            occurrences,
            line_index,
            diagnostics,
        }
    }

    /// The module this interface describes
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn decl_spans(&self) -> &[DeclSpan] {
        &self.decl_spans
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn diagnostics(&self) -> &[InterfaceError] {
        &self.diagnostics
    }

    /// The byte offset of a 1-based position
    pub fn offset_of(&self, position: Position) -> Option<TextSize> {
        self.line_index.offset_of_position(position)
    }

    /// The occurrence covering `offset` (end-exclusive)
    pub fn occurrence_at(&self, offset: TextSize) -> Option<&Occurrence> {
        find_covering(&self.occurrences, offset, |o| o.range)
    }

    /// The declaration span covering `offset` (end-exclusive)
    pub fn decl_span_at(&self, offset: TextSize) -> Option<&DeclSpan> {
        find_covering(&self.decl_spans, offset, |s| s.range)
    }

    /// The token that declares `symbol` in this document
    pub fn declaration_of(&self, symbol: SymbolId) -> Option<&Occurrence> {
        self.occurrences
            .iter()
            .find(|o| o.symbol == symbol && o.role == OccurrenceRole::Decl)
    }

    /// All spans rendered for `symbol`, in order
    pub fn spans_of(&self, symbol: SymbolId) -> impl Iterator<Item = &DeclSpan> {
        self.decl_spans.iter().filter(move |s| s.symbol == symbol)
    }

    /// Whether `symbol` is rendered anywhere in this document
    pub fn contains_symbol(&self, symbol: SymbolId) -> bool {
        self.spans_of(symbol).next().is_some()
    }
}

/// Binary search over sorted, non-overlapping ranges.
fn find_covering<T>(items: &[T], offset: TextSize, range: impl Fn(&T) -> TextRange) -> Option<&T> {
    let idx = items.partition_point(|item| range(item).end() <= offset);
    items
        .get(idx)
        .filter(|item| range(item).start() <= offset && offset < range(item).end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    fn document() -> InterfaceDocument {
        // "class A {\n    func f()\n}\n"
        InterfaceDocument::new(
            SmolStr::new("M"),
            "class A {\n    func f()\n}\n".to_string(),
            vec![
                DeclSpan { range: range(0, 9), symbol: SymbolId(1) },
                DeclSpan { range: range(14, 22), symbol: SymbolId(2) },
                DeclSpan { range: range(23, 24), symbol: SymbolId(1) },
            ],
            vec![
                Occurrence { range: range(6, 7), symbol: SymbolId(1), role: OccurrenceRole::Decl },
                Occurrence { range: range(19, 20), symbol: SymbolId(2), role: OccurrenceRole::Decl },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_lookups_are_end_exclusive() {
        let doc = document();
        assert_eq!(doc.occurrence_at(TextSize::new(6)).map(|o| o.symbol), Some(SymbolId(1)));
        assert!(doc.occurrence_at(TextSize::new(7)).is_none());
        assert_eq!(doc.decl_span_at(TextSize::new(8)).map(|s| s.symbol), Some(SymbolId(1)));
        assert!(doc.decl_span_at(TextSize::new(9)).is_none());
        assert_eq!(doc.decl_span_at(TextSize::new(23)).map(|s| s.symbol), Some(SymbolId(1)));
    }

    #[test]
    fn test_symbol_queries() {
        let doc = document();
        assert_eq!(doc.spans_of(SymbolId(1)).count(), 2);
        assert_eq!(doc.declaration_of(SymbolId(2)).map(|o| o.range), Some(range(19, 20)));
        assert!(!doc.contains_symbol(SymbolId(9)));
        assert_eq!(doc.offset_of(Position::new(2, 10)), Some(TextSize::new(19)));
    }
}
