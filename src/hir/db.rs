//! Salsa database definition and queries.

use crate::base::FileId;
use crate::parser::{self, Parse, SourceFile, SyntaxError};

use super::symbols::{ExtractionResult, extract_symbols};

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a file.
///
/// Set this explicitly when a file is read from disk.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database for HIR operations.
///
/// This provides memoization for parsing and symbol extraction. Queries are
/// invalidated when their `FileText` input changes.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {
        // Default no-op implementation
    }
}

impl RootDatabase {
    /// Create a new, empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Parse result: the lossless tree plus any syntax errors.
///
/// Parsing always produces a tree; errors are recovered from.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub parse: Parse,
}

// Manual Eq impl for Salsa tracking
impl Eq for ParseResult {}

impl ParseResult {
    /// Check if parsing produced no errors.
    pub fn is_ok(&self) -> bool {
        self.parse.ok()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn source_file(&self) -> SourceFile {
        self.parse.source_file()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file.
///
/// This is a tracked Salsa query - results are memoized and automatically
/// invalidated when the input `FileText` changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> ParseResult {
    let text = file_text.text(db);
    let parse = parser::parse(text);
    if !parse.ok() {
        tracing::debug!(
            file = file_text.file(db).index(),
            errors = parse.errors.len(),
            "parsed with errors"
        );
    }
    ParseResult { parse }
}

/// Extract symbols from a file given its text.
///
/// This is a tracked Salsa query that combines parsing + symbol extraction.
/// Results are memoized per-file.
#[salsa::tracked]
pub fn file_symbols_from_text(db: &dyn salsa::Database, file_text: FileText) -> ExtractionResult {
    let result = parse_file(db, file_text);
    extract_symbols(&result.source_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::symbols::SymbolKind;

    #[test]
    fn test_database_creation() {
        let _db = RootDatabase::new();
    }

    #[test]
    fn test_salsa_tracked_parse_query() {
        let db = RootDatabase::new();
        let file_text = FileText::new(&db, FileId::new(0), "class Car {}".to_string());

        let result = parse_file(&db, file_text);
        assert!(result.is_ok(), "Parse failed with errors: {:?}", result.errors());
        assert_eq!(result.source_file().decls().count(), 1);
    }

    #[test]
    fn test_parse_result_reports_errors() {
        let db = RootDatabase::new();
        let file_text = FileText::new(&db, FileId::new(0), "class {}".to_string());

        let result = parse_file(&db, file_text);
        assert!(!result.is_ok());
        assert!(result.has_errors());
    }

    #[test]
    fn test_salsa_tracked_symbols_query() {
        let db = RootDatabase::new();
        let source = "struct Test {\n    func widget() {}\n}";
        let file_text = FileText::new(&db, FileId::new(0), source.to_string());

        let result = file_symbols_from_text(&db, file_text);

        let widget = result.symbols.iter().find(|s| s.name == "widget");
        assert!(widget.is_some(), "widget not found in symbols");
        assert_eq!(widget.unwrap().kind, SymbolKind::Method);
    }

    #[test]
    fn test_salsa_memoization() {
        let db = RootDatabase::new();
        let file_text = FileText::new(&db, FileId::new(0), "enum MemoTest {}".to_string());

        // Call twice - should be memoized
        let symbols1 = file_symbols_from_text(&db, file_text);
        let symbols2 = file_symbols_from_text(&db, file_text);

        assert_eq!(symbols1, symbols2);
    }
}
