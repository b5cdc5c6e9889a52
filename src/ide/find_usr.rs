//! Looking up a declaration by USR in a generated interface.

use std::sync::Arc;

use text_size::TextRange;

use super::RequestError;
use crate::base::Span;
use crate::hir::{SymbolId, SymbolIndex};
use crate::interface::InterfaceDocument;

/// Where a USR is declared in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsrLocation {
    pub usr: Arc<str>,
    pub symbol: SymbolId,
    /// The declaring name token, or the first span of the declaration
    pub range: TextRange,
    pub span: Span,
}

/// Find the declaration of `usr` in `doc`.
pub fn find_usr(
    index: &SymbolIndex,
    doc: &InterfaceDocument,
    usr: &str,
) -> Result<UsrLocation, RequestError> {
    let symbol = index
        .lookup_usr(usr)
        .ok_or_else(|| RequestError::UsrNotFound(usr.to_string()))?;
    let range = doc
        .declaration_of(symbol.id)
        .map(|occurrence| occurrence.range)
        .or_else(|| doc.spans_of(symbol.id).next().map(|span| span.range))
        .ok_or_else(|| RequestError::UsrNotFound(usr.to_string()))?;
    Ok(UsrLocation {
        usr: symbol.usr.clone(),
        symbol: symbol.id,
        range,
        span: doc.line_index().span(range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{STDLIB_MODULE, SymbolOrigin, extract_symbols};
    use crate::interface::{PrintOptions, generate_interface};
    use crate::parser::parse;
    use crate::project::stdlib::STDLIB_SOURCE;

    fn index() -> SymbolIndex {
        let mut index = SymbolIndex::new();
        let source = "public class A {\n    public func f() {}\n    private func g() {}\n}\n";
        index.add_file(
            FileId::new(0),
            "M",
            SymbolOrigin::Primary,
            extract_symbols(&parse(source).source_file()),
        );
        index.add_file(
            FileId::new(1),
            STDLIB_MODULE,
            SymbolOrigin::Stdlib,
            extract_symbols(&parse(STDLIB_SOURCE).source_file()),
        );
        index.resolve_all();
        index
    }

    #[test]
    fn test_find_declared_usr() {
        let index = index();
        let doc = generate_interface(&index, "M", &PrintOptions::default());
        let f = index.lookup_qualified("M.A.f").unwrap();

        let location = find_usr(&index, &doc, &f.usr).unwrap();
        assert_eq!(location.symbol, f.id);
        assert_eq!(&doc.text()[location.range], "f");
        assert_eq!(location.span.to_string(), "3:17-3:18");
    }

    #[test]
    fn test_unknown_or_unprinted_usr() {
        let index = index();
        let doc = generate_interface(&index, "M", &PrintOptions::default());
        assert!(matches!(
            find_usr(&index, &doc, "s:nope"),
            Err(RequestError::UsrNotFound(usr)) if usr == "s:nope"
        ));

        // Private members exist in the index but not in the document
        let g = index.lookup_qualified("M.A.g").unwrap();
        assert!(matches!(find_usr(&index, &doc, &g.usr), Err(RequestError::UsrNotFound(_))));
    }
}
