//! Cursor info: which symbol is at a position, and what it is.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::RequestError;
use crate::base::{Span, text_utils};
use crate::hir::{
    HirSymbol, Resolver, SymbolId, SymbolIndex, SymbolKind, TypeRepr, param_elements,
};
use crate::interface::{InterfaceDocument, OccurrenceRole, PrintOptions, declaration_text};
use crate::parser::Failability;
use crate::project::SourceFileInfo;

/// Result of a cursor request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorInfo {
    /// `source.lang.swift.decl.class`, `source.lang.swift.ref.class`, ...
    pub kind: String,
    pub name: SmolStr,
    pub usr: Arc<str>,
    /// The symbol's type, e.g. `FooOverlayClassBase.Type`
    pub type_name: String,
    /// Module declaring the symbol
    pub module: SmolStr,
    /// `<Declaration>…</Declaration>` with the declaration XML-escaped
    pub annotated_decl: String,
    /// Where the symbol is declared in the queried document, if it is
    pub location: Option<Span>,
    pub symbol: SymbolId,
}

/// Cursor info at `offset` in a generated interface.
///
/// Token occurrences win over the declaration span that contains them, so
/// a cursor on a base class names the base class, not the subclass.
pub fn cursor_info(
    index: &SymbolIndex,
    doc: &InterfaceDocument,
    offset: TextSize,
) -> Result<CursorInfo, RequestError> {
    if offset > doc.len() {
        return Err(RequestError::PositionOutOfRange {
            offset: offset.into(),
            len: doc.len().into(),
        });
    }
    let (symbol, role) = if let Some(occurrence) = doc.occurrence_at(offset) {
        (occurrence.symbol, occurrence.role)
    } else if let Some(span) = doc.decl_span_at(offset) {
        (span.symbol, OccurrenceRole::Decl)
    } else {
        return Err(RequestError::NoSymbolAtPosition);
    };
    tracing::trace!(offset = u32::from(offset), ?symbol, ?role, "cursor resolved");

    let location = doc
        .declaration_of(symbol)
        .map(|occurrence| doc.line_index().span(occurrence.range));
    Ok(build(index, symbol, role, location))
}

/// Cursor info at `offset` in a loaded source file.
///
/// Declaration names and type references come from the ranges recorded
/// during extraction; any other identifier is resolved as a type name from
/// the innermost declaration containing it.
pub fn cursor_info_in_source(
    index: &SymbolIndex,
    file: &SourceFileInfo,
    offset: TextSize,
) -> Result<CursorInfo, RequestError> {
    let len = file.line_index.len();
    if offset > len {
        return Err(RequestError::PositionOutOfRange {
            offset: offset.into(),
            len: len.into(),
        });
    }
    let symbols = index.symbols_in_file(file.file);
    let (symbol, role) = symbols
        .iter()
        .find(|s| s.name_range.is_some_and(|r| covers(r, offset)) && s.kind != SymbolKind::Extension)
        .map(|s| (s.id, OccurrenceRole::Decl))
        .or_else(|| type_reference_at(&symbols, offset).map(|id| (id, OccurrenceRole::Ref)))
        .or_else(|| word_reference_at(index, file, &symbols, offset).map(|id| (id, OccurrenceRole::Ref)))
        .ok_or(RequestError::NoSymbolAtPosition)?;
    tracing::trace!(offset = u32::from(offset), ?symbol, ?role, "source cursor resolved");

    let target = index.get(symbol);
    let location = match (target.file, target.name_range) {
        (Some(f), Some(range)) if f == file.file => Some(file.line_index.span(range)),
        _ => None,
    };
    Ok(build(index, symbol, role, location))
}

fn covers(range: TextRange, offset: TextSize) -> bool {
    range.start() <= offset && offset < range.end()
}

/// A written type segment covering `offset`.
fn type_reference_at(symbols: &[&HirSymbol], offset: TextSize) -> Option<SymbolId> {
    let mut found = None;
    for symbol in symbols {
        for repr in symbol.type_reprs() {
            repr.for_each_segment(&mut |segment| {
                if found.is_none() && segment.range.is_some_and(|r| covers(r, offset)) {
                    found = segment.resolved;
                }
            });
        }
        if found.is_some() {
            break;
        }
    }
    found
}

/// Resolve the identifier under the cursor from the innermost enclosing declaration.
fn word_reference_at(
    index: &SymbolIndex,
    file: &SourceFileInfo,
    symbols: &[&HirSymbol],
    offset: TextSize,
) -> Option<SymbolId> {
    let (start, end) = text_utils::word_at(&file.text, offset.into())?;
    let word = &file.text[start..end];
    let scope = symbols
        .iter()
        .filter(|s| s.decl_range.is_some_and(|r| r.contains_inclusive(offset)))
        .min_by_key(|s| s.decl_range.map(|r| r.len()))
        .map(|s| s.id);
    let resolver = match scope {
        Some(scope) => Resolver::new(index, &file.module).with_scope(scope),
        None => Resolver::new(index, &file.module),
    };
    resolver.resolve(word).symbol()
}

fn build(
    index: &SymbolIndex,
    id: SymbolId,
    role: OccurrenceRole,
    location: Option<Span>,
) -> CursorInfo {
    let symbol = index.get(id);
    CursorInfo {
        kind: kind_uid(symbol.kind, role),
        name: symbol.name.clone(),
        usr: symbol.usr.clone(),
        type_name: type_name(index, symbol),
        module: symbol.module.clone(),
        annotated_decl: annotated_declaration(index, symbol),
        location,
        symbol: id,
    }
}

/// `source.lang.swift.{decl,ref}.<kind>`
pub fn kind_uid(kind: SymbolKind, role: OccurrenceRole) -> String {
    let role = match role {
        OccurrenceRole::Decl => "decl",
        OccurrenceRole::Ref => "ref",
    };
    format!("source.lang.swift.{role}.{}", kind.uid_suffix())
}

/// The declaration wrapped in `<Declaration>` tags.
pub fn annotated_declaration(index: &SymbolIndex, symbol: &HirSymbol) -> String {
    let text = match symbol.kind {
        SymbolKind::Module => format!("module {}", symbol.name),
        SymbolKind::Unresolved => symbol.name.to_string(),
        _ => declaration_text(index, symbol.id, &PrintOptions::default()),
    };
    format!(
        "<Declaration>{}</Declaration>",
        quick_xml::escape::escape(text.as_str())
    )
}

/// The type of a symbol as shown by cursor info.
///
/// Types are shown as their metatype (`Name.Type`, `Name.Protocol`);
/// members are curried over the type that contains them.
pub fn type_name(index: &SymbolIndex, symbol: &HirSymbol) -> String {
    match symbol.kind {
        SymbolKind::Module => format!("module<{}>", symbol.name),
        SymbolKind::Protocol => format!("{}.Protocol", symbol.name),
        SymbolKind::Class
        | SymbolKind::Struct
        | SymbolKind::Enum
        | SymbolKind::TypeAlias
        | SymbolKind::AssociatedType
        | SymbolKind::GenericParam
        | SymbolKind::Unresolved => format!("{}.Type", symbol.name),
        SymbolKind::Extension => match &symbol.ty {
            Some(ty) => format!("{ty}.Type"),
            None => format!("{}.Type", symbol.name),
        },
        SymbolKind::Variable
        | SymbolKind::Property
        | SymbolKind::StaticProperty
        | SymbolKind::ClassProperty => symbol
            .ty
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| TypeRepr::Error.to_string()),
        SymbolKind::Function | SymbolKind::Subscript => function_type(symbol),
        SymbolKind::Method | SymbolKind::Deinitializer => {
            format!("({}) -> {}", owner_name(index, symbol), function_type(symbol))
        }
        SymbolKind::StaticMethod | SymbolKind::ClassMethod => {
            format!("({}.Type) -> {}", owner_name(index, symbol), function_type(symbol))
        }
        SymbolKind::Initializer => {
            let owner = owner_name(index, symbol);
            let result = match symbol.signature.as_ref().and_then(|s| s.failability) {
                Some(Failability::Optional) => format!("{owner}?"),
                Some(Failability::ImplicitlyUnwrapped) => format!("{owner}!"),
                None => owner.clone(),
            };
            let params = TypeRepr::Tuple(param_elements(symbol));
            let throws = if symbol.signature.as_ref().is_some_and(|s| s.throws) {
                " throws"
            } else {
                ""
            };
            format!("{owner}.Type -> {params}{throws} -> {result}")
        }
        SymbolKind::EnumCase => {
            let owner = owner_name(index, symbol);
            match &symbol.ty {
                Some(payload) => format!("{owner}.Type -> {payload} -> {owner}"),
                None => format!("{owner}.Type -> {owner}"),
            }
        }
    }
}

/// `(params) [throws] -> result`, with `()` for a missing result.
fn function_type(symbol: &HirSymbol) -> String {
    let params = TypeRepr::Tuple(param_elements(symbol));
    let sig = symbol.signature.as_ref();
    let throws = match sig {
        Some(sig) if sig.throws => " throws",
        Some(sig) if sig.rethrows => " rethrows",
        _ => "",
    };
    let result = sig
        .and_then(|s| s.result.as_ref())
        .map(ToString::to_string)
        .unwrap_or_else(|| "()".to_string());
    format!("{params}{throws} -> {result}")
}

/// Name of the type a member belongs to; extensions name the extended type.
fn owner_name(index: &SymbolIndex, symbol: &HirSymbol) -> String {
    let Some(parent) = symbol.parent else {
        return symbol.module.to_string();
    };
    let parent = index.get(parent);
    match (parent.kind, parent.extends) {
        (SymbolKind::Extension, Some(target)) => index.get(target).name.to_string(),
        _ => parent.name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LineIndex, Position};
    use crate::hir::{STDLIB_MODULE, SymbolOrigin, extract_symbols};
    use crate::interface::generate_interface;
    use crate::parser::parse;
    use crate::project::stdlib::STDLIB_SOURCE;
    use std::path::PathBuf;

    const SOURCE: &str = "\
public class Base {
    public init?(name: String) {}
    public func f(_ x: Int) throws -> String { return \"\" }
    public static func make() -> Base { return Base(name: \"\")! }
    public var count: Int = 0
    public subscript(i: Int) -> Base? { return nil }
}
public class Derived : Base {}
public protocol P {}
public enum E { case a, b(Int, label: String) }
public func top(a: Int, b: Int) {}
";

    fn index() -> SymbolIndex {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            "App",
            SymbolOrigin::Primary,
            extract_symbols(&parse(SOURCE).source_file()),
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

    fn type_of(index: &SymbolIndex, name: &str) -> String {
        type_name(index, index.lookup_qualified(name).unwrap())
    }

    #[test]
    fn test_type_names() {
        let index = index();
        assert_eq!(type_of(&index, "App.Base"), "Base.Type");
        assert_eq!(type_of(&index, "App.P"), "P.Protocol");
        assert_eq!(type_of(&index, "App.Base.init"), "Base.Type -> (name: String) -> Base?");
        assert_eq!(type_of(&index, "App.Base.f"), "(Base) -> (Int) throws -> String");
        assert_eq!(type_of(&index, "App.Base.make"), "(Base.Type) -> () -> Base");
        assert_eq!(type_of(&index, "App.Base.count"), "Int");
        assert_eq!(type_of(&index, "App.Base.subscript"), "(Int) -> Base?");
        assert_eq!(type_of(&index, "App.E.a"), "E.Type -> E");
        assert_eq!(type_of(&index, "App.E.b"), "E.Type -> (Int, label: String) -> E");
        assert_eq!(type_of(&index, "App.top"), "(a: Int, b: Int) -> ()");
        assert_eq!(type_of(&index, "App"), "module<App>");
    }

    #[test]
    fn test_cursor_on_interface_reference() {
        let index = index();
        let doc = generate_interface(&index, "App", &PrintOptions::default());
        // Line of `public class Derived : Base {`, column inside `Base`
        let line = doc.text().lines().position(|l| l.starts_with("public class Derived")).unwrap();
        let offset = doc.offset_of(Position::new(line as u32 + 1, 25)).unwrap();

        let info = cursor_info(&index, &doc, offset).unwrap();
        assert_eq!(info.kind, "source.lang.swift.ref.class");
        assert_eq!(info.name, "Base");
        assert_eq!(info.usr.as_ref(), "s:C3App4Base");
        assert_eq!(info.type_name, "Base.Type");
        assert_eq!(info.module, "App");
        assert_eq!(info.annotated_decl, "<Declaration>public class Base</Declaration>");
        assert_eq!(info.location.unwrap().to_string(), "1:14-1:18");
    }

    #[test]
    fn test_cursor_falls_back_to_declaration_span() {
        let index = index();
        let doc = generate_interface(&index, "App", &PrintOptions::default());
        // The `public` keyword of `public class Derived`
        let start = doc.text().find("public class Derived").unwrap();
        let info = cursor_info(&index, &doc, TextSize::new(start as u32)).unwrap();
        assert_eq!(info.kind, "source.lang.swift.decl.class");
        assert_eq!(info.name, "Derived");
    }

    #[test]
    fn test_cursor_errors() {
        let index = index();
        let doc = generate_interface(&index, "App", &PrintOptions::default());
        let past_end = doc.len() + TextSize::new(1);
        assert!(matches!(
            cursor_info(&index, &doc, past_end),
            Err(RequestError::PositionOutOfRange { .. })
        ));
        // The blank line after the first declaration header
        let blank = doc.text().find("{\n\n").unwrap() + 2;
        assert!(matches!(
            cursor_info(&index, &doc, TextSize::new(blank as u32)),
            Err(RequestError::NoSymbolAtPosition)
        ));
    }

    #[test]
    fn test_annotated_declaration_is_escaped() {
        let index = index();
        let sub = index.lookup_qualified("App.Base.f").unwrap();
        assert_eq!(
            annotated_declaration(&index, sub),
            "<Declaration>public func f(_ x: Int) throws -&gt; String</Declaration>"
        );
    }

    #[test]
    fn test_cursor_in_source_file() {
        let index = index();
        let file = SourceFileInfo {
            file: FileId::new(0),
            path: PathBuf::from("App.swift"),
            module: SmolStr::new("App"),
            text: Arc::from(SOURCE),
            line_index: LineIndex::new(SOURCE),
            errors: Vec::new(),
        };
        let offset = |needle: &str| TextSize::new(SOURCE.find(needle).unwrap() as u32);

        let decl = cursor_info_in_source(&index, &file, offset("Derived")).unwrap();
        assert_eq!(decl.kind, "source.lang.swift.decl.class");
        assert_eq!(decl.location.unwrap().to_string(), "8:14-8:21");

        let reference = cursor_info_in_source(&index, &file, offset("Base {}")).unwrap();
        assert_eq!(reference.kind, "source.lang.swift.ref.class");
        assert_eq!(reference.name, "Base");

        let stdlib = cursor_info_in_source(&index, &file, offset("String)")).unwrap();
        assert_eq!(stdlib.module, STDLIB_MODULE);
        assert!(stdlib.location.is_none());

        // `Base(name:)` inside a body is only found by the word fallback
        let in_body = cursor_info_in_source(&index, &file, offset("Base(name")).unwrap();
        assert_eq!(in_body.name, "Base");
    }
}
