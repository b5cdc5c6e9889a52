use super::*;
use crate::base::FileId;
use crate::hir::{STDLIB_MODULE, SymbolIndex, SymbolKind, SymbolOrigin, TypeRepr, extract_symbols};
use crate::parser::parse;
use crate::project::stdlib::STDLIB_SOURCE;
use smol_str::SmolStr;
use text_size::TextSize;

/// An index of `source` as module `App`, plus overlay modules and the stdlib.
fn index_of(source: &str, overlays: &[(&str, &str)]) -> SymbolIndex {
    let mut index = SymbolIndex::new();
    let mut files = vec![("App", source, SymbolOrigin::Primary)];
    for &(module, text) in overlays {
        files.push((
            module,
            text,
            SymbolOrigin::Overlay {
                module: SmolStr::new(module),
            },
        ));
    }
    files.push((STDLIB_MODULE, STDLIB_SOURCE, SymbolOrigin::Stdlib));
    for (i, (module, text, origin)) in files.into_iter().enumerate() {
        let result = extract_symbols(&parse(text).source_file());
        index.add_file(FileId::new(i as u32), module, origin, result);
    }
    index.resolve_all();
    index
}

fn render(source: &str) -> (SymbolIndex, InterfaceDocument) {
    let index = index_of(source, &[]);
    let doc = generate_interface(&index, "App", &PrintOptions::default());
    assert_well_formed(&doc);
    (index, doc)
}

/// Spans are sorted and disjoint, cover every non-whitespace byte, and
/// contain every occurrence.
fn assert_well_formed(doc: &InterfaceDocument) {
    let text = doc.text();
    for pair in doc.decl_spans().windows(2) {
        assert!(pair[0].range.end() <= pair[1].range.start(), "overlapping spans {pair:?}");
    }
    for pair in doc.occurrences().windows(2) {
        assert!(pair[0].range.end() <= pair[1].range.start(), "overlapping occurrences {pair:?}");
    }
    for (offset, ch) in text.char_indices() {
        if !ch.is_whitespace() {
            assert!(
                doc.decl_span_at(TextSize::new(offset as u32)).is_some(),
                "byte {offset} ({ch:?}) is not covered"
            );
        }
    }
    for occurrence in doc.occurrences() {
        let span = doc.decl_span_at(occurrence.range.start()).expect("occurrence outside spans");
        assert!(span.range.contains_range(occurrence.range));
    }
}

fn occurrence_text<'a>(doc: &'a InterfaceDocument, occurrence: &Occurrence) -> &'a str {
    &doc.text()[occurrence.range]
}

const FOO2: &str = r#"
public class FooOverlayClassBase {
    public init() {}

    public var count: Int = 0

    public private(set) var name: String = ""

    public func f() {}

    public func g(x: Int = 1) throws -> String { return "" }

    public subscript(index: Int) -> String {
        return ""
    }

    private func hidden() {}
}

public class FooOverlayClassDerived : FooOverlayClassBase {
    override public func f() {}
}
"#;

#[test]
fn test_class_layout() {
    let (_, doc) = render(FOO2);
    let expected = "\
public class FooOverlayClassBase {

    public init()

    public var count: Int

    public var name: String { get }

    public func f()

    public func g(x: Int = default) throws -> String

    public subscript(index: Int) -> String { get }
}

public class FooOverlayClassDerived : FooOverlayClassBase {

    override public func f()
}
";
    assert_eq!(doc.text(), expected);
    assert!(doc.diagnostics().is_empty(), "{:?}", doc.diagnostics());
}

#[test]
fn test_base_class_reference_is_an_occurrence() {
    let (index, doc) = render(FOO2);
    let base = index.lookup_qualified("App.FooOverlayClassBase").unwrap();
    let derived = index.lookup_qualified("App.FooOverlayClassDerived").unwrap();

    let refs: Vec<_> = doc
        .occurrences()
        .iter()
        .filter(|o| o.symbol == base.id && o.role == OccurrenceRole::Ref)
        .collect();
    assert_eq!(refs.len(), 1);
    assert_eq!(occurrence_text(&doc, refs[0]), "FooOverlayClassBase");
    // The reference sits on the derived class's header line
    assert_eq!(doc.decl_span_at(refs[0].range.start()).unwrap().symbol, derived.id);

    let decl = doc.declaration_of(base.id).unwrap();
    assert_eq!(doc.line_index().span(decl.range).to_string(), "1:14-1:33");
}

#[test]
fn test_generation_is_deterministic() {
    let (_, first) = render(FOO2);
    let (_, second) = render(FOO2);
    assert_eq!(first.text(), second.text());
    assert_eq!(first.decl_spans(), second.decl_spans());
}

#[test]
fn test_enums_and_raw_values() {
    let (_, doc) = render("public enum Color: Int { case red = 1, green\n case rgb(Int, label: String) }");
    let expected = "\
public enum Color : Int {

    case red

    case green

    case rgb(Int, label: String)

    public init?(rawValue: Int)

    public var rawValue: Int { get }
}
";
    assert_eq!(doc.text(), expected);

    let options = PrintOptions {
        print_synthesized: false,
        ..PrintOptions::default()
    };
    let index = index_of("enum E: String { case a }", &[]);
    let doc = generate_interface(&index, "App", &options);
    assert!(!doc.text().contains("rawValue"));
}

#[test]
fn test_unresolved_extension_is_still_printed() {
    let (index, doc) = render("extension ET {\n    public func foo() {}\n}\n");
    assert_eq!(doc.text(), "extension ET {\n\n    public func foo()\n}\n");

    let placeholder = doc
        .occurrences()
        .iter()
        .find(|o| occurrence_text(&doc, o) == "ET")
        .unwrap();
    assert_eq!(index.get(placeholder.symbol).kind, SymbolKind::Unresolved);
    assert!(matches!(
        doc.diagnostics(),
        [InterfaceError::UnresolvedSymbol { name, .. }] if name == "ET"
    ));
}

#[test]
fn test_uninferable_type_prints_error_type() {
    let (_, doc) = render("var a = 1\nlet b = compute()\nvar c = Missing()\n");
    let text = doc.text();
    assert!(text.contains("var a: Int\n"));
    assert!(text.contains("let b: <<error type>>\n"));
    assert!(text.contains("var c: <<error type>>\n"));
    assert_eq!(doc.diagnostics().len(), 2);
}

#[test]
fn test_generic_initializer_call_infers_type() {
    let (index, doc) = render("public struct S<T> {}\npublic var a = S<Int>()\npublic var b = S<[String]>(x)\n");
    let text = doc.text();
    assert!(text.contains("public var a: S<Int>\n"));
    assert!(text.contains("public var b: S<[String]>\n"));
    assert!(doc.diagnostics().is_empty());

    let a = index.lookup_qualified("App.a").unwrap();
    let TypeRepr::Path(segments) = a.ty.as_ref().unwrap() else {
        panic!("expected a path type");
    };
    assert_eq!(index.get(segments[0].resolved.unwrap()).qualified_name.as_ref(), "App.S");
    let int = segments[0].generic_args[0].resolved_symbol().unwrap();
    assert_eq!(index.get(int).origin, SymbolOrigin::Stdlib);
}

#[test]
fn test_access_filter() {
    let source = "public struct S {\n    private var a: Int\n    fileprivate func b() {}\n    var c: Int\n    public var d: Int\n}\nprivate class Hidden {}\n";
    let (_, doc) = render(source);
    assert_eq!(
        doc.text(),
        "public struct S {\n\n    var c: Int\n\n    public var d: Int\n}\n"
    );

    let index = index_of(source, &[]);
    let public_only = PrintOptions {
        access_filter: crate::hir::Access::Public,
        ..PrintOptions::default()
    };
    let doc = generate_interface(&index, "App", &public_only);
    assert!(!doc.text().contains("var c"));
}

#[test]
fn test_protocols_and_generics() {
    let source = "public protocol Store: class {\n    associatedtype Item: Hashable\n    var items: [Item] { get set }\n    var count: Int { get }\n    func fetch<T: Equatable>(_ key: T, fallback value: Item?) -> Item\n}\n";
    let (_, doc) = render(source);
    let expected = "\
public protocol Store : class {

    associatedtype Item : Hashable

    var items: [Item] { get set }

    var count: Int { get }

    func fetch<T: Equatable>(_ key: T, fallback value: Item?) -> Item
}
";
    assert_eq!(doc.text(), expected);
}

#[test]
fn test_modifier_and_attribute_order() {
    let source = "open class A {\n    @objc public final class func make() -> A { return A() }\n    public static let shared: Int = 1\n    lazy var cache: [String: Int] = [:]\n    public mutating func bump() {}\n}\n";
    let (_, doc) = render(source);
    assert!(doc.text().contains("    @objc public final class func make() -> A\n"));
    assert!(doc.text().contains("    public static let shared: Int\n"));
    assert!(doc.text().contains("    lazy var cache: [String: Int]\n"));
    assert!(doc.text().starts_with("open class A {"));
}

#[test]
fn test_doc_comments() {
    let (_, doc) = render("/// A point.\n/// In 2D.\npublic struct P {}\n");
    assert_eq!(doc.text(), "/// A point.\n/// In 2D.\npublic struct P {\n}\n");

    let index = index_of("/// A point.\npublic struct P {}\n", &[]);
    let options = PrintOptions {
        print_doc_comments: false,
        ..PrintOptions::default()
    };
    assert_eq!(generate_interface(&index, "App", &options).text(), "public struct P {\n}\n");
}

#[test]
fn test_overlay_extensions_are_appended() {
    let index = index_of(
        "import Kit\npublic struct Widget {}\n",
        &[("Kit", "import App\npublic extension Widget {\n    func draw() {}\n}\n")],
    );
    let doc = generate_interface(&index, "App", &PrintOptions::default());
    assert_well_formed(&doc);
    assert_eq!(
        doc.text(),
        "import Kit\n\npublic struct Widget {\n}\n\npublic extension Widget {\n\n    public func draw()\n}\n"
    );
}

#[test]
fn test_declaration_text() {
    let index = index_of(FOO2, &[]);
    let derived = index.lookup_qualified("App.FooOverlayClassDerived").unwrap();
    let options = PrintOptions::default();
    assert_eq!(
        declaration_text(&index, derived.id, &options),
        "public class FooOverlayClassDerived : FooOverlayClassBase"
    );
    let g = index.lookup_qualified("App.FooOverlayClassBase.g").unwrap();
    assert_eq!(
        declaration_text(&index, g.id, &options),
        "public func g(x: Int = default) throws -> String"
    );
}
