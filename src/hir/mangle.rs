//! USR mangling.
//!
//! Every symbol gets a stable `s:`-prefixed identifier built from its kind,
//! its context (parent declaration or module) and, for callables and
//! variables, its type:
//!
//! ```text
//! s:C4Foo219FooOverlayClassBase          class FooOverlayClassBase in module Foo2
//! s:FC4Foo219FooOverlayClassBase1fFT_T_  its method f()
//! s:vC4Foo219FooOverlayClassBase5countSi its property count: Int
//! ```

use std::fmt::Write;

use super::resolve::{STDLIB_MODULE, SymbolIndex, param_elements};
use super::symbols::{HirSymbol, SymbolId, SymbolKind, SymbolOrigin, TupleElement, TypeRepr};
use crate::parser::Failability;

/// The USR of a symbol.
pub fn symbol_usr(index: &SymbolIndex, id: SymbolId) -> String {
    let symbol = index.get(id);
    match symbol.kind {
        SymbolKind::Extension => {
            let mut usr = String::from("s:e:");
            match symbol.extends {
                Some(target) => usr.push_str(&entity(index, target)),
                None => usr.push_str(&ident(&symbol.name)),
            }
            if symbol.ordinal >= 2 {
                let _ = write!(usr, "#{}", symbol.ordinal);
            }
            usr
        }
        _ => format!("s:{}", entity(index, id)),
    }
}

fn ident(name: &str) -> String {
    format!("{}{}", name.len(), name)
}

fn module_context(module: &str) -> String {
    if module == STDLIB_MODULE {
        "Ss".to_string()
    } else {
        ident(module)
    }
}

/// The mangling of the declaration context a symbol lives in.
fn context(index: &SymbolIndex, symbol: &HirSymbol) -> String {
    let Some(parent) = symbol.parent else {
        return module_context(&symbol.module);
    };
    let parent_symbol = index.get(parent);
    match (parent_symbol.kind, parent_symbol.extends) {
        // Extension members live in the extended type
        (SymbolKind::Extension, Some(target)) => entity(index, target),
        (SymbolKind::Extension, None) => module_context(&symbol.module),
        _ => entity(index, parent),
    }
}

/// The mangling of a symbol without the `s:` prefix.
fn entity(index: &SymbolIndex, id: SymbolId) -> String {
    let symbol = index.get(id);
    let ctx = || context(index, symbol);
    let name = ident(&symbol.name);
    match symbol.kind {
        SymbolKind::Module => module_context(&symbol.name),
        SymbolKind::Class => format!("C{}{name}", ctx()),
        SymbolKind::Struct => format!("V{}{name}", ctx()),
        SymbolKind::Enum => format!("O{}{name}", ctx()),
        SymbolKind::Protocol => format!("P{}{name}", ctx()),
        SymbolKind::TypeAlias => format!("a{}{name}", ctx()),
        SymbolKind::AssociatedType | SymbolKind::GenericParam => format!("t{}{name}", ctx()),
        SymbolKind::Function
        | SymbolKind::Method
        | SymbolKind::StaticMethod
        | SymbolKind::ClassMethod => format!("F{}{name}{}", ctx(), signature(index, symbol)),
        SymbolKind::Initializer => format!("F{}c{}", ctx(), signature(index, symbol)),
        SymbolKind::Deinitializer => format!("F{}d{}", ctx(), signature(index, symbol)),
        SymbolKind::Subscript => format!("i{}9subscript{}", ctx(), signature(index, symbol)),
        SymbolKind::Variable
        | SymbolKind::Property
        | SymbolKind::StaticProperty
        | SymbolKind::ClassProperty => {
            let ty = symbol
                .ty
                .as_ref()
                .map(|t| mangle_type(index, t))
                .unwrap_or_else(|| "ERR".to_string());
            format!("v{}{name}{ty}", ctx())
        }
        SymbolKind::EnumCase => format!("F{}{name}", ctx()),
        SymbolKind::Extension => match symbol.extends {
            Some(target) => format!("e:{}", entity(index, target)),
            None => format!("e:{name}"),
        },
        SymbolKind::Unresolved => format!("U{}{name}", module_context(&symbol.module)),
    }
}

/// `F<params><result>` for a callable.
fn signature(index: &SymbolIndex, symbol: &HirSymbol) -> String {
    let params = mangle_tuple(index, &param_elements(symbol));
    let sig = symbol.signature.as_ref();
    let result = match symbol.kind {
        SymbolKind::Initializer => {
            let owner = context(index, symbol);
            match sig.and_then(|s| s.failability) {
                Some(Failability::Optional) => format!("Sq{owner}"),
                Some(Failability::ImplicitlyUnwrapped) => format!("SQ{owner}"),
                None => owner,
            }
        }
        _ => match sig.and_then(|s| s.result.as_ref()) {
            Some(result) => mangle_type(index, result),
            None => "T_".to_string(),
        },
    };
    let throws = if sig.is_some_and(|s| s.throws || s.rethrows) {
        "K"
    } else {
        ""
    };
    format!("{throws}F{params}{result}")
}

fn mangle_tuple(index: &SymbolIndex, elements: &[TupleElement]) -> String {
    let mut out = String::from("T");
    for element in elements {
        if let Some(label) = &element.label {
            out.push_str(&ident(label));
        }
        if element.is_inout {
            out.push('R');
        }
        out.push_str(&mangle_type(index, &element.ty));
        if element.is_variadic {
            out.push('d');
        }
    }
    out.push('_');
    out
}

/// The mangling of a type reference.
pub fn mangle_type(index: &SymbolIndex, ty: &TypeRepr) -> String {
    match ty {
        TypeRepr::Path(segments) => {
            let Some(last) = segments.last() else {
                return "ERR".to_string();
            };
            if last.name == "Self" {
                return "Ss4Self".to_string();
            }
            let Some(id) = last.resolved else {
                return format!("U{}", ident(&last.name));
            };
            let symbol = index.get(id);
            let args: Vec<String> = last
                .generic_args
                .iter()
                .map(|a| mangle_type(index, a))
                .collect();
            if symbol.origin == SymbolOrigin::Stdlib {
                if let Some(special) = stdlib_special(&symbol.name, &args) {
                    return special;
                }
            }
            match symbol.kind {
                SymbolKind::GenericParam => {
                    let position = symbol
                        .parent
                        .and_then(|owner| index.get(owner).generic_params.iter().position(|g| *g == id))
                        .unwrap_or(0);
                    format!("Q{position}_")
                }
                SymbolKind::Unresolved => format!("U{}", ident(&symbol.name)),
                _ if args.is_empty() => entity(index, id),
                _ => format!("G{}{}_", entity(index, id), args.concat()),
            }
        }
        TypeRepr::Array(inner) => format!("Sa{}", mangle_type(index, inner)),
        TypeRepr::Dictionary(key, value) => format!(
            "VSs10Dictionary{}{}_",
            mangle_type(index, key),
            mangle_type(index, value)
        ),
        TypeRepr::Optional(inner) => format!("Sq{}", mangle_type(index, inner)),
        TypeRepr::ImplicitlyUnwrapped(inner) => format!("SQ{}", mangle_type(index, inner)),
        TypeRepr::Tuple(elements) => mangle_tuple(index, elements),
        TypeRepr::Function {
            params,
            throws,
            result,
        } => format!(
            "{}F{}{}",
            if *throws { "K" } else { "" },
            mangle_tuple(index, params),
            mangle_type(index, result)
        ),
        TypeRepr::Composition(types) => {
            let parts: String = types.iter().map(|t| mangle_type(index, t)).collect();
            format!("P{parts}_")
        }
        TypeRepr::Error => "ERR".to_string(),
    }
}

/// Standard library types with dedicated manglings.
fn stdlib_special(name: &str, args: &[String]) -> Option<String> {
    let special = match (name, args) {
        ("Int", []) => "Si".to_string(),
        ("Double", []) => "Sd".to_string(),
        ("Float", []) => "Sf".to_string(),
        ("String", []) => "SS".to_string(),
        ("Bool", []) => "Sb".to_string(),
        ("Optional", [wrapped]) => format!("Sq{wrapped}"),
        ("ImplicitlyUnwrappedOptional", [wrapped]) => format!("SQ{wrapped}"),
        ("Array", [element]) => format!("Sa{element}"),
        ("Dictionary", [key, value]) => format!("VSs10Dictionary{key}{value}_"),
        _ => return None,
    };
    Some(special)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::extract_symbols;
    use crate::parser::parse;
    use rstest::rstest;
    use smol_str::SmolStr;

    const MINI_STDLIB: &str = "public struct Int {}\npublic struct String {}\npublic struct Bool {}\npublic struct Array<Element> {}\npublic struct Optional<Wrapped> {}\npublic struct Character {}";

    fn index_for(module: &str, source: &str, overlay: Option<(&str, &str)>) -> SymbolIndex {
        let mut index = SymbolIndex::new();
        let add = |index: &mut SymbolIndex, file: u32, module: &str, source: &str, origin| {
            let result = extract_symbols(&parse(source).source_file());
            index.add_file(FileId::new(file), module, origin, result);
        };
        add(&mut index, 0, module, source, SymbolOrigin::Primary);
        if let Some((name, overlay_source)) = overlay {
            add(
                &mut index,
                1,
                name,
                overlay_source,
                SymbolOrigin::Overlay {
                    module: SmolStr::new(name),
                },
            );
        }
        add(&mut index, 2, STDLIB_MODULE, MINI_STDLIB, SymbolOrigin::Stdlib);
        index.resolve_all();
        index
    }

    fn usr(index: &SymbolIndex, qualified: &str) -> String {
        index
            .lookup_qualified(qualified)
            .unwrap_or_else(|| panic!("{qualified} not found"))
            .usr
            .to_string()
    }

    #[rstest]
    #[case("public class FooOverlayClassBase {}", "Foo2.FooOverlayClassBase", "s:C4Foo219FooOverlayClassBase")]
    #[case("struct S {}", "Foo2.S", "s:V4Foo21S")]
    #[case("enum E { case a }", "Foo2.E.a", "s:FO4Foo21E1a")]
    #[case("protocol P {}", "Foo2.P", "s:P4Foo21P")]
    #[case("typealias A = Int", "Foo2.A", "s:a4Foo21A")]
    #[case("class C { func f() {} }", "Foo2.C.f", "s:FC4Foo21C1fFT_T_")]
    #[case("class C { var count: Int = 0 }", "Foo2.C.count", "s:vC4Foo21C5countSi")]
    #[case("class C { init() {} }", "Foo2.C.init", "s:FC4Foo21CcFT_C4Foo21C")]
    #[case("class C { subscript(i: Int) -> String { \"\" } }", "Foo2.C.subscript", "s:iC4Foo21C9subscriptFTSi_SS")]
    #[case("func g(_ v: Int, times: Int) -> [String] {}", "Foo2.g", "s:F4Foo21gFTSi5timesSi_SaSS")]
    #[case("var m: [String: Int?]", "Foo2.m", "s:v4Foo21mVSs10DictionarySSSqSi_")]
    #[case("func id<T>(x: T) -> T {}", "Foo2.id", "s:F4Foo22idFT1xQ0__Q0_")]
    fn test_usr_forms(#[case] source: &str, #[case] qualified: &str, #[case] expected: &str) {
        let index = index_for("Foo2", source, None);
        assert_eq!(usr(&index, qualified), expected);
    }

    #[test]
    fn test_overlay_symbols_keep_their_module() {
        let index = index_for(
            "Foo2",
            "import Foo\nclass Derived: FooBase {}",
            Some(("Foo", "public class FooBase {}")),
        );
        let derived = index.lookup_qualified("Foo2.Derived").unwrap();
        let base = derived.inherited[0].resolved_symbol().unwrap();
        assert_eq!(index.get(base).usr.as_ref(), "s:C3Foo7FooBase");
    }

    #[test]
    fn test_extension_usrs() {
        let index = index_for("App", "struct S {}\nextension S {}\nextension S { func f() {} }", None);
        let s = index.lookup_qualified("App.S").unwrap();
        let usrs: Vec<&str> = index
            .extensions_of(s.id)
            .iter()
            .map(|e| index.get(*e).usr.as_ref())
            .collect();
        assert_eq!(usrs, vec!["s:e:V3App1S", "s:e:V3App1S#2"]);
        // Members of an extension are mangled in the extended type's context
        assert_eq!(usr(&index, "App.S.f"), "s:FV3App1S1fFT_T_");
    }

    #[test]
    fn test_unresolved_usrs() {
        let index = index_for("App", "extension ET { func foo() {} }", None);
        let ext = index.lookup_qualified("App.ET").unwrap();
        assert_eq!(ext.usr.as_ref(), "s:e:U3App2ET");
        assert_eq!(usr(&index, "App.ET.foo"), "s:FU3App2ET3fooFT_T_");
    }
}
