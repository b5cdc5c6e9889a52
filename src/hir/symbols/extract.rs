//! AST → symbol extraction.
//!
//! Walks the typed AST of one file and produces `HirSymbol`s with file-local
//! ids. Types are lowered to `TypeRepr` but left unresolved; module, origin
//! and USR are filled in when the file is added to a `SymbolIndex`.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::parser::{
    AccessorBlock, AccessorKind, AstNode, Decl, ExtensionDecl, FuncDecl, GenericParamList,
    InheritanceClause, LiteralKind, ParamList, PatternBinding, SourceFile, SubscriptDecl, SyntaxKind,
    TupleType, Type, TypeDecl, TypeDeclKind, VarDecl,
};

use super::context::ExtractionContext;
use super::types::{
    Access, ExtractionResult, HirSymbol, ImportInfo, Modifier, ParamInfo, PathSegment, Signature,
    Storage, SymbolId, SymbolKind, TupleElement, TypeRepr,
};

/// Extract every declaration of a parsed file.
pub fn extract_symbols(source: &SourceFile) -> ExtractionResult {
    let mut ctx = ExtractionContext::default();
    for decl in source.decls() {
        extract_decl(&mut ctx, &decl);
    }
    ctx.finish()
}

fn extract_decl(ctx: &mut ExtractionContext, decl: &Decl) {
    match decl {
        Decl::Import(import) => {
            if ctx.current().is_some() {
                return;
            }
            let Some(path) = import.path() else {
                return;
            };
            if let (Some(module), Some(range)) = (import.module_name(), path.module_range()) {
                ctx.add_import(ImportInfo {
                    module: SmolStr::new(module),
                    range,
                });
            }
        }
        Decl::Type(ty) => extract_type(ctx, decl, ty),
        Decl::Extension(ext) => extract_extension(ctx, decl, ext),
        Decl::TypeAlias(alias) => {
            let Some(name) = alias.name() else { return };
            let mut symbol = new_symbol(ctx, decl, name.text(), SymbolKind::TypeAlias);
            symbol.name_range = Some(name.range());
            symbol.ty = Some(lower_opt(alias.aliased_type()));
            let id = ctx.add(symbol);
            with_scope(ctx, id, |ctx| extract_generic_params(ctx, alias.generic_params()));
        }
        Decl::AssociatedType(assoc) => {
            let Some(name) = assoc.name() else { return };
            let mut symbol = new_symbol(ctx, decl, name.text(), SymbolKind::AssociatedType);
            symbol.name_range = Some(name.range());
            symbol.inherited = lower_inheritance(assoc.inheritance());
            symbol.ty = assoc.default_type().map(|t| lower_type(&t));
            ctx.add(symbol);
        }
        Decl::Func(func) => extract_func(ctx, decl, func),
        Decl::Init(init) => {
            let mut symbol = new_symbol(ctx, decl, "init", SymbolKind::Initializer);
            symbol.name_range = init.keyword_range();
            symbol.signature = Some(Signature {
                params: lower_params(init.param_list()),
                throws: init.is_throws(),
                failability: init.failability(),
                ..Signature::default()
            });
            let id = ctx.add(symbol);
            with_scope(ctx, id, |ctx| extract_generic_params(ctx, init.generic_params()));
        }
        Decl::Deinit(deinit) => {
            let mut symbol = new_symbol(ctx, decl, "deinit", SymbolKind::Deinitializer);
            symbol.name_range = deinit.keyword_range();
            symbol.signature = Some(Signature::default());
            ctx.add(symbol);
        }
        Decl::Subscript(subscript) => extract_subscript(ctx, decl, subscript),
        Decl::Var(var) => extract_var(ctx, decl, var),
        Decl::EnumCase(case) => {
            for element in case.elements() {
                let Some(name) = element.name() else { continue };
                let mut symbol = new_symbol(ctx, decl, name.text(), SymbolKind::EnumCase);
                symbol.name_range = Some(name.range());
                // Cases are as visible as their enum
                symbol.access = ctx.current().map(|e| e.access).unwrap_or_default();
                symbol.ty = element
                    .payload()
                    .map(|payload| TypeRepr::Tuple(lower_tuple_elements(&payload)));
                ctx.add(symbol);
            }
        }
    }
}

fn extract_type(ctx: &mut ExtractionContext, decl: &Decl, ty: &TypeDecl) {
    let Some(name) = ty.name() else { return };
    let kind = match ty.kind() {
        TypeDeclKind::Class => SymbolKind::Class,
        TypeDeclKind::Struct => SymbolKind::Struct,
        TypeDeclKind::Enum => SymbolKind::Enum,
        TypeDeclKind::Protocol => SymbolKind::Protocol,
    };
    let mut symbol = new_symbol(ctx, decl, name.text(), kind);
    symbol.name_range = Some(name.range());
    symbol.inherited = lower_inheritance(ty.inheritance());
    symbol.class_constraint = ty
        .inheritance()
        .is_some_and(|clause| clause.has_class_constraint());
    let id = ctx.add(symbol);
    with_scope(ctx, id, |ctx| {
        extract_generic_params(ctx, ty.generic_params());
        for member in ty.members() {
            extract_decl(ctx, &member);
        }
    });
}

fn extract_extension(ctx: &mut ExtractionContext, decl: &Decl, ext: &ExtensionDecl) {
    let Some(extended) = ext.extended_type() else {
        return;
    };
    let extended = lower_type(&extended);
    let mut symbol = new_symbol(ctx, decl, extended.to_string(), SymbolKind::Extension);
    if let TypeRepr::Path(segments) = &extended {
        symbol.name_range = segments.last().and_then(|s| s.range);
    }
    symbol.ty = Some(extended);
    symbol.inherited = lower_inheritance(ext.inheritance());
    let id = ctx.add(symbol);
    with_scope(ctx, id, |ctx| {
        for member in ext.members() {
            extract_decl(ctx, &member);
        }
    });
}

fn extract_func(ctx: &mut ExtractionContext, decl: &Decl, func: &FuncDecl) {
    let Some(name) = func.name() else { return };
    let modifiers = decl.modifiers();
    let kind = if ctx.current().is_none() {
        SymbolKind::Function
    } else if modifiers.has(SyntaxKind::STATIC_KW) {
        SymbolKind::StaticMethod
    } else if modifiers.has(SyntaxKind::CLASS_KW) {
        SymbolKind::ClassMethod
    } else {
        SymbolKind::Method
    };
    let mut symbol = new_symbol(ctx, decl, name.text(), kind);
    symbol.name_range = Some(name.range());
    symbol.signature = Some(Signature {
        params: lower_params(func.param_list()),
        throws: func.is_throws(),
        rethrows: func.is_rethrows(),
        result: func.result_type().map(|t| lower_type(&t)),
        failability: None,
    });
    let id = ctx.add(symbol);
    with_scope(ctx, id, |ctx| extract_generic_params(ctx, func.generic_params()));
}

fn extract_subscript(ctx: &mut ExtractionContext, decl: &Decl, subscript: &SubscriptDecl) {
    let mut symbol = new_symbol(ctx, decl, "subscript", SymbolKind::Subscript);
    symbol.name_range = subscript.keyword_range();
    symbol.signature = Some(Signature {
        params: lower_params(subscript.param_list()),
        result: Some(lower_opt(subscript.result_type())),
        ..Signature::default()
    });
    symbol.storage = Some(storage_for(false, subscript.accessor_block().as_ref()));
    let id = ctx.add(symbol);
    with_scope(ctx, id, |ctx| extract_generic_params(ctx, subscript.generic_params()));
}

fn extract_var(ctx: &mut ExtractionContext, decl: &Decl, var: &VarDecl) {
    let modifiers = decl.modifiers();
    let kind = if ctx.current().is_none() {
        SymbolKind::Variable
    } else if modifiers.has(SyntaxKind::STATIC_KW) {
        SymbolKind::StaticProperty
    } else if modifiers.has(SyntaxKind::CLASS_KW) {
        SymbolKind::ClassProperty
    } else {
        SymbolKind::Property
    };
    let is_let = var.is_let();
    for binding in var.bindings() {
        let Some(name) = binding.name() else { continue };
        let mut symbol = new_symbol(ctx, decl, name.text(), kind);
        symbol.name_range = Some(name.range());
        let mut storage = storage_for(is_let, binding.accessor_block().as_ref());
        symbol.ty = Some(match binding.ty() {
            Some(ty) => lower_type(&ty),
            None => {
                storage.type_inferred = true;
                infer_binding_type(&binding)
            }
        });
        symbol.storage = Some(storage);
        ctx.add(symbol);
    }
}

fn extract_generic_params(ctx: &mut ExtractionContext, list: Option<GenericParamList>) {
    let Some(list) = list else { return };
    for param in list.params() {
        let Some(name) = param.name() else { continue };
        let mut symbol = HirSymbol::new(SymbolId(0), name.text(), SymbolKind::GenericParam);
        symbol.name_range = Some(name.range());
        symbol.decl_range = Some(param.syntax().text_range());
        symbol.inherited = param.constraint().map(|c| lower_type(&c)).into_iter().collect();
        ctx.add_generic_param(symbol);
    }
}

fn with_scope(ctx: &mut ExtractionContext, id: SymbolId, f: impl FnOnce(&mut ExtractionContext)) {
    ctx.push_scope(id);
    f(ctx);
    ctx.pop_scope();
}

/// A symbol with the parts every declaration shares: attributes, modifiers,
/// access, doc comment and declaration range.
fn new_symbol(
    ctx: &ExtractionContext,
    decl: &Decl,
    name: impl Into<SmolStr>,
    kind: SymbolKind,
) -> HirSymbol {
    let mut symbol = HirSymbol::new(SymbolId(0), name, kind);
    let modifiers = decl.modifiers();
    match modifiers.access.and_then(Access::from_keyword) {
        Some(access) => {
            symbol.access = access;
            symbol.explicit_access = true;
        }
        None => symbol.access = ctx.default_access(),
    }
    symbol.setter_access = modifiers.setter_access.and_then(Access::from_keyword);
    symbol.modifiers = modifiers
        .modifiers
        .iter()
        .filter_map(|k| Modifier::from_keyword(*k))
        .collect();
    symbol.modifiers.sort();
    symbol.modifiers.dedup();
    symbol.attributes = decl
        .attributes()
        .iter()
        .map(|a| SmolStr::new(a.text().trim()))
        .collect();
    symbol.doc = decl.doc_comment().map(Arc::from);
    symbol.decl_range = Some(decl.syntax().text_range());
    symbol
}

fn storage_for(is_let: bool, block: Option<&AccessorBlock>) -> Storage {
    let mut storage = Storage {
        is_let,
        ..Storage::default()
    };
    match block {
        None => storage.is_settable = !is_let,
        Some(block) if block.is_implicit_getter() => storage.is_computed = true,
        Some(block) if block.has(AccessorKind::Get) || block.has(AccessorKind::Set) => {
            storage.is_computed = true;
            storage.is_settable = block.has(AccessorKind::Set);
        }
        // Observers only
        Some(_) => storage.is_settable = !is_let,
    }
    storage
}

/// Type of an unannotated binding, from its initializer.
///
/// Literals map to the standard library types; `Name(...)`, `A.B(...)` and
/// `Name<T>(...)` calls produce the callee path, which resolution accepts only
/// if it names a type.
fn infer_binding_type(binding: &PatternBinding) -> TypeRepr {
    let Some(expr) = binding.initializer_expr() else {
        return TypeRepr::Error;
    };
    let literal = match expr.literal_kind() {
        Some(LiteralKind::Integer) => Some("Int"),
        Some(LiteralKind::Float) => Some("Double"),
        Some(LiteralKind::String) => Some("String"),
        Some(LiteralKind::Boolean) => Some("Bool"),
        Some(LiteralKind::Nil) => return TypeRepr::Error,
        None => None,
    };
    if let Some(name) = literal {
        return TypeRepr::named(name);
    }
    match expr.call_path() {
        Some(callee) => lower_type(&Type::Path(callee)),
        None => TypeRepr::Error,
    }
}

// ============================================================================
// TYPE LOWERING
// ============================================================================

fn lower_opt(ty: Option<Type>) -> TypeRepr {
    ty.map(|t| lower_type(&t)).unwrap_or(TypeRepr::Error)
}

fn lower_inheritance(clause: Option<InheritanceClause>) -> Vec<TypeRepr> {
    clause
        .map(|c| c.types().map(|t| lower_type(&t)).collect())
        .unwrap_or_default()
}

/// Lower a syntactic type to its semantic representation.
fn lower_type(ty: &Type) -> TypeRepr {
    match ty {
        Type::Path(path) => TypeRepr::Path(
            path.segments()
                .map(|segment| PathSegment {
                    name: SmolStr::new(segment.name()),
                    range: Some(segment.name_range()),
                    generic_args: segment.generic_args().iter().map(lower_type).collect(),
                    resolved: None,
                })
                .collect(),
        ),
        Type::Array(array) => TypeRepr::Array(Box::new(lower_opt(array.element()))),
        Type::Dictionary(dict) => TypeRepr::Dictionary(
            Box::new(lower_opt(dict.key())),
            Box::new(lower_opt(dict.value())),
        ),
        Type::Optional(opt) => TypeRepr::Optional(Box::new(lower_opt(opt.wrapped()))),
        Type::ImplicitlyUnwrapped(iuo) => {
            TypeRepr::ImplicitlyUnwrapped(Box::new(lower_opt(iuo.wrapped())))
        }
        Type::Tuple(tuple) => {
            let mut elements = lower_tuple_elements(tuple);
            // `(T)` is just a parenthesized `T`
            let parenthesized = matches!(
                elements.as_slice(),
                [e] if e.label.is_none() && !e.is_variadic && !e.is_inout
            );
            if parenthesized {
                elements.remove(0).ty
            } else {
                TypeRepr::Tuple(elements)
            }
        }
        Type::Function(func) => TypeRepr::Function {
            params: func
                .params()
                .map(|p| lower_tuple_elements(&p))
                .unwrap_or_default(),
            throws: func.is_throws(),
            result: Box::new(lower_opt(func.result())),
        },
        Type::Composition(comp) => TypeRepr::Composition(comp.types().map(|t| lower_type(&t)).collect()),
    }
}

fn lower_tuple_elements(tuple: &TupleType) -> Vec<TupleElement> {
    tuple
        .elements()
        .map(|element| TupleElement {
            label: element.label().map(SmolStr::new),
            ty: lower_opt(element.ty()),
            is_inout: element.is_inout(),
            is_variadic: element.is_variadic(),
        })
        .collect()
}

fn lower_params(list: Option<ParamList>) -> Vec<ParamInfo> {
    let Some(list) = list else {
        return Vec::new();
    };
    list.params()
        .map(|param| ParamInfo {
            first_name: param
                .first_name()
                .map(|n| SmolStr::new(n.text()))
                .unwrap_or_else(|| SmolStr::new_static("_")),
            second_name: param.second_name().map(|n| SmolStr::new(n.text())),
            ty: lower_opt(param.ty()),
            has_default: param.default_arg().is_some(),
            is_inout: param.is_inout(),
            is_variadic: param.is_variadic(),
        })
        .collect()
}
