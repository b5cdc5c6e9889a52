//! Rendering a module's declarations as interface text.
//!
//! Every non-whitespace byte written is attributed to the declaration being
//! printed, and every token that names a symbol is recorded as an
//! occurrence, so the resulting document can be queried by position.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::document::{DeclSpan, InterfaceDocument, Occurrence, OccurrenceRole};
use super::{InterfaceError, PrintOptions};
use crate::hir::{
    Access, HirSymbol, Modifier, ParamInfo, SymbolId, SymbolIndex, SymbolKind, SymbolOrigin,
    TupleElement, TypeRepr,
};
use crate::parser::Failability;

/// Render the interface of `module`.
///
/// The output lists the module's imports, its file-scope declarations in
/// source order, then any extensions imported modules declare on its types.
pub fn generate_interface(
    index: &SymbolIndex,
    module: &str,
    options: &PrintOptions,
) -> InterfaceDocument {
    let mut printer = InterfacePrinter::new(index, options);
    printer.print_module(module);
    let document = printer.finish(module);
    tracing::debug!(
        module,
        bytes = document.text().len(),
        spans = document.decl_spans().len(),
        diagnostics = document.diagnostics().len(),
        "generated interface"
    );
    document
}

/// The header of one declaration as it would be printed, without its body.
pub fn declaration_text(index: &SymbolIndex, id: SymbolId, options: &PrintOptions) -> String {
    let mut printer = InterfacePrinter::new(index, options);
    printer.owners.push(id);
    printer.print_header(index.get(id));
    printer.out
}

struct InterfacePrinter<'a> {
    index: &'a SymbolIndex,
    options: &'a PrintOptions,
    out: String,
    /// Declarations being printed, innermost last
    owners: Vec<SymbolId>,
    decl_spans: Vec<DeclSpan>,
    occurrences: Vec<Occurrence>,
    diagnostics: Vec<InterfaceError>,
    level: usize,
}

impl<'a> InterfacePrinter<'a> {
    fn new(index: &'a SymbolIndex, options: &'a PrintOptions) -> Self {
        Self {
            index,
            options,
            out: String::new(),
            owners: Vec::new(),
            decl_spans: Vec::new(),
            occurrences: Vec::new(),
            diagnostics: Vec::new(),
            level: 0,
        }
    }

    fn finish(self, module: &str) -> InterfaceDocument {
        InterfaceDocument::new(
            SmolStr::new(module),
            self.out,
            self.decl_spans,
            self.occurrences,
            self.diagnostics,
        )
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    fn offset(&self) -> TextSize {
        TextSize::of(self.out.as_str())
    }

    /// Append text owned by the current declaration.
    ///
    /// Consecutive writes on one line for the same owner share a span.
    fn write(&mut self, text: &str) {
        let start = self.out.len();
        self.out.push_str(text);
        let Some(&owner) = self.owners.last() else {
            return;
        };
        let content_start = start + (text.len() - text.trim_start().len());
        let content_end = start + text.trim_end().len();
        if content_start >= content_end {
            return;
        }
        let range = TextRange::new(
            TextSize::new(content_start as u32),
            TextSize::new(content_end as u32),
        );
        if let Some(last) = self.decl_spans.last_mut() {
            let gap = &self.out[usize::from(last.range.end())..content_start];
            if last.symbol == owner && !gap.contains('\n') {
                last.range = last.range.cover(range);
                return;
            }
        }
        self.decl_spans.push(DeclSpan {
            range,
            symbol: owner,
        });
    }

    /// Append a token naming `symbol`.
    fn write_name(&mut self, text: &str, symbol: SymbolId, role: OccurrenceRole) {
        let start = self.offset();
        self.write(text);
        self.occurrences.push(Occurrence {
            range: TextRange::at(start, TextSize::of(text)),
            symbol,
            role,
        });
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn indent(&mut self) {
        let indent = self.options.indent(self.level);
        self.out.push_str(&indent);
    }

    fn record_unresolved(&mut self, name: &str, range: TextRange) {
        let context = self
            .owners
            .last()
            .map(|id| self.index.get(*id).qualified_name.clone())
            .unwrap_or_else(|| std::sync::Arc::from(""));
        tracing::debug!(name, context = %context, "printing unresolved symbol");
        self.diagnostics.push(InterfaceError::UnresolvedSymbol {
            name: SmolStr::new(name),
            context,
            range,
        });
    }

    // ========================================================================
    // MODULE
    // ========================================================================

    fn print_module(&mut self, module: &str) {
        let imports = self.print_imports(module);

        let decls: Vec<SymbolId> = self
            .index
            .module_top_level(module)
            .iter()
            .copied()
            .filter(|id| self.is_visible(self.index.get(*id)))
            .collect();
        let mut first = imports == 0;
        for id in decls.into_iter().chain(self.overlay_extensions(module)) {
            if !first {
                self.newline();
            }
            first = false;
            self.print_decl(id);
        }
    }

    /// `import` lines of the module's files, deduplicated, in source order.
    fn print_imports(&mut self, module: &str) -> usize {
        let Some(info) = self.index.module(module) else {
            return 0;
        };
        let mut seen: Vec<SmolStr> = Vec::new();
        for file in &info.files {
            for import in self.index.file_imports(*file) {
                if !seen.contains(&import.module) {
                    seen.push(import.module.clone());
                }
            }
        }
        let mut printed = 0;
        for name in seen {
            let Some(imported) = self.index.module(&name) else {
                tracing::debug!(module = %name, "import of unknown module not printed");
                continue;
            };
            self.owners.push(imported.symbol);
            self.write("import ");
            self.write_name(&name, imported.symbol, OccurrenceRole::Ref);
            self.newline();
            self.owners.pop();
            printed += 1;
        }
        printed
    }

    /// Extensions declared by imported modules on types of `module`.
    fn overlay_extensions(&self, module: &str) -> Vec<SymbolId> {
        if !self.options.print_overlay_extensions {
            return Vec::new();
        }
        self.index
            .modules()
            .filter(|info| matches!(info.origin, SymbolOrigin::Overlay { .. }))
            .flat_map(|info| self.index.module_top_level(&info.name).iter().copied())
            .filter(|id| {
                let symbol = self.index.get(*id);
                symbol.kind == SymbolKind::Extension
                    && self.is_visible(symbol)
                    && symbol
                        .extends
                        .is_some_and(|target| self.index.get(target).module == module)
            })
            .collect()
    }

    fn is_visible(&self, symbol: &HirSymbol) -> bool {
        if symbol.access < self.options.access_filter {
            return false;
        }
        match symbol.kind {
            SymbolKind::Module | SymbolKind::GenericParam | SymbolKind::Unresolved => false,
            _ => self.options.print_synthesized || symbol.origin != SymbolOrigin::Synthesized,
        }
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    fn print_decl(&mut self, id: SymbolId) {
        let symbol = self.index.get(id);
        self.owners.push(id);

        if self.options.print_doc_comments {
            if let Some(doc) = symbol.doc.clone() {
                for line in doc.lines() {
                    self.indent();
                    if line.is_empty() {
                        self.write("///");
                    } else {
                        self.write(&format!("/// {line}"));
                    }
                    self.newline();
                }
            }
        }

        self.indent();
        self.print_header(symbol);
        if symbol.kind.is_nominal() || symbol.kind == SymbolKind::Extension {
            self.print_body(symbol);
        }
        self.newline();
        self.owners.pop();
    }

    fn print_body(&mut self, symbol: &HirSymbol) {
        self.write(" {");
        self.newline();
        self.level += 1;
        let members: Vec<SymbolId> = symbol
            .members
            .iter()
            .copied()
            .filter(|m| self.is_visible(self.index.get(*m)))
            .collect();
        for member in members {
            self.newline();
            self.print_decl(member);
        }
        self.level -= 1;
        self.indent();
        self.write("}");
    }

    fn print_header(&mut self, symbol: &HirSymbol) {
        match symbol.kind {
            SymbolKind::Class | SymbolKind::Struct | SymbolKind::Enum | SymbolKind::Protocol => {
                self.print_prefix(symbol);
                self.write(match symbol.kind {
                    SymbolKind::Class => "class ",
                    SymbolKind::Struct => "struct ",
                    SymbolKind::Enum => "enum ",
                    _ => "protocol ",
                });
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                self.print_generic_params(symbol);
                self.print_inheritance(symbol);
            }
            SymbolKind::Extension => {
                self.print_prefix(symbol);
                self.write("extension ");
                match &symbol.ty {
                    Some(ty) => self.print_type(ty),
                    None => self.write(&symbol.name),
                }
                self.print_inheritance(symbol);
            }
            SymbolKind::TypeAlias => {
                self.print_prefix(symbol);
                self.write("typealias ");
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                self.print_generic_params(symbol);
                self.write(" = ");
                self.print_opt_type(symbol.ty.as_ref());
            }
            SymbolKind::AssociatedType => {
                self.print_prefix(symbol);
                self.write("associatedtype ");
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                self.print_inheritance(symbol);
                if let Some(default) = &symbol.ty {
                    self.write(" = ");
                    self.print_type(default);
                }
            }
            SymbolKind::Function
            | SymbolKind::Method
            | SymbolKind::StaticMethod
            | SymbolKind::ClassMethod => {
                self.print_prefix(symbol);
                self.write("func ");
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                self.print_generic_params(symbol);
                self.print_signature(symbol);
            }
            SymbolKind::Initializer => {
                self.print_prefix(symbol);
                self.write_name("init", symbol.id, OccurrenceRole::Decl);
                match symbol.signature.as_ref().and_then(|s| s.failability) {
                    Some(Failability::Optional) => self.write("?"),
                    Some(Failability::ImplicitlyUnwrapped) => self.write("!"),
                    None => {}
                }
                self.print_generic_params(symbol);
                self.print_signature(symbol);
            }
            SymbolKind::Deinitializer => {
                self.print_prefix(symbol);
                self.write_name("deinit", symbol.id, OccurrenceRole::Decl);
            }
            SymbolKind::Subscript => {
                self.print_prefix(symbol);
                self.write_name("subscript", symbol.id, OccurrenceRole::Decl);
                self.print_generic_params(symbol);
                self.print_signature(symbol);
                self.print_accessors(symbol);
            }
            SymbolKind::Variable
            | SymbolKind::Property
            | SymbolKind::StaticProperty
            | SymbolKind::ClassProperty => {
                self.print_prefix(symbol);
                let is_let = symbol.storage.is_some_and(|s| s.is_let);
                self.write(if is_let { "let " } else { "var " });
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                self.write(": ");
                self.print_opt_type(symbol.ty.as_ref());
                self.print_accessors(symbol);
            }
            SymbolKind::EnumCase => {
                self.print_prefix(symbol);
                self.write("case ");
                self.write_name(&symbol.name, symbol.id, OccurrenceRole::Decl);
                if let Some(payload) = &symbol.ty {
                    self.print_type(payload);
                }
            }
            SymbolKind::Module | SymbolKind::GenericParam | SymbolKind::Unresolved => {
                self.write(&symbol.name);
            }
        }
    }

    /// Attributes, `override`, access, then the remaining modifiers.
    fn print_prefix(&mut self, symbol: &HirSymbol) {
        for attribute in &symbol.attributes {
            self.write(attribute);
            self.write(" ");
        }
        if symbol.has_modifier(Modifier::Override) {
            self.write("override ");
        }
        if self.prints_access(symbol) {
            self.write(symbol.access.keyword());
            self.write(" ");
        }
        for modifier in &symbol.modifiers {
            if *modifier != Modifier::Override {
                self.write(modifier.keyword());
                self.write(" ");
            }
        }
    }

    fn prints_access(&self, symbol: &HirSymbol) -> bool {
        if !matches!(symbol.access, Access::Public | Access::Open) {
            return false;
        }
        if symbol.kind == SymbolKind::EnumCase {
            return false;
        }
        // Requirements take the protocol's access
        let in_protocol = symbol
            .parent
            .is_some_and(|p| self.index.get(p).kind == SymbolKind::Protocol);
        !in_protocol
    }

    fn print_generic_params(&mut self, symbol: &HirSymbol) {
        if symbol.generic_params.is_empty() {
            return;
        }
        self.write("<");
        for (i, param) in symbol.generic_params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let param = self.index.get(*param);
            self.write_name(&param.name, param.id, OccurrenceRole::Decl);
            if let Some(constraint) = param.inherited.first() {
                self.write(": ");
                self.print_type(constraint);
            }
        }
        self.write(">");
    }

    fn print_inheritance(&mut self, symbol: &HirSymbol) {
        if symbol.inherited.is_empty() && !symbol.class_constraint {
            return;
        }
        self.write(" : ");
        let mut first = true;
        if symbol.class_constraint {
            self.write("class");
            first = false;
        }
        for ty in &symbol.inherited {
            if !first {
                self.write(", ");
            }
            first = false;
            self.print_type(ty);
        }
    }

    fn print_signature(&mut self, symbol: &HirSymbol) {
        let Some(sig) = symbol.signature.as_ref() else {
            return;
        };
        self.write("(");
        for (i, param) in sig.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_param(param);
        }
        self.write(")");
        if sig.throws {
            self.write(" throws");
        } else if sig.rethrows {
            self.write(" rethrows");
        }
        if let Some(result) = &sig.result {
            self.write(" -> ");
            self.print_type(result);
        }
    }

    fn print_param(&mut self, param: &ParamInfo) {
        match &param.second_name {
            Some(second) => self.write(&format!("{} {second}: ", param.first_name)),
            None => self.write(&format!("{}: ", param.first_name)),
        }
        if param.is_inout {
            self.write("inout ");
        }
        self.print_type(&param.ty);
        if param.is_variadic {
            self.write("...");
        }
        if param.has_default {
            self.write(" = default");
        }
    }

    /// `{ get }` / `{ get set }` for computed values, read-only subscripts and
    /// stored properties whose setter is hidden.
    fn print_accessors(&mut self, symbol: &HirSymbol) {
        let Some(storage) = symbol.storage else {
            return;
        };
        if storage.is_let {
            return;
        }
        let setter_hidden = symbol
            .setter_access
            .is_some_and(|access| access < self.options.access_filter.max(Access::Internal));
        if storage.is_computed {
            if storage.is_settable && !setter_hidden {
                self.write(" { get set }");
            } else {
                self.write(" { get }");
            }
        } else if setter_hidden {
            self.write(" { get }");
        }
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    fn print_opt_type(&mut self, ty: Option<&TypeRepr>) {
        match ty {
            Some(ty) => self.print_type(ty),
            None => self.print_type(&TypeRepr::Error),
        }
    }

    /// Print a type, recording an occurrence for every named segment.
    ///
    /// The text matches `TypeRepr`'s `Display` output.
    fn print_type(&mut self, ty: &TypeRepr) {
        match ty {
            TypeRepr::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        self.write(".");
                    }
                    match segment.resolved {
                        Some(id) => {
                            let start = self.offset();
                            self.write_name(&segment.name, id, OccurrenceRole::Ref);
                            if self.index.get(id).kind == SymbolKind::Unresolved {
                                let range = TextRange::at(start, TextSize::of(segment.name.as_str()));
                                self.record_unresolved(&segment.name, range);
                            }
                        }
                        None => self.write(&segment.name),
                    }
                    if !segment.generic_args.is_empty() {
                        self.write("<");
                        self.print_type_list(&segment.generic_args, ", ");
                        self.write(">");
                    }
                }
            }
            TypeRepr::Array(inner) => {
                self.write("[");
                self.print_type(inner);
                self.write("]");
            }
            TypeRepr::Dictionary(key, value) => {
                self.write("[");
                self.print_type(key);
                self.write(": ");
                self.print_type(value);
                self.write("]");
            }
            TypeRepr::Optional(inner) => {
                self.print_wrapped(inner);
                self.write("?");
            }
            TypeRepr::ImplicitlyUnwrapped(inner) => {
                self.print_wrapped(inner);
                self.write("!");
            }
            TypeRepr::Tuple(elements) => {
                self.write("(");
                self.print_elements(elements);
                self.write(")");
            }
            TypeRepr::Function {
                params,
                throws,
                result,
            } => {
                self.write("(");
                self.print_elements(params);
                self.write(")");
                if *throws {
                    self.write(" throws");
                }
                self.write(" -> ");
                self.print_type(result);
            }
            TypeRepr::Composition(types) => self.print_type_list(types, " & "),
            TypeRepr::Error => {
                let text = TypeRepr::Error.to_string();
                let range = TextRange::at(self.offset(), TextSize::of(text.as_str()));
                self.write(&text);
                self.record_unresolved(&text, range);
            }
        }
    }

    fn print_wrapped(&mut self, inner: &TypeRepr) {
        if matches!(inner, TypeRepr::Function { .. } | TypeRepr::Composition(_)) {
            self.write("(");
            self.print_type(inner);
            self.write(")");
        } else {
            self.print_type(inner);
        }
    }

    fn print_type_list(&mut self, types: &[TypeRepr], separator: &str) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.print_type(ty);
        }
    }

    fn print_elements(&mut self, elements: &[TupleElement]) {
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(label) = &element.label {
                self.write(&format!("{label}: "));
            }
            if element.is_inout {
                self.write("inout ");
            }
            self.print_type(&element.ty);
            if element.is_variadic {
                self.write("...");
            }
        }
    }
}
