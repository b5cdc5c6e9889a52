//! Extraction context — tracks the scope stack and collected symbols.

use std::sync::Arc;

use super::types::{
    Access, ExtractionResult, HirSymbol, ImportInfo, SymbolId, SymbolKind,
};

/// Extraction state passed through all extraction functions.
#[derive(Default)]
pub(super) struct ExtractionContext {
    symbols: Vec<HirSymbol>,
    imports: Vec<ImportInfo>,
    top_level: Vec<SymbolId>,
    /// Dotted prefix for qualified names of the current scope
    prefix: String,
    /// Stack of enclosing declarations, paired with the prefix length to restore
    scope_stack: Vec<(SymbolId, usize)>,
}

impl ExtractionContext {
    pub fn qualified_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    /// The innermost enclosing declaration
    pub fn current(&self) -> Option<&HirSymbol> {
        self.scope_stack
            .last()
            .map(|(id, _)| &self.symbols[id.index()])
    }

    /// Access a member gets when none is written
    pub fn default_access(&self) -> Access {
        match self.current() {
            Some(parent) if parent.kind == SymbolKind::Protocol => parent.access,
            Some(parent) if parent.kind == SymbolKind::Extension && parent.explicit_access => {
                parent.access
            }
            _ => Access::Internal,
        }
    }

    /// Add a declaration to the current scope
    pub fn add(&mut self, symbol: HirSymbol) -> SymbolId {
        let id = self.push_symbol(symbol);
        match self.scope_stack.last() {
            Some((parent, _)) => self.symbols[parent.index()].members.push(id),
            None => self.top_level.push(id),
        }
        id
    }

    /// Add a generic parameter of the current scope
    pub fn add_generic_param(&mut self, symbol: HirSymbol) -> SymbolId {
        let id = self.push_symbol(symbol);
        if let Some((parent, _)) = self.scope_stack.last() {
            self.symbols[parent.index()].generic_params.push(id);
        }
        id
    }

    fn push_symbol(&mut self, mut symbol: HirSymbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.id = id;
        symbol.parent = self.scope_stack.last().map(|(parent, _)| *parent);
        symbol.qualified_name = Arc::from(self.qualified_name(&symbol.name));
        self.symbols.push(symbol);
        id
    }

    pub fn push_scope(&mut self, id: SymbolId) {
        let restore = self.prefix.len();
        self.prefix = self.symbols[id.index()].qualified_name.to_string();
        self.scope_stack.push((id, restore));
    }

    pub fn pop_scope(&mut self) {
        if let Some((_, restore)) = self.scope_stack.pop() {
            self.prefix.truncate(restore);
        }
    }

    pub fn add_import(&mut self, import: ImportInfo) {
        self.imports.push(import);
    }

    pub fn finish(self) -> ExtractionResult {
        ExtractionResult {
            symbols: self.symbols,
            imports: self.imports,
            top_level: self.top_level,
        }
    }
}
