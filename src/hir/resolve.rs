//! Name resolution — the symbol index and resolving type references.
//!
//! # Architecture
//!
//! 1. **Symbol Extraction** produces per-file symbols with unresolved `TypeRepr`s
//! 2. **Indexing** ([`SymbolIndex::add_file`]) rebases ids and records module membership
//! 3. **Resolution** ([`SymbolIndex::resolve_all`]) binds every type segment to a
//!    symbol, creating placeholders for names that do not resolve, then
//!    synthesizes implied members and assigns USRs
//!
//! Lookup order for a simple type name:
//!
//! 1. `Self` → the enclosing nominal type
//! 2. generic parameters and member types of each enclosing declaration
//!    (extensions see the members of the type they extend)
//! 3. top-level types of the current module
//! 4. top-level types of modules imported by the current file
//! 5. the standard library
//! 6. module names

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::mangle;
use super::symbols::{
    Access, ExtractionResult, HirSymbol, ImportInfo, ParamInfo, PathSegment, Signature, Storage,
    SymbolId, SymbolKind, SymbolOrigin, TupleElement, TypeRepr,
};
use crate::base::FileId;
use crate::parser::Failability;

/// Name of the built-in standard library module.
pub const STDLIB_MODULE: &str = "Swift";

/// Standard library types an enum may use as its raw type.
const RAW_VALUE_TYPES: &[&str] = &["Int", "Double", "Float", "String", "Character"];

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// A module known to the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: SmolStr,
    pub origin: SymbolOrigin,
    /// The `Module` symbol naming this module
    pub symbol: SymbolId,
    pub files: Vec<FileId>,
}

/// An index of all symbols across the loaded modules.
///
/// Symbols are stored in a single vector and referenced by `SymbolId` from
/// all other maps, so resolution can rewrite a symbol in place.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// The single source of truth for all symbols.
    symbols: Vec<HirSymbol>,
    /// Qualified name → first symbol with that name (extensions share names).
    by_qualified_name: IndexMap<Arc<str>, SymbolId>,
    by_simple_name: FxHashMap<SmolStr, Vec<SymbolId>>,
    by_file: FxHashMap<FileId, Vec<SymbolId>>,
    by_usr: FxHashMap<Arc<str>, SymbolId>,
    /// Module → file-scope declarations in load order.
    top_level: FxHashMap<SmolStr, Vec<SymbolId>>,
    file_imports: FxHashMap<FileId, Vec<ImportInfo>>,
    modules: IndexMap<SmolStr, ModuleInfo>,
    extensions_of: FxHashMap<SymbolId, Vec<SymbolId>>,
    /// (module, name) → placeholder for an unresolved reference.
    placeholders: FxHashMap<(SmolStr, SmolStr), SymbolId>,
    resolved: bool,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, returning its `Module` symbol.
    pub fn add_module(&mut self, name: &str, origin: SymbolOrigin) -> SymbolId {
        if let Some(info) = self.modules.get(name) {
            return info.symbol;
        }
        let id = SymbolId(self.symbols.len() as u32);
        let mut symbol = HirSymbol::new(id, name, SymbolKind::Module);
        symbol.module = SmolStr::new(name);
        symbol.origin = origin.clone();
        symbol.access = Access::Public;
        self.insert(symbol);
        self.modules.insert(
            SmolStr::new(name),
            ModuleInfo {
                name: SmolStr::new(name),
                origin,
                symbol: id,
                files: Vec::new(),
            },
        );
        id
    }

    /// Add the symbols extracted from one file of `module`.
    pub fn add_file(
        &mut self,
        file: FileId,
        module: &str,
        origin: SymbolOrigin,
        result: ExtractionResult,
    ) {
        debug_assert!(!self.by_file.contains_key(&file), "file added twice");
        self.add_module(module, origin.clone());
        if let Some(info) = self.modules.get_mut(module) {
            info.files.push(file);
        }

        let base = self.symbols.len() as u32;
        let module_name = SmolStr::new(module);
        for mut symbol in result.symbols {
            symbol.id = symbol.id.offset(base);
            symbol.parent = symbol.parent.map(|p| p.offset(base));
            symbol.members.iter_mut().for_each(|m| *m = m.offset(base));
            symbol.generic_params.iter_mut().for_each(|g| *g = g.offset(base));
            symbol.qualified_name = Arc::from(format!("{}.{}", module, symbol.qualified_name));
            symbol.module = module_name.clone();
            symbol.origin = origin.clone();
            symbol.file = Some(file);
            self.by_file.entry(file).or_default().push(symbol.id);
            self.insert(symbol);
        }
        self.top_level
            .entry(module_name)
            .or_default()
            .extend(result.top_level.iter().map(|id| id.offset(base)));
        self.file_imports.insert(file, result.imports);
        self.resolved = false;
    }

    fn insert(&mut self, symbol: HirSymbol) {
        let id = symbol.id;
        self.by_qualified_name
            .entry(symbol.qualified_name.clone())
            .or_insert(id);
        self.by_simple_name
            .entry(symbol.name.clone())
            .or_default()
            .push(id);
        self.symbols.push(symbol);
    }

    /// Get a symbol by id.
    ///
    /// Ids are only handed out by this index, so a foreign id is a bug.
    pub fn get(&self, id: SymbolId) -> &HirSymbol {
        &self.symbols[id.index()]
    }

    /// Look up a symbol by qualified name (`Module.Outer.Name`).
    pub fn lookup_qualified(&self, name: &str) -> Option<&HirSymbol> {
        self.by_qualified_name.get(name).map(|id| self.get(*id))
    }

    /// Look up all symbols with a simple name.
    pub fn lookup_simple(&self, name: &str) -> Vec<&HirSymbol> {
        self.by_simple_name
            .get(name)
            .map(|ids| ids.iter().map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Look up a symbol by USR. Only meaningful after [`SymbolIndex::resolve_all`].
    pub fn lookup_usr(&self, usr: &str) -> Option<&HirSymbol> {
        self.by_usr.get(usr).map(|id| self.get(*id))
    }

    /// Get all symbols in a file.
    pub fn symbols_in_file(&self, file: FileId) -> Vec<&HirSymbol> {
        self.by_file
            .get(&file)
            .map(|ids| ids.iter().map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Get all symbols in the index.
    pub fn all_symbols(&self) -> impl Iterator<Item = &HirSymbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn module(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    /// Modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values()
    }

    /// File-scope declarations of a module, in load order.
    pub fn module_top_level(&self, module: &str) -> &[SymbolId] {
        self.top_level.get(module).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `import` statements of a file.
    pub fn file_imports(&self, file: FileId) -> &[ImportInfo] {
        self.file_imports.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Extensions whose target resolved to `id`, in index order.
    pub fn extensions_of(&self, id: SymbolId) -> &[SymbolId] {
        self.extensions_of.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Top-level types of `module` named `name`.
    fn top_level_types(&self, module: &str, name: &str) -> Vec<SymbolId> {
        self.by_simple_name
            .get(name)
            .into_iter()
            .flatten()
            .copied()
            .filter(|id| {
                let s = self.get(*id);
                s.parent.is_none()
                    && s.module == module
                    && s.kind.is_type()
                    && s.origin != SymbolOrigin::Unresolved
            })
            .collect()
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Resolve every type reference, synthesize implied members and assign USRs.
    ///
    /// Unresolved names never fail: each becomes a placeholder symbol with
    /// `SymbolOrigin::Unresolved`.
    pub fn resolve_all(&mut self) {
        self.resolve_extensions();
        let count = self.symbols.len();
        for i in 0..count {
            self.resolve_symbol_types(SymbolId(i as u32));
        }
        self.synthesize_raw_value_members();
        self.assign_usrs();
        self.resolved = true;
        tracing::debug!(
            symbols = self.symbols.len(),
            placeholders = self.placeholders.len(),
            "symbol index resolved"
        );
    }

    fn resolve_extensions(&mut self) {
        let extensions: Vec<SymbolId> = self
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Extension)
            .map(|s| s.id)
            .collect();
        // Counted per extended type across modules so every extension USR is unique
        let mut ordinals: FxHashMap<SymbolId, u32> = FxHashMap::default();

        for ext in extensions {
            let Some(mut extended) = self.symbols[ext.index()].ty.take() else {
                continue;
            };
            let ctx = LookupContext::for_symbol(self, ext).with_scope(self.get(ext).parent);
            self.resolve_repr(&mut extended, &ctx);
            let target = extended.resolved_symbol();
            self.symbols[ext.index()].ty = Some(extended);

            let Some(target) = target else { continue };
            let ordinal = ordinals.entry(target).or_insert(0);
            *ordinal += 1;
            let symbol = &mut self.symbols[ext.index()];
            symbol.extends = Some(target);
            symbol.ordinal = *ordinal;
            self.extensions_of.entry(target).or_default().push(ext);
        }
    }

    fn resolve_symbol_types(&mut self, id: SymbolId) {
        let symbol = &mut self.symbols[id.index()];
        let kind = symbol.kind;
        if matches!(kind, SymbolKind::Module | SymbolKind::Unresolved) {
            return;
        }
        let mut inherited = std::mem::take(&mut symbol.inherited);
        // The extended type was resolved up front
        let mut ty = if kind == SymbolKind::Extension {
            None
        } else {
            symbol.ty.take()
        };
        let mut signature = symbol.signature.take();
        let inferred = symbol.storage.is_some_and(|s| s.type_inferred);

        // Generic parameter constraints are written in the owner's scope
        let scope = if kind == SymbolKind::GenericParam {
            self.get(id).parent
        } else {
            Some(id)
        };
        let ctx = LookupContext::for_symbol(self, id).with_scope(scope);

        for repr in &mut inherited {
            self.resolve_repr(repr, &ctx);
        }
        if let Some(repr) = ty.as_mut() {
            if inferred {
                self.resolve_inferred(repr, &ctx);
            } else {
                self.resolve_repr(repr, &ctx);
            }
        }
        if let Some(sig) = signature.as_mut() {
            for param in &mut sig.params {
                self.resolve_repr(&mut param.ty, &ctx);
            }
            if let Some(result) = sig.result.as_mut() {
                self.resolve_repr(result, &ctx);
            }
        }

        let symbol = &mut self.symbols[id.index()];
        symbol.inherited = inherited;
        if kind != SymbolKind::Extension {
            symbol.ty = ty;
        }
        symbol.signature = signature;
    }

    fn resolve_repr(&mut self, repr: &mut TypeRepr, ctx: &LookupContext) {
        match repr {
            TypeRepr::Path(segments) => self.resolve_path(segments, ctx),
            TypeRepr::Array(inner)
            | TypeRepr::Optional(inner)
            | TypeRepr::ImplicitlyUnwrapped(inner) => self.resolve_repr(inner, ctx),
            TypeRepr::Dictionary(key, value) => {
                self.resolve_repr(key, ctx);
                self.resolve_repr(value, ctx);
            }
            TypeRepr::Tuple(elements) => {
                for element in elements {
                    self.resolve_repr(&mut element.ty, ctx);
                }
            }
            TypeRepr::Function { params, result, .. } => {
                for param in params {
                    self.resolve_repr(&mut param.ty, ctx);
                }
                self.resolve_repr(result, ctx);
            }
            TypeRepr::Composition(types) => {
                for ty in types {
                    self.resolve_repr(ty, ctx);
                }
            }
            TypeRepr::Error => {}
        }
    }

    fn resolve_path(&mut self, segments: &mut [PathSegment], ctx: &LookupContext) {
        for segment in segments.iter_mut() {
            for arg in &mut segment.generic_args {
                self.resolve_repr(arg, ctx);
            }
        }
        let mut owner: Option<SymbolId> = None;
        let mut failed = false;
        for segment in segments.iter_mut() {
            let found = if failed {
                None
            } else {
                let resolver = Resolver::with_context(self, ctx.clone());
                match owner {
                    None => resolver.resolve(&segment.name).symbol(),
                    Some(owner) => resolver.resolve_member(owner, &segment.name).symbol(),
                }
            };
            let id = match found {
                Some(id) => id,
                None => {
                    failed = true;
                    self.placeholder(&ctx.module, &segment.name)
                }
            };
            segment.resolved = Some(id);
            owner = Some(id);
        }
    }

    /// Inferred types must name a real type; anything else becomes an error type.
    fn resolve_inferred(&mut self, repr: &mut TypeRepr, ctx: &LookupContext) {
        let TypeRepr::Path(segments) = repr else {
            return;
        };
        let resolver = Resolver::with_context(self, ctx.clone());
        let mut owner: Option<SymbolId> = None;
        let mut resolved = Vec::with_capacity(segments.len());
        for segment in segments.iter() {
            let found = match owner {
                None => resolver.resolve(&segment.name).symbol(),
                Some(owner) => resolver.resolve_member(owner, &segment.name).symbol(),
            };
            match found {
                Some(id) => resolved.push(id),
                None => break,
            }
            owner = found;
        }
        let names_type = resolved.len() == segments.len()
            && resolved
                .last()
                .is_some_and(|id| self.get(*id).kind.is_type());
        if names_type {
            for (segment, id) in segments.iter_mut().zip(resolved) {
                segment.resolved = Some(id);
                for arg in &mut segment.generic_args {
                    self.resolve_repr(arg, ctx);
                }
            }
        } else {
            tracing::debug!(expr = %repr, "initializer does not name a type");
            *repr = TypeRepr::Error;
        }
    }

    /// The placeholder standing in for `name` in `module`, created on first use.
    fn placeholder(&mut self, module: &SmolStr, name: &str) -> SymbolId {
        let key = (module.clone(), SmolStr::new(name));
        if let Some(id) = self.placeholders.get(&key) {
            return *id;
        }
        tracing::warn!(name, module = %module, "unresolved type reference");
        let id = SymbolId(self.symbols.len() as u32);
        let mut symbol = HirSymbol::new(id, name, SymbolKind::Unresolved);
        symbol.module = module.clone();
        symbol.origin = SymbolOrigin::Unresolved;
        symbol.access = Access::Public;
        symbol.qualified_name = Arc::from(format!("{module}.{name}"));
        // Placeholders must not shadow real names in qualified lookups
        self.by_simple_name.entry(symbol.name.clone()).or_default().push(id);
        self.symbols.push(symbol);
        self.placeholders.insert(key, id);
        id
    }

    /// Enums with a raw type gain `init?(rawValue:)` and `rawValue`.
    fn synthesize_raw_value_members(&mut self) {
        let candidates: Vec<(SymbolId, TypeRepr)> = self
            .symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Enum && s.origin != SymbolOrigin::Stdlib)
            .filter_map(|s| {
                let raw = s.inherited.first()?;
                let target = self.get(raw.resolved_symbol()?);
                let is_raw = target.origin == SymbolOrigin::Stdlib
                    && RAW_VALUE_TYPES.contains(&target.name.as_str());
                is_raw.then(|| (s.id, raw.clone()))
            })
            .collect();

        for (enum_id, raw) in candidates {
            let (has_init, has_raw_value) = {
                let members = &self.get(enum_id).members;
                let has_init = members.iter().any(|m| {
                    let m = self.get(*m);
                    m.kind == SymbolKind::Initializer
                        && m.signature.as_ref().is_some_and(|sig| {
                            sig.params.len() == 1 && sig.params[0].first_name == "rawValue"
                        })
                });
                let has_raw_value = members.iter().any(|m| self.get(*m).name == "rawValue");
                (has_init, has_raw_value)
            };
            if !has_init {
                let mut init = self.synthesized_member(enum_id, "init", SymbolKind::Initializer);
                init.signature = Some(Signature {
                    params: vec![ParamInfo {
                        first_name: SmolStr::new_static("rawValue"),
                        second_name: None,
                        ty: raw.clone(),
                        has_default: false,
                        is_inout: false,
                        is_variadic: false,
                    }],
                    failability: Some(Failability::Optional),
                    ..Signature::default()
                });
                self.push_member(enum_id, init);
            }
            if !has_raw_value {
                let mut raw_value = self.synthesized_member(enum_id, "rawValue", SymbolKind::Property);
                raw_value.ty = Some(raw);
                raw_value.storage = Some(Storage {
                    is_computed: true,
                    ..Storage::default()
                });
                self.push_member(enum_id, raw_value);
            }
        }
    }

    fn synthesized_member(&self, parent: SymbolId, name: &str, kind: SymbolKind) -> HirSymbol {
        let owner = self.get(parent);
        let mut symbol = HirSymbol::new(SymbolId(self.symbols.len() as u32), name, kind);
        symbol.qualified_name = Arc::from(format!("{}.{}", owner.qualified_name, name));
        symbol.origin = SymbolOrigin::Synthesized;
        symbol.module = owner.module.clone();
        symbol.file = owner.file;
        symbol.parent = Some(parent);
        symbol.access = owner.access;
        symbol.explicit_access = owner.explicit_access;
        symbol
    }

    fn push_member(&mut self, parent: SymbolId, symbol: HirSymbol) {
        let id = symbol.id;
        self.insert(symbol);
        self.symbols[parent.index()].members.push(id);
    }

    fn assign_usrs(&mut self) {
        self.by_usr.clear();
        for i in 0..self.symbols.len() {
            let id = SymbolId(i as u32);
            let usr: Arc<str> = Arc::from(mangle::symbol_usr(self, id));
            self.by_usr.entry(usr.clone()).or_insert(id);
            self.symbols[i].usr = usr;
        }
    }
}

// ============================================================================
// RESOLVE RESULT
// ============================================================================

/// Result of resolving a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Successfully resolved to a single symbol.
    Found(SymbolId),
    /// Several imported modules declare the name; the first is used.
    Ambiguous(Vec<SymbolId>),
    /// Could not resolve the reference.
    NotFound,
}

impl ResolveResult {
    /// The symbol to bind: the match, or the first candidate when ambiguous.
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            ResolveResult::Found(id) => Some(*id),
            ResolveResult::Ambiguous(ids) => ids.first().copied(),
            ResolveResult::NotFound => None,
        }
    }

    /// Check if resolution was successful.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    /// Check if the reference was ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }

    fn from_candidates(mut candidates: Vec<SymbolId>) -> Self {
        candidates.dedup();
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates[0]),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Where a lookup happens: the innermost declaration plus its module and file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupContext {
    pub scope: Option<SymbolId>,
    pub module: SmolStr,
    pub file: Option<FileId>,
}

impl LookupContext {
    /// Lookups from inside `id`'s declaration
    pub fn for_symbol(index: &SymbolIndex, id: SymbolId) -> Self {
        let symbol = index.get(id);
        Self {
            scope: Some(id),
            module: symbol.module.clone(),
            file: symbol.file,
        }
    }

    /// Lookups at file scope of `module`
    pub fn in_module(module: &str, file: Option<FileId>) -> Self {
        Self {
            scope: None,
            module: SmolStr::new(module),
            file,
        }
    }

    pub fn with_scope(mut self, scope: Option<SymbolId>) -> Self {
        self.scope = scope;
        self
    }
}

/// Resolver for type-name lookups.
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    /// The symbol index to search.
    index: &'a SymbolIndex,
    ctx: LookupContext,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for file-scope lookups in `module`.
    pub fn new(index: &'a SymbolIndex, module: &str) -> Self {
        Self::with_context(index, LookupContext::in_module(module, None))
    }

    pub fn with_context(index: &'a SymbolIndex, ctx: LookupContext) -> Self {
        Self { index, ctx }
    }

    /// Resolve from inside the declaration `scope`.
    pub fn with_scope(mut self, scope: SymbolId) -> Self {
        let symbol = self.index.get(scope);
        self.ctx.module = symbol.module.clone();
        self.ctx.file = symbol.file;
        self.ctx.scope = Some(scope);
        self
    }

    /// Resolve a simple type name.
    pub fn resolve(&self, name: &str) -> ResolveResult {
        if name == "Self" {
            return match self.enclosing_nominal() {
                Some(id) => ResolveResult::Found(id),
                None => ResolveResult::NotFound,
            };
        }

        // 1. Enclosing declarations, innermost first
        let mut scope = self.ctx.scope;
        while let Some(id) = scope {
            let symbol = self.index.get(id);
            if let Some(param) = symbol
                .generic_params
                .iter()
                .find(|g| self.index.get(**g).name == name)
            {
                tracing::trace!(name, scope = %symbol.qualified_name, "found generic parameter");
                return ResolveResult::Found(*param);
            }
            if symbol.kind.is_nominal() || symbol.kind == SymbolKind::Extension {
                if let Some(found) = self.member_types(id, name).first() {
                    tracing::trace!(name, scope = %symbol.qualified_name, "found member type");
                    return ResolveResult::Found(*found);
                }
            }
            scope = symbol.parent;
        }

        // 2. Current module
        if let Some(found) = self.index.top_level_types(&self.ctx.module, name).first() {
            return ResolveResult::Found(*found);
        }

        // 3. Imported modules
        if let Some(file) = self.ctx.file {
            let candidates: Vec<SymbolId> = self
                .index
                .file_imports(file)
                .iter()
                .flat_map(|import| self.index.top_level_types(&import.module, name))
                .collect();
            let result = ResolveResult::from_candidates(candidates);
            if result.is_ambiguous() {
                tracing::debug!(name, "type name is ambiguous across imports");
            }
            if result != ResolveResult::NotFound {
                return result;
            }
        }

        // 4. Standard library
        if self.ctx.module != STDLIB_MODULE {
            if let Some(found) = self.index.top_level_types(STDLIB_MODULE, name).first() {
                return ResolveResult::Found(*found);
            }
        }

        // 5. Module names
        match self.index.module(name) {
            Some(info) => ResolveResult::Found(info.symbol),
            None => ResolveResult::NotFound,
        }
    }

    /// Resolve `name` as a member type of `owner` (a module, type or extension).
    pub fn resolve_member(&self, owner: SymbolId, name: &str) -> ResolveResult {
        let symbol = self.index.get(owner);
        if symbol.kind == SymbolKind::Module {
            return ResolveResult::from_candidates(
                self.index.top_level_types(&symbol.name, name),
            );
        }
        match self.member_types(owner, name).first() {
            Some(found) => ResolveResult::Found(*found),
            None => ResolveResult::NotFound,
        }
    }

    /// Member types of a type, including those declared in its extensions.
    fn member_types(&self, owner: SymbolId, name: &str) -> Vec<SymbolId> {
        let symbol = self.index.get(owner);
        let target = match symbol.kind {
            SymbolKind::Extension => symbol.extends.unwrap_or(owner),
            _ => owner,
        };
        let mut containers = vec![target];
        containers.extend_from_slice(self.index.extensions_of(target));
        if !containers.contains(&owner) {
            containers.push(owner);
        }
        containers
            .iter()
            .flat_map(|c| self.index.get(*c).members.iter().copied())
            .filter(|m| {
                let member = self.index.get(*m);
                member.name == name && member.kind.is_type()
            })
            .collect()
    }

    /// The nominal type `Self` refers to at this scope.
    fn enclosing_nominal(&self) -> Option<SymbolId> {
        let mut scope = self.ctx.scope;
        while let Some(id) = scope {
            let symbol = self.index.get(id);
            if symbol.kind.is_nominal() {
                return Some(id);
            }
            if symbol.kind == SymbolKind::Extension {
                return symbol.extends;
            }
            scope = symbol.parent;
        }
        None
    }
}

/// The element types of a callable's parameters, as a tuple would list them.
pub(crate) fn param_elements(symbol: &HirSymbol) -> Vec<TupleElement> {
    let is_subscript = symbol.kind == SymbolKind::Subscript;
    symbol
        .signature
        .iter()
        .flat_map(|sig| sig.params.iter())
        .map(|p| p.as_tuple_element(is_subscript))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::extract_symbols;
    use crate::parser::parse;

    fn index_of(files: &[(&str, &str)]) -> SymbolIndex {
        let mut index = SymbolIndex::new();
        for (i, (module, source)) in files.iter().enumerate() {
            let result = extract_symbols(&parse(source).source_file());
            let origin = if i == 0 {
                SymbolOrigin::Primary
            } else if *module == STDLIB_MODULE {
                SymbolOrigin::Stdlib
            } else {
                SymbolOrigin::Overlay {
                    module: SmolStr::new(*module),
                }
            };
            index.add_file(FileId::new(i as u32), module, origin, result);
        }
        index.resolve_all();
        index
    }

    const MINI_STDLIB: &str = "public struct Int {}\npublic struct String {}\npublic struct Double {}\npublic struct Bool {}\npublic protocol Equatable {}";

    fn resolved_name(index: &SymbolIndex, repr: &TypeRepr) -> String {
        let id = repr.resolved_symbol().expect("resolved");
        index.get(id).qualified_name.to_string()
    }

    #[test]
    fn test_add_file_rebases_ids() {
        let index = index_of(&[
            ("A", "struct One { struct Two {} }"),
            ("B", "struct Three { func f() {} }"),
        ]);
        let three = index.lookup_qualified("B.Three").unwrap();
        let f = index.lookup_qualified("B.Three.f").unwrap();
        assert_eq!(f.parent, Some(three.id));
        assert_eq!(three.members, vec![f.id]);
        assert_eq!(index.symbols_in_file(FileId::new(1)).len(), 2);
        assert_eq!(index.lookup_simple("Two").len(), 1);
        assert!(index.module("A").is_some());
    }

    #[test]
    fn test_resolves_through_scopes_and_stdlib() {
        let index = index_of(&[
            (
                "App",
                "struct Outer {\n    struct Inner {}\n    func f<T: Equatable>(x: T, y: Inner) -> Int {}\n}",
            ),
            (STDLIB_MODULE, MINI_STDLIB),
        ]);
        let f = index.lookup_qualified("App.Outer.f").unwrap();
        let sig = f.signature.as_ref().unwrap();
        assert_eq!(
            index.get(sig.params[0].ty.resolved_symbol().unwrap()).kind,
            SymbolKind::GenericParam
        );
        assert_eq!(resolved_name(&index, &sig.params[1].ty), "App.Outer.Inner");
        assert_eq!(resolved_name(&index, sig.result.as_ref().unwrap()), "Swift.Int");

        let t = index.get(f.generic_params[0]);
        assert_eq!(resolved_name(&index, &t.inherited[0]), "Swift.Equatable");
    }

    #[test]
    fn test_resolves_imported_and_qualified_names() {
        let index = index_of(&[
            ("Foo2", "import Foo\nclass Derived: FooBase {}\nvar x: Foo.FooBase"),
            ("Foo", "public class FooBase {}"),
        ]);
        let derived = index.lookup_qualified("Foo2.Derived").unwrap();
        assert_eq!(resolved_name(&index, &derived.inherited[0]), "Foo.FooBase");

        let x = index.lookup_qualified("Foo2.x").unwrap();
        let TypeRepr::Path(segments) = x.ty.as_ref().unwrap() else {
            panic!("expected a path");
        };
        assert_eq!(index.get(segments[0].resolved.unwrap()).kind, SymbolKind::Module);
        assert_eq!(resolved_name(&index, x.ty.as_ref().unwrap()), "Foo.FooBase");
    }

    #[test]
    fn test_unresolved_names_become_placeholders() {
        let index = index_of(&[("App", "extension ET {}\nvar a: Missing\nvar b: Missing")]);
        let ext = index.lookup_qualified("App.ET").unwrap();
        let placeholder = index.get(ext.extends.unwrap());
        assert_eq!(placeholder.kind, SymbolKind::Unresolved);
        assert_eq!(placeholder.origin, SymbolOrigin::Unresolved);

        let a = index.lookup_qualified("App.a").unwrap();
        let b = index.lookup_qualified("App.b").unwrap();
        assert_eq!(
            a.ty.as_ref().unwrap().resolved_symbol(),
            b.ty.as_ref().unwrap().resolved_symbol()
        );
    }

    #[test]
    fn test_extension_members_and_self() {
        let index = index_of(&[(
            "App",
            "struct S {}\nextension S {\n    struct Nested {}\n    func make() -> Self {}\n}\nextension S {\n    func other(n: Nested) {}\n}",
        )]);
        let s = index.lookup_qualified("App.S").unwrap();
        assert_eq!(index.extensions_of(s.id).len(), 2);
        let ordinals: Vec<u32> = index
            .extensions_of(s.id)
            .iter()
            .map(|e| index.get(*e).ordinal)
            .collect();
        assert_eq!(ordinals, vec![1, 2]);

        let make = index.lookup_qualified("App.S.make").unwrap();
        let result = make.signature.as_ref().unwrap().result.as_ref().unwrap();
        assert_eq!(result.resolved_symbol(), Some(s.id));

        let other = index.lookup_qualified("App.S.other").unwrap();
        assert_eq!(
            resolved_name(&index, &other.signature.as_ref().unwrap().params[0].ty),
            "App.S.Nested"
        );
    }

    #[test]
    fn test_inferred_types() {
        let index = index_of(&[
            ("App", "struct P {}\nvar a = 1\nvar b = P()\nvar c = p()\nvar d = nil"),
            (STDLIB_MODULE, MINI_STDLIB),
        ]);
        let ty = |name: &str| index.lookup_qualified(name).unwrap().ty.clone().unwrap();
        assert_eq!(resolved_name(&index, &ty("App.a")), "Swift.Int");
        assert_eq!(resolved_name(&index, &ty("App.b")), "App.P");
        assert!(ty("App.c").is_error());
        assert!(ty("App.d").is_error());
    }

    #[test]
    fn test_raw_value_enum_members() {
        let index = index_of(&[
            ("App", "public enum E: Int { case a }\nenum F { case b }"),
            (STDLIB_MODULE, MINI_STDLIB),
        ]);
        let e = index.lookup_qualified("App.E").unwrap();
        let kinds: Vec<SymbolKind> = e.members.iter().map(|m| index.get(*m).kind).collect();
        assert_eq!(
            kinds,
            vec![SymbolKind::EnumCase, SymbolKind::Initializer, SymbolKind::Property]
        );
        let init = index.get(e.members[1]);
        assert_eq!(init.origin, SymbolOrigin::Synthesized);
        assert_eq!(init.access, Access::Public);

        let f = index.lookup_qualified("App.F").unwrap();
        assert_eq!(f.members.len(), 1);
    }

    #[test]
    fn test_usr_lookup() {
        let index = index_of(&[("Foo2", "public class FooOverlayClassBase {}")]);
        let symbol = index.lookup_usr("s:C4Foo219FooOverlayClassBase").unwrap();
        assert_eq!(symbol.name, "FooOverlayClassBase");
    }

    #[test]
    fn test_extensions_across_modules_get_distinct_usrs() {
        let index = index_of(&[
            ("App", "public struct S {}\nextension S { func a() {} }"),
            ("Kit", "import App\nextension S { func b() {} }"),
        ]);
        let s = index.lookup_qualified("App.S").unwrap();
        let exts = index.extensions_of(s.id);
        assert_eq!(exts.len(), 2);
        let usrs: Vec<&str> = exts.iter().map(|e| index.get(*e).usr.as_ref()).collect();
        assert_eq!(usrs, vec!["s:e:V3App1S", "s:e:V3App1S#2"]);

        for (ext, module) in exts.iter().zip(["App", "Kit"]) {
            let found = index.lookup_usr(index.get(*ext).usr.as_ref()).unwrap();
            assert_eq!(found.id, *ext);
            assert_eq!(found.module, module);
        }
    }

    #[test]
    fn test_resolver_api() {
        let index = index_of(&[("App", "struct A { struct B {} }")]);
        let resolver = Resolver::new(&index, "App");
        let a = resolver.resolve("A");
        assert!(a.is_found());
        let b = resolver.resolve_member(a.symbol().unwrap(), "B");
        assert!(b.is_found());
        assert_eq!(resolver.resolve("B"), ResolveResult::NotFound);

        let scoped = resolver.with_scope(a.symbol().unwrap());
        assert!(scoped.resolve("B").is_found());
    }
}
