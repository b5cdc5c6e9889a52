//! High-level IR (HIR) — Semantic model with Salsa queries.
//!
//! Parsing and per-file symbol extraction are Salsa queries that are
//! memoized on the file text. Cross-file work (name resolution, USRs) happens
//! in a `SymbolIndex` built from the extraction results of every loaded file.
//!
//! ## Key Types
//!
//! - [`RootDatabase`] — Concrete Salsa database
//! - [`HirSymbol`] — A declaration with its resolved types and USR
//! - [`SymbolIndex`] — All symbols of the loaded modules
//! - [`Resolver`] — Type-name lookups through scopes, imports and the stdlib
//!
//! ## Query Layers
//!
//! ```text
//! file_text(file)              ← INPUT: raw source text
//!     │
//!     ▼
//! parse_file(file)             ← Parse into a lossless tree (per-file)
//!     │
//!     ▼
//! file_symbols_from_text(file) ← Extract symbols (per-file)
//!     │
//!     ▼
//! SymbolIndex::add_file        ← Module-wide index
//!     │
//!     ▼
//! SymbolIndex::resolve_all     ← Name resolution, placeholders, USRs
//! ```

mod db;
mod mangle;
mod resolve;
mod symbols;

pub use db::{FileText, ParseResult, RootDatabase, file_symbols_from_text, parse_file};
pub use mangle::mangle_type;
pub use resolve::{
    LookupContext, ModuleInfo, ResolveResult, Resolver, STDLIB_MODULE, SymbolIndex,
};
pub(crate) use resolve::param_elements;
pub use symbols::{
    Access, ExtractionResult, HirSymbol, ImportInfo, Modifier, ParamInfo, PathSegment, Signature,
    Storage, SymbolId, SymbolKind, SymbolOrigin, TupleElement, TypeRepr, extract_symbols,
};
