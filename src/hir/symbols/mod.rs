//! Symbol extraction from AST — pure functions that return symbols.
//!
//! Extraction works directly with the typed AST wrappers from
//! `crate::parser`, producing `HirSymbol` values with file-local ids.
//!
//! # Module structure
//!
//! - [`types`] — `HirSymbol`, `SymbolKind`, `TypeRepr` and friends
//! - [`context`] — `ExtractionContext` for tracking scope during extraction
//! - [`extract`] — the AST walk and type lowering

mod context;
mod extract;
mod types;


pub use types::{
    Access, ExtractionResult, HirSymbol, ImportInfo, Modifier, ParamInfo, PathSegment, Signature,
    Storage, SymbolId, SymbolKind, SymbolOrigin, TupleElement, TypeRepr,
};

pub use extract::extract_symbols;
