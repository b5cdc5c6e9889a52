//! # swift-ifacegen
//!
//! Generates the declarations-only interface of a Swift module, with every
//! printed name addressable by cursor position and USR.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Requests: interface-gen, cursor info, find-usr
//!   ↓
//! interface → Interface printer, declaration spans, occurrences
//!   ↓
//! project   → Compiler arguments, module and overlay loading, stdlib
//!   ↓
//! hir       → Salsa queries, symbol index, name resolution, USRs
//!   ↓
//! parser    → Logos lexer, rowan tree, typed AST
//!   ↓
//! base      → Primitives (FileId, LineIndex, Position, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → project → interface → ide)
// ============================================================================

/// Foundation types: FileId, LineIndex, Position/Span
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// High-level IR: Salsa queries and the symbol index
pub mod hir;

/// Project loading: compiler arguments, overlays, stdlib
pub mod project;

/// Interface generation and its position index
pub mod interface;

/// Requests against generated interfaces
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, Position, Span, TextRange, TextSize};

pub use ide::{AnalysisHost, Request, RequestError, Response};
pub use interface::{InterfaceDocument, PrintOptions, generate_interface};
pub use project::{CompilerArgs, LoadError};
