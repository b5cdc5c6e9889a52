//! Interface synthesis: the declarations-only view of a module.
//!
//! ```text
//! SymbolIndex ──generate_interface──► InterfaceDocument
//!                                       ├─ text
//!                                       ├─ decl spans   (text → declaration)
//!                                       ├─ occurrences  (token → symbol)
//!                                       └─ diagnostics  (unresolved symbols)
//! ```
//!
//! Bodies and initializer expressions are never printed. Types that did not
//! resolve are printed under their written name and recorded as
//! [`InterfaceError::UnresolvedSymbol`] diagnostics instead of failing.

mod document;
mod error;
mod options;
mod printer;

#[cfg(test)]
mod tests;

pub use document::{DeclSpan, InterfaceDocument, Occurrence, OccurrenceRole};
pub use error::InterfaceError;
pub use options::PrintOptions;
pub use printer::{declaration_text, generate_interface};
