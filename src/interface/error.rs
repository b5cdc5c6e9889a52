//! Diagnostics recorded while rendering an interface.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;

/// A problem found while rendering; rendering always continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceError {
    /// A type reference did not resolve. `name` is the name as written, or
    /// `<<error type>>` when a variable's type could not be inferred.
    #[error("unresolved symbol `{name}` in `{context}`")]
    UnresolvedSymbol {
        name: SmolStr,
        /// Qualified name of the declaration containing the reference
        context: Arc<str>,
        /// Where the placeholder was printed in the document
        range: TextRange,
    },
}
