//! Request failures.

use thiserror::Error;

use crate::project::LoadError;

/// Why a request could not be answered.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A cursor offset past the end of the document.
    #[error("offset {offset} is out of range for a document of {len} bytes")]
    PositionOutOfRange { offset: u32, len: u32 },

    /// A `line:column` that does not exist in the document.
    #[error("position {line}:{column} is not in the document")]
    InvalidPosition { line: u32, column: u32 },

    /// No interface is open under this name and no such source file exists.
    #[error("no document named '{0}' is open")]
    UnknownDocument(String),

    #[error("no symbol at the requested position")]
    NoSymbolAtPosition,

    #[error("no declaration with USR '{0}' in the document")]
    UsrNotFound(String),

    /// The interface was generated with `-check-interface-ascii` and is not ASCII.
    #[error("generated interface contains non-ASCII characters")]
    NonAsciiInterface,

    #[error(transparent)]
    Load(#[from] LoadError),
}
