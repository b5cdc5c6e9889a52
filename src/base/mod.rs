//! Foundation types for the interface generator.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - 1-based line/column positions as shown to users
//! - [`text_utils`] - identifier checks
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod position;
mod span;
pub mod text_utils;

pub use file_id::FileId;
pub use position::{Position, Span};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
