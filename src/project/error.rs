//! Error types for loading source modules.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a module from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An input file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file does not exist.
    #[error("no such input file: {}", .0.display())]
    MissingInput(PathBuf),

    /// `-module` named a module that is on no search path.
    #[error("module '{0}' not found on the import search paths")]
    ModuleNotFound(String),
}

impl LoadError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
