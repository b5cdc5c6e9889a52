//! Source model loading: compiler arguments, module search and the stdlib.

mod compiler_args;
mod error;
pub mod file_loader;
mod module_loader;
pub mod stdlib;

pub use compiler_args::{CompilerArgs, DEFAULT_MODULE_NAME};
pub use error::LoadError;
pub use module_loader::{LoadedModule, ModuleLoader, SourceFileInfo};
