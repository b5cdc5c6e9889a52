//! Compiler argument parsing.
//!
//! Only the arguments that shape the loaded module are interpreted; the
//! rest are accepted and ignored so real compiler invocations can be passed
//! through unchanged.

use std::path::{Path, PathBuf};

use crate::base::text_utils::is_identifier;

/// Flags whose value is the following argument and that we do not interpret.
const IGNORED_FLAGS_WITH_VALUE: &[&str] = &[
    "-sdk",
    "-target",
    "-F",
    "-o",
    "-j",
    "-Xcc",
    "-Xlinker",
    "-swift-version",
    "-module-cache-path",
    "-resource-dir",
];

/// Module name used when none is given and the file stem is not an identifier.
pub const DEFAULT_MODULE_NAME: &str = "main";

/// The interpreted compiler argument vector of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompilerArgs {
    /// Positional `*.swift` inputs, in order
    pub inputs: Vec<PathBuf>,
    /// `-module-name`
    pub module_name: Option<String>,
    /// `-I` import search paths, in order
    pub search_paths: Vec<PathBuf>,
    /// `-D` conditional compilation flags (recorded, unused)
    pub defines: Vec<String>,
    raw: Vec<String>,
}

impl CompilerArgs {
    /// Interpret a compiler argument vector.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut result = Self {
            raw: args.iter().map(|a| a.as_ref().to_string()).collect(),
            ..Self::default()
        };
        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(arg) = iter.next() {
            match arg {
                "-module-name" => result.module_name = iter.next().map(str::to_string),
                "-I" => result.search_paths.extend(iter.next().map(PathBuf::from)),
                "-D" => result.defines.extend(iter.next().map(str::to_string)),
                flag if IGNORED_FLAGS_WITH_VALUE.contains(&flag) => {
                    tracing::debug!(flag, value = ?iter.next(), "ignoring compiler flag");
                }
                flag if flag.starts_with("-I") => {
                    result.search_paths.push(PathBuf::from(&flag[2..]));
                }
                flag if flag.starts_with("-D") => result.defines.push(flag[2..].to_string()),
                flag if flag.starts_with('-') => {
                    tracing::debug!(flag, "ignoring compiler flag");
                }
                input if input.ends_with(".swift") => result.inputs.push(PathBuf::from(input)),
                other => tracing::debug!(arg = other, "ignoring positional argument"),
            }
        }
        result
    }

    /// The argument vector as given.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// The module the primary file belongs to.
    ///
    /// Defaults to the primary file's stem when `-module-name` is absent.
    pub fn module_name_for(&self, primary: &Path) -> String {
        if let Some(name) = &self.module_name {
            return name.clone();
        }
        primary
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| is_identifier(stem))
            .unwrap_or(DEFAULT_MODULE_NAME)
            .to_string()
    }
}
