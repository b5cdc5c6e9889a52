//! Source fixtures: checked-in inputs and temporary module layouts.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// `tests/inputs/<name>`
pub fn input(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("inputs")
        .join(name)
}

/// The checked-in expected output for an input.
pub fn expected_response(name: &str) -> String {
    let path = input(&format!("{name}.response"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Compiler arguments naming just `path`, as the request driver passes them.
pub fn args_for(path: &Path) -> Vec<String> {
    vec![path.to_string_lossy().to_string()]
}

/// A temporary directory that doubles as an import search path.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `text` to `name` inside the workspace.
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, text).expect("write fixture");
        path
    }

    /// Compiler arguments for `primary` with the workspace on the search path.
    pub fn args(&self, primary: &Path) -> Vec<String> {
        vec![
            primary.to_string_lossy().to_string(),
            "-I".to_string(),
            self.dir.path().to_string_lossy().to_string(),
        ]
    }
}
