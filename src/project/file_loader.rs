//! Reading source files and locating modules on the import search paths.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::LoadError;

pub const SWIFT_EXTENSION: &str = "swift";

/// Check whether a path names a Swift source file.
pub fn is_swift_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SWIFT_EXTENSION)
}

/// Read a source file.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

/// Find the source files of `module` on the search paths.
///
/// Each directory is tried in order for `<dir>/<module>.swift`, then for a
/// `<dir>/<module>/` directory of Swift files. Returns an empty list when
/// the module is nowhere to be found.
pub fn find_module(search_paths: &[PathBuf], module: &str) -> Vec<PathBuf> {
    for dir in search_paths {
        let file = dir.join(format!("{module}.{SWIFT_EXTENSION}"));
        if file.is_file() {
            return vec![file];
        }
        let module_dir = dir.join(module);
        if module_dir.is_dir() {
            let files = collect_swift_files(&module_dir);
            if !files.is_empty() {
                return files;
            }
        }
    }
    Vec::new()
}

/// All Swift files under `dir`, sorted by path.
pub fn collect_swift_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_swift_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/definitely/not/here.swift")).unwrap_err();
        assert!(matches!(err, LoadError::MissingInput(_)));
    }

    #[test]
    fn test_find_module_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.swift"), "public class A {}").unwrap();
        std::fs::create_dir(dir.path().join("Bar")).unwrap();
        std::fs::write(dir.path().join("Bar").join("b.swift"), "").unwrap();
        std::fs::write(dir.path().join("Bar").join("a.swift"), "").unwrap();
        std::fs::write(dir.path().join("Bar").join("notes.md"), "").unwrap();

        let search = vec![PathBuf::from("/nonexistent"), dir.path().to_path_buf()];
        assert_eq!(find_module(&search, "Foo"), vec![dir.path().join("Foo.swift")]);

        let bar: Vec<_> = find_module(&search, "Bar")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(bar, vec!["a.swift", "b.swift"]);

        assert!(find_module(&search, "Missing").is_empty());
    }
}
