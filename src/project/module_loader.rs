//! Loading a primary module, its overlays and the stdlib into a resolved
//! `SymbolIndex`.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use salsa::Setter;
use smol_str::SmolStr;

use super::compiler_args::CompilerArgs;
use super::error::LoadError;
use super::file_loader;
use super::stdlib::{STDLIB_SOURCE, stdlib_path};
use crate::base::{FileId, LineIndex};
use crate::hir::{
    FileText, RootDatabase, STDLIB_MODULE, SymbolIndex, SymbolOrigin, file_symbols_from_text,
    parse_file,
};
use crate::parser::SyntaxError;

/// One source file of a loaded module.
#[derive(Clone, Debug)]
pub struct SourceFileInfo {
    pub file: FileId,
    pub path: PathBuf,
    pub module: SmolStr,
    pub text: Arc<str>,
    pub line_index: LineIndex,
    pub errors: Vec<SyntaxError>,
}

/// A module loaded together with everything it imports.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct LoadedModule {
    /// Name of the primary module
    pub name: SmolStr,
    /// The file the request was made for (for `-module` loads, the first file)
    pub primary: FileId,
    pub index: Arc<SymbolIndex>,
    files: IndexMap<FileId, SourceFileInfo>,
}

impl LoadedModule {
    pub fn file(&self, file: FileId) -> Option<&SourceFileInfo> {
        self.files.get(&file)
    }

    pub fn file_by_path(&self, path: &Path) -> Option<&SourceFileInfo> {
        self.files.values().find(|info| info.path == path)
    }

    pub fn primary_file(&self) -> Option<&SourceFileInfo> {
        self.file(self.primary)
    }

    /// All loaded files in load order (primary module, overlays, stdlib).
    pub fn files(&self) -> impl Iterator<Item = &SourceFileInfo> {
        self.files.values()
    }
}

/// Loads modules, memoizing parsing and extraction per file in a salsa
/// database that outlives individual loads.
#[derive(Default)]
pub struct ModuleLoader {
    db: RootDatabase,
    inputs: FxHashMap<PathBuf, FileText>,
    next_file: u32,
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the module containing `primary`.
    ///
    /// Every positional input of `args` belongs to the primary module; the
    /// primary file is added to them if missing. Imports are looked up on the
    /// `-I` search paths; missing imports are logged and skipped. Repeated
    /// inputs are loaded once.
    pub fn load(&mut self, primary: &Path, args: &CompilerArgs) -> Result<LoadedModule, LoadError> {
        let module = args.module_name_for(primary);
        let mut inputs: IndexSet<PathBuf> = args.inputs.iter().cloned().collect();
        if !inputs.contains(primary) {
            inputs.shift_insert(0, primary.to_path_buf());
        }
        tracing::debug!(module = %module, inputs = inputs.len(), "loading module");

        let mut session = LoadSession::new(SmolStr::new(&module));
        for path in &inputs {
            let text = file_loader::load_file(path)?;
            self.add_file(&mut session, path, text, SymbolOrigin::Primary)?;
        }
        let primary_id = session
            .files
            .values()
            .find(|info| info.path == primary)
            .map(|info| info.file)
            .ok_or_else(|| LoadError::MissingInput(primary.to_path_buf()))?;
        self.finish(session, primary_id, args)
    }

    /// Load a module found on the search paths as the primary module.
    pub fn load_module(&mut self, module: &str, args: &CompilerArgs) -> Result<LoadedModule, LoadError> {
        let paths = file_loader::find_module(&args.search_paths, module);
        if paths.is_empty() {
            return Err(LoadError::ModuleNotFound(module.to_string()));
        }
        tracing::debug!(module, files = paths.len(), "loading module from search paths");

        let mut session = LoadSession::new(SmolStr::new(module));
        let mut first = None;
        for path in &paths {
            let text = file_loader::load_file(path)?;
            let id = self.add_file(&mut session, path, text, SymbolOrigin::Primary)?;
            first.get_or_insert(id);
        }
        let primary = first.ok_or_else(|| LoadError::ModuleNotFound(module.to_string()))?;
        self.finish(session, primary, args)
    }

    /// Load overlays and the stdlib, then resolve.
    fn finish(
        &mut self,
        mut session: LoadSession,
        primary: FileId,
        args: &CompilerArgs,
    ) -> Result<LoadedModule, LoadError> {
        while let Some(import) = session.pending.pop_front() {
            if !session.visited.insert(import.clone()) {
                continue;
            }
            if import == STDLIB_MODULE || import == session.module {
                continue;
            }
            let paths = file_loader::find_module(&args.search_paths, &import);
            if paths.is_empty() {
                tracing::warn!(module = %import, "imported module not found on search paths");
                // Still known by name so the import can be printed and referenced
                session.index.add_module(&import, SymbolOrigin::Unresolved);
                continue;
            }
            tracing::debug!(module = %import, files = paths.len(), "loading overlay module");
            let origin = SymbolOrigin::Overlay {
                module: import.clone(),
            };
            for path in paths {
                if session.files.values().any(|info| info.path == path) {
                    continue;
                }
                match file_loader::load_file(&path) {
                    Ok(text) => {
                        self.add_file_to(&mut session, &path, text, &import, origin.clone())?;
                    }
                    Err(err) => tracing::warn!(error = %err, "skipping overlay file"),
                }
            }
        }

        self.add_file_to(
            &mut session,
            &stdlib_path(),
            STDLIB_SOURCE.to_string(),
            STDLIB_MODULE,
            SymbolOrigin::Stdlib,
        )?;

        let LoadSession {
            module,
            mut index,
            files,
            ..
        } = session;
        index.resolve_all();
        Ok(LoadedModule {
            name: module,
            primary,
            index: Arc::new(index),
            files,
        })
    }

    fn add_file(
        &mut self,
        session: &mut LoadSession,
        path: &Path,
        text: String,
        origin: SymbolOrigin,
    ) -> Result<FileId, LoadError> {
        let module = session.module.clone();
        self.add_file_to(session, path, text, &module, origin)
    }

    fn add_file_to(
        &mut self,
        session: &mut LoadSession,
        path: &Path,
        text: String,
        module: &str,
        origin: SymbolOrigin,
    ) -> Result<FileId, LoadError> {
        let file_text = self.file_text(path, text);
        let file = file_text.file(&self.db);
        let parsed = parse_file(&self.db, file_text);
        let extracted = file_symbols_from_text(&self.db, file_text);

        session
            .pending
            .extend(extracted.imports.iter().map(|i| i.module.clone()));
        let text: Arc<str> = Arc::from(file_text.text(&self.db).as_str());
        session.files.insert(
            file,
            SourceFileInfo {
                file,
                path: path.to_path_buf(),
                module: SmolStr::new(module),
                line_index: LineIndex::new(&text),
                text,
                errors: parsed.errors().to_vec(),
            },
        );
        session.index.add_file(file, module, origin, extracted);
        Ok(file)
    }

    /// The salsa input for `path`, reusing (and updating) an existing one so
    /// unchanged files hit the memoized queries.
    fn file_text(&mut self, path: &Path, text: String) -> FileText {
        if let Some(existing) = self.inputs.get(path).copied() {
            if existing.text(&self.db) != &text {
                existing.set_text(&mut self.db).to(text);
            }
            return existing;
        }
        let file = FileId::new(self.next_file);
        self.next_file += 1;
        let input = FileText::new(&self.db, file, text);
        self.inputs.insert(path.to_path_buf(), input);
        input
    }
}

/// State of one `load` call.
struct LoadSession {
    module: SmolStr,
    index: SymbolIndex,
    files: IndexMap<FileId, SourceFileInfo>,
    pending: VecDeque<SmolStr>,
    visited: FxHashSet<SmolStr>,
}

impl LoadSession {
    fn new(module: SmolStr) -> Self {
        Self {
            module,
            index: SymbolIndex::new(),
            files: IndexMap::new(),
            pending: VecDeque::new(),
            visited: FxHashSet::default(),
        }
    }
}
