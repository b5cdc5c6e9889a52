//! AnalysisHost — owns loaded modules and generated interfaces.
//!
//! The host answers [`Request`]s. Generated interfaces are cached by
//! `(source, compiler arguments)`, and documents opened with
//! `interface-gen-open` stay available to later cursor and USR queries
//! until they are closed.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! let request = InterfaceRequest::new(DocumentSource::File(path), args);
//! host.handle(Request::InterfaceGenOpen { name: "Foo2".into(), request })?;
//!
//! let cursor = host.handle(Request::CursorInfo {
//!     name: "Foo2".into(),
//!     position: CursorPosition::LineCol(Position::new(18, 49)),
//!     args: Vec::new(),
//! })?;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use text_size::TextSize;

use super::cursor::{cursor_info, cursor_info_in_source};
use super::find_usr::find_usr;
use super::{
    CursorInfo, CursorPosition, DocumentSource, InterfaceRequest, Request, RequestError, Response,
};
use crate::base::LineIndex;
use crate::interface::{InterfaceDocument, PrintOptions, generate_interface};
use crate::project::{CompilerArgs, LoadedModule, ModuleLoader};

/// A generated interface together with the module it was generated from.
#[derive(Debug)]
pub struct GeneratedInterface {
    pub module: Arc<LoadedModule>,
    pub document: InterfaceDocument,
}

type CacheKey = (DocumentSource, Vec<String>);

/// Owns all state for answering requests.
pub struct AnalysisHost {
    loader: ModuleLoader,
    /// Generated interfaces by source and compiler arguments
    documents: RwLock<IndexMap<CacheKey, Arc<GeneratedInterface>>>,
    /// Documents opened by name
    open: IndexMap<String, Arc<GeneratedInterface>>,
    options: PrintOptions,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_options(PrintOptions::default())
    }

    pub fn with_options(options: PrintOptions) -> Self {
        Self {
            loader: ModuleLoader::new(),
            documents: RwLock::new(IndexMap::new()),
            open: IndexMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Answer one request.
    pub fn handle(&mut self, request: Request) -> Result<Response, RequestError> {
        tracing::debug!(kind = request.kind(), "handling request");
        match request {
            Request::InterfaceGen(request) => {
                let generated = self.interface(&request)?;
                Ok(Response::Interface(generated.document.text().to_string()))
            }
            Request::InterfaceGenOpen { name, request } => {
                let generated = self.interface(&request)?;
                let text = generated.document.text().to_string();
                self.open.insert(name, generated);
                Ok(Response::Interface(text))
            }
            Request::CursorInfo {
                name,
                position,
                args,
            } => self.cursor(&name, position, &args).map(Response::Cursor),
            Request::FindUsr { name, usr } => {
                let generated = self.open_document(&name)?;
                find_usr(&generated.module.index, &generated.document, &usr).map(Response::Usr)
            }
            Request::Close { name } => {
                self.open
                    .shift_remove(&name)
                    .ok_or(RequestError::UnknownDocument(name))?;
                Ok(Response::Closed)
            }
        }
    }

    /// The interface for `request`, generated on first use.
    pub fn interface(
        &mut self,
        request: &InterfaceRequest,
    ) -> Result<Arc<GeneratedInterface>, RequestError> {
        let key = (request.source.clone(), request.args.clone());
        let cached = self.documents.read().get(&key).cloned();
        let generated = match cached {
            Some(generated) => {
                tracing::debug!(source = %request.source, "using cached interface");
                generated
            }
            None => {
                let args = CompilerArgs::parse(&request.args);
                let generated = Arc::new(generate(
                    &mut self.loader,
                    &request.source,
                    &args,
                    &self.options,
                )?);
                self.documents.write().insert(key, generated.clone());
                generated
            }
        };
        if request.check_ascii && !generated.document.text().is_ascii() {
            return Err(RequestError::NonAsciiInterface);
        }
        Ok(generated)
    }

    /// Generate the interfaces of several files in parallel and cache them.
    ///
    /// Each file is loaded by its own loader; results are in input order.
    pub fn generate_interfaces(
        &self,
        jobs: &[(PathBuf, CompilerArgs)],
    ) -> Vec<Result<Arc<GeneratedInterface>, RequestError>> {
        let options = &self.options;
        let results: Vec<_> = jobs
            .par_iter()
            .map(|(path, args)| {
                let source = DocumentSource::File(path.clone());
                generate(&mut ModuleLoader::new(), &source, args, options).map(Arc::new)
            })
            .collect();

        let mut documents = self.documents.write();
        for ((path, args), result) in jobs.iter().zip(&results) {
            if let Ok(generated) = result {
                let key = (DocumentSource::File(path.clone()), args.raw().to_vec());
                documents.insert(key, generated.clone());
            }
        }
        results
    }

    /// A document opened with `interface-gen-open`.
    pub fn open_document(&self, name: &str) -> Result<Arc<GeneratedInterface>, RequestError> {
        self.open
            .get(name)
            .cloned()
            .ok_or_else(|| RequestError::UnknownDocument(name.to_string()))
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.open.contains_key(name)
    }

    /// Number of cached interfaces
    pub fn cached_count(&self) -> usize {
        self.documents.read().len()
    }

    /// Drop cached interfaces; open documents are kept.
    pub fn clear_cache(&mut self) {
        self.documents.write().clear();
    }

    fn cursor(
        &mut self,
        name: &str,
        position: CursorPosition,
        args: &[String],
    ) -> Result<CursorInfo, RequestError> {
        if let Some(generated) = self.open.get(name) {
            let offset = resolve_position(generated.document.line_index(), position)?;
            return cursor_info(&generated.module.index, &generated.document, offset);
        }

        let path = Path::new(name);
        if !path.is_file() {
            return Err(RequestError::UnknownDocument(name.to_string()));
        }
        let module = self.loader.load(path, &CompilerArgs::parse(args))?;
        let file = module
            .file_by_path(path)
            .ok_or_else(|| RequestError::UnknownDocument(name.to_string()))?;
        let offset = resolve_position(&file.line_index, position)?;
        cursor_info_in_source(&module.index, file, offset)
    }
}

/// Load and print one interface.
fn generate(
    loader: &mut ModuleLoader,
    source: &DocumentSource,
    args: &CompilerArgs,
    options: &PrintOptions,
) -> Result<GeneratedInterface, RequestError> {
    let module = match source {
        DocumentSource::File(path) => loader.load(path, args)?,
        DocumentSource::Module(name) => loader.load_module(name, args)?,
    };
    let document = generate_interface(&module.index, &module.name, options);
    for diagnostic in document.diagnostics() {
        tracing::warn!(module = %module.name, "{diagnostic}");
    }
    Ok(GeneratedInterface {
        module: Arc::new(module),
        document,
    })
}

/// Convert a cursor position to an offset.
///
/// Offsets are range-checked by the cursor query itself.
fn resolve_position(
    line_index: &LineIndex,
    position: CursorPosition,
) -> Result<TextSize, RequestError> {
    match position {
        CursorPosition::Offset(offset) => Ok(TextSize::new(offset)),
        CursorPosition::LineCol(pos) => {
            line_index
                .offset_of_position(pos)
                .ok_or(RequestError::InvalidPosition {
                    line: pos.line,
                    column: pos.column,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;
    use std::fs;

    const APP: &str = "import Kit\n\npublic class Base {}\npublic class Derived: Base {}\n";
    const KIT: &str = "import App\npublic extension Base {\n    func draw() {}\n}\n";

    struct Fixture {
        _dir: tempfile::TempDir,
        app: PathBuf,
        args: Vec<String>,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("App.swift");
        fs::write(&app, APP).unwrap();
        fs::write(dir.path().join("Kit.swift"), KIT).unwrap();
        let args = vec![
            app.to_string_lossy().to_string(),
            "-I".to_string(),
            dir.path().to_string_lossy().to_string(),
        ];
        Fixture {
            _dir: dir,
            app,
            args,
        }
    }

    fn open(host: &mut AnalysisHost, fixture: &Fixture) -> String {
        let request = InterfaceRequest::new(DocumentSource::File(fixture.app.clone()), fixture.args.clone());
        match host
            .handle(Request::InterfaceGenOpen {
                name: "App".to_string(),
                request,
            })
            .unwrap()
        {
            Response::Interface(text) => text,
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn test_open_then_cursor_uses_the_same_document() {
        let fixture = fixture();
        let mut host = AnalysisHost::new();
        let text = open(&mut host, &fixture);
        assert_eq!(
            text,
            "import Kit\n\npublic class Base {\n}\n\npublic class Derived : Base {\n}\n\npublic extension Base {\n\n    public func draw()\n}\n"
        );
        assert_eq!(host.cached_count(), 1);

        let response = host
            .handle(Request::CursorInfo {
                name: "App".to_string(),
                position: CursorPosition::LineCol(Position::new(6, 25)),
                args: Vec::new(),
            })
            .unwrap();
        let Response::Cursor(info) = response else {
            panic!("expected cursor info");
        };
        assert_eq!(info.name, "Base");
        assert_eq!(info.usr.as_ref(), "s:C3App4Base");
        assert_eq!(info.location.unwrap().to_string(), "3:14-3:18");
        assert_eq!(host.cached_count(), 1);
    }

    #[test]
    fn test_find_usr_and_close() {
        let fixture = fixture();
        let mut host = AnalysisHost::new();
        open(&mut host, &fixture);

        let response = host
            .handle(Request::FindUsr {
                name: "App".to_string(),
                usr: "s:C3App7Derived".to_string(),
            })
            .unwrap();
        assert_eq!(response.to_string(), "(6:14-6:21)\n");

        host.handle(Request::Close {
            name: "App".to_string(),
        })
        .unwrap();
        assert!(!host.is_open("App"));
        assert!(matches!(
            host.handle(Request::FindUsr {
                name: "App".to_string(),
                usr: "s:C3App7Derived".to_string(),
            }),
            Err(RequestError::UnknownDocument(_))
        ));
    }

    #[test]
    fn test_cursor_errors() {
        let fixture = fixture();
        let mut host = AnalysisHost::new();
        let text = open(&mut host, &fixture);

        let past_end = text.len() as u32 + 1;
        assert!(matches!(
            host.handle(Request::CursorInfo {
                name: "App".to_string(),
                position: CursorPosition::Offset(past_end),
                args: Vec::new(),
            }),
            Err(RequestError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            host.handle(Request::CursorInfo {
                name: "App".to_string(),
                position: CursorPosition::LineCol(Position::new(99, 1)),
                args: Vec::new(),
            }),
            Err(RequestError::InvalidPosition { line: 99, column: 1 })
        ));
        assert!(matches!(
            host.handle(Request::CursorInfo {
                name: "Nothing".to_string(),
                position: CursorPosition::Offset(0),
                args: Vec::new(),
            }),
            Err(RequestError::UnknownDocument(_))
        ));
    }

    #[test]
    fn test_cursor_on_source_file() {
        let fixture = fixture();
        let mut host = AnalysisHost::new();
        let name = fixture.app.to_string_lossy().to_string();
        let response = host
            .handle(Request::CursorInfo {
                name,
                // `Base` in `Derived: Base`
                position: CursorPosition::LineCol(Position::new(4, 24)),
                args: fixture.args.clone(),
            })
            .unwrap();
        let Response::Cursor(info) = response else {
            panic!("expected cursor info");
        };
        assert_eq!(info.kind, "source.lang.swift.ref.class");
        assert_eq!(info.location.unwrap().to_string(), "3:14-3:18");
    }

    #[test]
    fn test_ascii_check_and_missing_module() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Uni.swift");
        fs::write(&path, "/// Crème brûlée.\npublic struct Dessert {}\n").unwrap();
        let mut host = AnalysisHost::new();

        let request = InterfaceRequest::new(DocumentSource::File(path.clone()), Vec::new());
        assert!(host.handle(Request::InterfaceGen(request.clone())).is_ok());
        assert!(matches!(
            host.handle(Request::InterfaceGen(request.with_ascii_check(true))),
            Err(RequestError::NonAsciiInterface)
        ));

        let module = InterfaceRequest::new(DocumentSource::Module("Nowhere".into()), Vec::new());
        assert!(matches!(
            host.handle(Request::InterfaceGen(module)),
            Err(RequestError::Load(_))
        ));
    }

    #[test]
    fn test_parallel_generation_fills_the_cache() {
        let fixture = fixture();
        let other = fixture.app.with_file_name("Other.swift");
        fs::write(&other, "public struct Other {}\n").unwrap();
        let host = AnalysisHost::new();

        let jobs = vec![
            (fixture.app.clone(), CompilerArgs::parse(&fixture.args)),
            (other.clone(), CompilerArgs::parse(&[other.to_string_lossy().to_string()])),
            (PathBuf::from("/no/such/File.swift"), CompilerArgs::default()),
        ];
        let results = host.generate_interfaces(&jobs);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().document.text().contains("class Derived"));
        assert_eq!(results[1].as_ref().unwrap().document.text(), "public struct Other {\n}\n");
        assert!(results[2].is_err());
        assert_eq!(host.cached_count(), 2);
    }
}
