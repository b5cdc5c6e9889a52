//! Request types accepted by [`AnalysisHost::handle`](super::AnalysisHost::handle).

use std::fmt;
use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::Position;

/// What an interface is generated for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentSource {
    /// The module containing this source file
    File(PathBuf),
    /// A module found on the `-I` search paths
    Module(SmolStr),
}

impl DocumentSource {
    /// The name a document opened from this source is known by, unless
    /// the request names it explicitly.
    pub fn default_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Module(module) => module.to_string(),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Module(module) => write!(f, "module {module}"),
        }
    }
}

/// Parameters shared by both interface generation requests.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceRequest {
    pub source: DocumentSource,
    /// Compiler arguments, as given on the command line
    pub args: Vec<String>,
    /// Fail if the generated text is not pure ASCII
    pub check_ascii: bool,
}

impl InterfaceRequest {
    pub fn new(source: DocumentSource, args: Vec<String>) -> Self {
        Self {
            source,
            args,
            check_ascii: false,
        }
    }

    pub fn with_ascii_check(mut self, check_ascii: bool) -> Self {
        self.check_ascii = check_ascii;
        self
    }
}

/// A cursor location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorPosition {
    /// 1-based line and byte column
    LineCol(Position),
    /// Byte offset
    Offset(u32),
}

/// A request to the analysis host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Generate an interface and return its text.
    InterfaceGen(InterfaceRequest),
    /// Generate an interface and keep it open under `name`.
    InterfaceGenOpen { name: String, request: InterfaceRequest },
    /// Resolve the symbol at a position.
    ///
    /// `name` is an open interface, or else a source file that is loaded
    /// with `args`.
    CursorInfo {
        name: String,
        position: CursorPosition,
        args: Vec<String>,
    },
    /// Find the declaration with a USR in an open interface.
    FindUsr { name: String, usr: String },
    /// Drop an open interface.
    Close { name: String },
}

impl Request {
    /// Short request name, as written after `-req=`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InterfaceGen(_) => "interface-gen",
            Self::InterfaceGenOpen { .. } => "interface-gen-open",
            Self::CursorInfo { .. } => "cursor",
            Self::FindUsr { .. } => "find-usr",
            Self::Close { .. } => "close",
        }
    }
}
