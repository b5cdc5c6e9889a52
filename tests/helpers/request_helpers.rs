//! Thin wrappers around `AnalysisHost::handle` for the common requests.

use std::path::Path;

use ifacegen::Position;
use ifacegen::ide::{
    AnalysisHost, CursorInfo, CursorPosition, DocumentSource, InterfaceRequest, Request,
    RequestError, Response,
};

pub fn file_request(path: &Path, args: Vec<String>) -> InterfaceRequest {
    InterfaceRequest::new(DocumentSource::File(path.to_path_buf()), args)
}

/// `interface-gen`, returning the text.
pub fn interface_gen(host: &mut AnalysisHost, path: &Path, args: Vec<String>) -> String {
    match host.handle(Request::InterfaceGen(file_request(path, args))) {
        Ok(Response::Interface(text)) => text,
        other => panic!("interface-gen of {} failed: {other:?}", path.display()),
    }
}

/// `interface-gen-open` under `name`, returning the text.
pub fn interface_gen_open(
    host: &mut AnalysisHost,
    name: &str,
    path: &Path,
    args: Vec<String>,
) -> String {
    let request = Request::InterfaceGenOpen {
        name: name.to_string(),
        request: file_request(path, args),
    };
    match host.handle(request) {
        Ok(Response::Interface(text)) => text,
        other => panic!("interface-gen-open of {} failed: {other:?}", path.display()),
    }
}

/// `cursor` at a 1-based `line:column` in an open document.
pub fn cursor_at(
    host: &mut AnalysisHost,
    name: &str,
    line: u32,
    column: u32,
) -> Result<CursorInfo, RequestError> {
    cursor(host, name, CursorPosition::LineCol(Position::new(line, column)))
}

pub fn cursor(
    host: &mut AnalysisHost,
    name: &str,
    position: CursorPosition,
) -> Result<CursorInfo, RequestError> {
    let response = host.handle(Request::CursorInfo {
        name: name.to_string(),
        position,
        args: Vec::new(),
    })?;
    match response {
        Response::Cursor(info) => Ok(info),
        other => panic!("expected cursor info, got {other:?}"),
    }
}
