//! IDE features — requests against generated interfaces.
//!
//! This module sits between the interface printer and the request driver.
//! Each request kind maps to one function; [`AnalysisHost`] owns the state
//! that ties them together.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: cursor and USR queries take an index and a document
//! 2. **Own types**: responses are plain data, formatted at the boundary
//! 3. **One host**: loading, caching and open documents live in `AnalysisHost`
//!
//! ## Usage
//!
//! ```ignore
//! use ifacegen::ide::{AnalysisHost, DocumentSource, InterfaceRequest, Request};
//!
//! let mut host = AnalysisHost::new();
//! let request = InterfaceRequest::new(DocumentSource::File(path), args);
//! let response = host.handle(Request::InterfaceGen(request))?;
//! println!("{response}");
//! ```

mod analysis;
mod cursor;
mod error;
mod find_usr;
mod request;
mod response;

pub use analysis::{AnalysisHost, GeneratedInterface};
pub use cursor::{
    CursorInfo, annotated_declaration, cursor_info, cursor_info_in_source, kind_uid, type_name,
};
pub use error::RequestError;
pub use find_usr::{UsrLocation, find_usr};
pub use request::{CursorPosition, DocumentSource, InterfaceRequest, Request};
pub use response::Response;
