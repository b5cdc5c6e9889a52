//! Responses and their textual form.

use std::fmt;

use super::{CursorInfo, UsrLocation};

/// The answer to a [`Request`](super::Request).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Generated interface text
    Interface(String),
    Cursor(CursorInfo),
    Usr(UsrLocation),
    Closed,
}

/// Printed the way `sourcekitd-test` prints results.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(text) => f.write_str(text),
            Self::Cursor(info) => {
                match &info.location {
                    Some(span) => writeln!(f, "{} ({span})", info.kind)?,
                    None => writeln!(f, "{}", info.kind)?,
                }
                writeln!(f, "{}", info.name)?;
                writeln!(f, "{}", info.usr)?;
                writeln!(f, "{}", info.type_name)?;
                writeln!(f, "{}", info.module)?;
                writeln!(f, "{}", info.annotated_decl)
            }
            Self::Usr(location) => writeln!(f, "({})", location.span),
            Self::Closed => Ok(()),
        }
    }
}
