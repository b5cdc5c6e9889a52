//! Interface printing options

use crate::hir::Access;

/// Options controlling how an interface is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Declarations less visible than this are skipped
    pub access_filter: Access,
    /// Print members implied by other declarations (`init?(rawValue:)`)
    pub print_synthesized: bool,
    /// Print `///` documentation above declarations
    pub print_doc_comments: bool,
    /// Append extensions that imported modules declare on primary types
    pub print_overlay_extensions: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            access_filter: Access::Internal,
            print_synthesized: true,
            print_doc_comments: true,
            print_overlay_extensions: true,
        }
    }
}

impl PrintOptions {
    /// Indentation string for the given nesting level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}
