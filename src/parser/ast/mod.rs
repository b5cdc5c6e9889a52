//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Swift syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::TextRange;

// ============================================================================
// Helper utilities for reducing code duplication
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Macro to generate boolean property methods that check for a specific token kind.
macro_rules! has_token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token.")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
    ($name:ident, $kind:ident, $example:literal) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token (e.g., `", $example, "`).")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate a method that maps token kinds to enum variants.
macro_rules! token_to_enum_method {
    ($name:ident, $enum_type:ident, [$($token:ident => $variant:ident),+ $(,)?]) => {
        pub fn $name(&self) -> Option<$enum_type> {
            for token in self.0.children_with_tokens().filter_map(|e| e.into_token()) {
                match token.kind() {
                    $(SyntaxKind::$token => return Some($enum_type::$variant),)+
                    _ => {}
                }
            }
            None
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// Extract the documentation comment preceding this node.
    /// Recognizes consecutive `///` lines or a single `/** ... */` block.
    fn doc_comment(&self) -> Option<String> {
        extract_doc_comment(self.syntax())
    }
}

/// Extract a Swift documentation comment from the trivia preceding a node.
///
/// Plain `//` and `/* */` comments are not documentation and end the search.
/// Whitespace containing a blank line also ends it.
pub fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut comments = Vec::new();
    let mut current = node.prev_sibling_or_token();

    while let Some(node_or_token) = current {
        let rowan::NodeOrToken::Token(t) = node_or_token else {
            break;
        };
        match t.kind() {
            SyntaxKind::WHITESPACE => {
                if t.text().matches('\n').count() > 1 {
                    break;
                }
                current = t.prev_sibling_or_token();
            }
            SyntaxKind::LINE_COMMENT => {
                let Some(content) = t.text().strip_prefix("///") else {
                    break;
                };
                comments.push(content.trim().to_string());
                current = t.prev_sibling_or_token();
            }
            SyntaxKind::BLOCK_COMMENT => {
                if comments.is_empty() {
                    if let Some(content) = t
                        .text()
                        .strip_prefix("/**")
                        .and_then(|s| s.strip_suffix("*/"))
                    {
                        comments.push(clean_doc_comment(content));
                    }
                }
                break;
            }
            _ => break,
        }
    }

    if comments.is_empty() {
        return None;
    }

    // Reverse because we collected bottom-up
    comments.reverse();
    Some(comments.join("\n"))
}

/// Clean up doc comment content by removing leading asterisks and normalizing whitespace.
fn clean_doc_comment(s: &str) -> String {
    s.lines()
        .map(|line| {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix('*') {
                rest.trim_start().to_string()
            } else {
                trimmed.to_string()
            }
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// The identifier text, without backticks
    pub fn text(&self) -> String {
        let text = self.0.text().to_string();
        text.trim_matches('`').to_string()
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

/// Access and declaration modifiers attached to a declaration node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclModifiers {
    /// `public`, `private`, ... (the last one written wins)
    pub access: Option<SyntaxKind>,
    /// The keyword of `private(set)`-style setter access
    pub setter_access: Option<SyntaxKind>,
    /// Non-access modifiers in source order; `class` appears as `CLASS_KW`
    pub modifiers: Vec<SyntaxKind>,
}

impl DeclModifiers {
    pub fn has(&self, kind: SyntaxKind) -> bool {
        self.modifiers.contains(&kind)
    }
}

/// Collect modifiers written before the declaration's introducer keyword
pub(crate) fn collect_modifiers(node: &SyntaxNode, introducer: &[SyntaxKind]) -> DeclModifiers {
    let mut result = DeclModifiers::default();
    let mut pending_access: Option<SyntaxKind> = None;
    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Token(t) => {
                let kind = t.kind();
                if introducer.contains(&kind) {
                    break;
                }
                if kind.is_access() {
                    if let Some(previous) = pending_access.replace(kind) {
                        result.access = Some(previous);
                    }
                } else if kind.is_modifier() || kind == SyntaxKind::CLASS_KW {
                    result.modifiers.push(kind);
                }
            }
            rowan::NodeOrToken::Node(n) => {
                // `private(set)` binds the preceding access keyword to the setter
                if n.kind() == SyntaxKind::MODIFIER_DETAIL && n.text().to_string().contains("set") {
                    if let Some(access) = pending_access.take() {
                        result.setter_access = Some(access);
                    }
                }
            }
        }
    }
    if let Some(access) = pending_access {
        result.access = Some(access);
    }
    result
}

// Submodules — declared after macros so macro_rules! are in scope
mod decls;
mod types;

pub use self::decls::*;
pub use self::types::*;
