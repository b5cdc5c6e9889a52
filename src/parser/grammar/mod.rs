//! Grammar rules for the Swift subset
//!
//! The parsing functions are generic over [`SwiftParser`] so the grammar is
//! decoupled from the token buffer and tree builder that drive it:
//! - `decls` - imports, nominal types, extensions, members, attributes and modifiers
//! - `types` - type syntax (paths, collections, optionals, tuples, functions)
//! - `exprs` - balanced token runs for bodies, initializers and default arguments
//!
//! Conventions: every `parse_*` function starts on the first non-trivia token
//! of its construct and stops right after its last token, so trailing trivia
//! (including the doc comment of the next declaration) stays with the parent.

use crate::parser::syntax_kind::SyntaxKind;
use rowan::Checkpoint;

pub mod decls;
pub mod exprs;
pub mod types;

pub use decls::{parse_decl, parse_source_file};
pub use types::parse_type;

/// Interface between the grammar rules and the parser state
pub trait SwiftParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn at(&self, kind: SyntaxKind) -> bool;
    fn at_any(&self, kinds: &[SyntaxKind]) -> bool;
    fn at_eof(&self) -> bool;

    /// Peek at the kind of the nth non-trivia token ahead
    fn nth(&self, n: usize) -> SyntaxKind;

    /// Text of the nth non-trivia token ahead
    fn nth_text(&self, n: usize) -> &str;

    /// True if only trivia remains
    fn at_end(&self) -> bool;

    /// True if the trivia run starting at the current position contains a newline
    fn newline_ahead(&self) -> bool;

    // Position tracking
    fn get_pos(&self) -> usize;

    // Token consumption
    fn bump(&mut self);
    fn expect(&mut self, kind: SyntaxKind) -> bool;
    fn skip_trivia(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Errors
    fn error(&mut self, message: impl Into<String>);
    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]);
}

/// Whether the next non-trivia token is `kind`
#[inline]
pub(crate) fn at_next<P: SwiftParser>(p: &P, kind: SyntaxKind) -> bool {
    p.nth(0) == kind && !p.at_end()
}

/// Skip trivia and consume `kind` if it is next
#[inline]
pub(crate) fn eat_next<P: SwiftParser>(p: &mut P, kind: SyntaxKind) -> bool {
    if at_next(p, kind) {
        p.skip_trivia();
        p.bump();
        true
    } else {
        false
    }
}

/// Skip trivia and expect `kind`
#[inline]
pub(crate) fn expect_next<P: SwiftParser>(p: &mut P, kind: SyntaxKind) -> bool {
    p.skip_trivia();
    p.expect(kind)
}

/// Parse a `NAME` node if a name token is next
pub(crate) fn parse_name<P: SwiftParser>(p: &mut P) -> bool {
    if p.nth(0).is_name() && !p.at_end() {
        p.skip_trivia();
        p.start_node(SyntaxKind::NAME);
        p.bump();
        p.finish_node();
        true
    } else {
        p.skip_trivia();
        p.error("expected a name");
        false
    }
}

/// Consume a balanced `(...)` group starting at the current `(`
pub(crate) fn bump_balanced_parens<P: SwiftParser>(p: &mut P) {
    let mut depth = 0usize;
    while !p.at_eof() {
        match p.current_kind() {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    p.bump();
                    return;
                }
            }
            _ => {}
        }
        p.bump();
    }
}
