//! Expressions and bodies
//!
//! Expressions are never interpreted beyond literal type inference, so the
//! grammar only has to find where they end. Bodies are balanced brace runs.

use super::*;

/// Where an expression run stops at nesting depth zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprEnd {
    /// Variable initializer: also stops at a line break before the next
    /// declaration and before a `{ willSet/didSet }` observer block
    Initializer,
    /// Default argument or raw value: stops at `,` or a closing delimiter
    ListItem,
}

fn is_closing(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE
    )
}

fn is_opening(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE
    )
}

/// Tokens allowed inside the generic arguments of a callee
const GENERIC_ARG_TOKENS: &[SyntaxKind] = &[
    SyntaxKind::DOT,
    SyntaxKind::COMMA,
    SyntaxKind::COLON,
    SyntaxKind::QUESTION,
    SyntaxKind::BANG,
    SyntaxKind::AMP,
    SyntaxKind::ARROW,
    SyntaxKind::L_BRACKET,
    SyntaxKind::R_BRACKET,
    SyntaxKind::L_PAREN,
    SyntaxKind::R_PAREN,
];

/// Whether a constructor-style callee `A.B<T>(` starts here
fn at_call_path<P: SwiftParser>(p: &P) -> bool {
    let mut n = 0;
    loop {
        if !p.nth(n).is_name() {
            return false;
        }
        if p.nth(n + 1) != SyntaxKind::DOT {
            break;
        }
        n += 2;
    }
    n += 1;
    if p.nth(n) == SyntaxKind::LT {
        let mut depth = 0usize;
        loop {
            match p.nth(n) {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                kind if kind.is_name() || GENERIC_ARG_TOKENS.contains(&kind) => {}
                _ => return false,
            }
            n += 1;
        }
        n += 1;
    }
    p.nth(n) == SyntaxKind::L_PAREN
}

/// Expr = PathType? balanced token run
///
/// A leading constructor-style callee is parsed as a `PATH_TYPE` so its
/// generic arguments can be lowered like any other type.
pub fn parse_expr<P: SwiftParser>(p: &mut P, end: ExprEnd) {
    p.start_node(SyntaxKind::EXPR);
    let mut depth = 0usize;
    let mut consumed = false;

    if at_call_path(p) {
        super::types::parse_path_type(p);
        consumed = true;
    }

    loop {
        if p.at_end() {
            break;
        }
        let kind = p.nth(0);
        if depth == 0 {
            if is_closing(kind) || matches!(kind, SyntaxKind::COMMA | SyntaxKind::SEMICOLON) {
                break;
            }
            if end == ExprEnd::Initializer && consumed {
                if p.newline_ahead() && kind.starts_decl() {
                    break;
                }
                if kind == SyntaxKind::L_BRACE
                    && matches!(p.nth(1), SyntaxKind::WILLSET_KW | SyntaxKind::DIDSET_KW)
                {
                    break;
                }
            }
        }

        if is_opening(kind) {
            depth += 1;
        } else if is_closing(kind) {
            depth -= 1;
        }
        if consumed {
            p.skip_trivia();
        }
        p.bump();
        consumed = true;
    }

    p.finish_node();
}

/// CodeBlock = '{' balanced-tokens '}'
pub fn parse_code_block<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::CODE_BLOCK);
    let mut depth = 0usize;
    while !p.at_eof() {
        match p.current_kind() {
            SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_BRACE => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    p.bump();
                    p.finish_node();
                    return;
                }
            }
            _ => {}
        }
        p.bump();
    }
    p.error("unterminated block");
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    fn initializer_text(input: &str) -> String {
        let parse = parse(input);
        parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EXPR)
            .map(|n| n.text().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_initializer_expr_spans_operators() {
        assert_eq!(initializer_text("let x = a + b * (c - 1)\n"), "a + b * (c - 1)");
    }

    #[test]
    fn test_initializer_expr_excludes_trailing_trivia() {
        assert_eq!(initializer_text("let x = 1 // one\nlet y = 2"), "1");
    }

    #[test]
    fn test_closure_initializer_is_balanced() {
        assert_eq!(
            initializer_text("let f = { (a: Int) -> Int in\n  return a\n}()\nfunc g() {}"),
            "{ (a: Int) -> Int in\n  return a\n}()"
        );
    }

    #[test]
    fn test_unterminated_block_reports_error() {
        let parse = parse("func f() {\n  let x = 1\n");
        assert!(!parse.ok());
    }
}
