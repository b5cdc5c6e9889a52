//! Type grammar
//!
//! ```text
//! Type        = FunctionType | PostfixType ('&' PostfixType)*
//! FunctionType= TupleType ('throws' | 'rethrows')? '->' Type
//! PostfixType = PrimaryType ('?' | '!')*
//! PrimaryType = PathType | ArrayType | DictionaryType | TupleType
//! PathType    = TypeSegment ('.' TypeSegment)*
//! TypeSegment = Name GenericArgs?
//! ```

use super::decls::parse_attribute;
use super::*;

/// Parse a type at the current (non-trivia) position
pub fn parse_type<P: SwiftParser>(p: &mut P) {
    while p.at(SyntaxKind::AT) {
        parse_attribute(p);
        p.skip_trivia();
    }

    let checkpoint = p.checkpoint();
    let starts_with_paren = p.at(SyntaxKind::L_PAREN);
    parse_postfix_type(p);

    if starts_with_paren
        && (at_next(p, SyntaxKind::ARROW)
            || at_next(p, SyntaxKind::THROWS_KW)
            || at_next(p, SyntaxKind::RETHROWS_KW))
    {
        p.start_node_at(checkpoint, SyntaxKind::FUNCTION_TYPE);
        if !eat_next(p, SyntaxKind::THROWS_KW) {
            eat_next(p, SyntaxKind::RETHROWS_KW);
        }
        expect_next(p, SyntaxKind::ARROW);
        p.skip_trivia();
        parse_type(p);
        p.finish_node();
        return;
    }

    if at_next(p, SyntaxKind::AMP) {
        p.start_node_at(checkpoint, SyntaxKind::COMPOSITION_TYPE);
        while eat_next(p, SyntaxKind::AMP) {
            p.skip_trivia();
            parse_postfix_type(p);
        }
        p.finish_node();
    }
}

/// PostfixType = PrimaryType ('?' | '!')*
///
/// The postfix operators must be adjacent to the type they modify.
fn parse_postfix_type<P: SwiftParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_primary_type(p);
    loop {
        let kind = if p.at(SyntaxKind::QUESTION) {
            SyntaxKind::OPTIONAL_TYPE
        } else if p.at(SyntaxKind::BANG) {
            SyntaxKind::IUO_TYPE
        } else {
            break;
        };
        p.start_node_at(checkpoint, kind);
        p.bump();
        p.finish_node();
    }
}

fn parse_primary_type<P: SwiftParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::L_BRACKET => parse_collection_type(p),
        SyntaxKind::L_PAREN => parse_tuple_type(p),
        kind if kind.is_name() || kind == SyntaxKind::SELF_TYPE_KW => parse_path_type(p),
        _ => p.error("expected type"),
    }
}

/// PathType = TypeSegment ('.' TypeSegment)*
pub(crate) fn parse_path_type<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::PATH_TYPE);
    loop {
        p.start_node(SyntaxKind::TYPE_SEGMENT);
        p.bump(); // segment name
        if p.at(SyntaxKind::LT) {
            parse_generic_args(p);
        }
        p.finish_node();

        let next = p.nth(1);
        if at_next(p, SyntaxKind::DOT) && (next.is_name() || next == SyntaxKind::SELF_TYPE_KW) {
            p.skip_trivia();
            p.bump(); // .
            p.skip_trivia();
        } else {
            break;
        }
    }
    p.finish_node();
}

/// GenericArgs = '<' Type (',' Type)* '>'
fn parse_generic_args<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::GENERIC_ARG_LIST);
    p.bump(); // <
    loop {
        p.skip_trivia();
        if p.at(SyntaxKind::GT) || p.at_eof() {
            break;
        }
        parse_type(p);
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
    expect_next(p, SyntaxKind::GT);
    p.finish_node();
}

/// ArrayType = '[' Type ']' ; DictionaryType = '[' Type ':' Type ']'
fn parse_collection_type<P: SwiftParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    p.bump(); // [
    p.skip_trivia();
    parse_type(p);
    let kind = if eat_next(p, SyntaxKind::COLON) {
        p.skip_trivia();
        parse_type(p);
        SyntaxKind::DICTIONARY_TYPE
    } else {
        SyntaxKind::ARRAY_TYPE
    };
    expect_next(p, SyntaxKind::R_BRACKET);
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

/// TupleType = '(' (TupleTypeElement (',' TupleTypeElement)*)? ')'
///
/// Also used for enum case payloads, which share the element syntax.
pub fn parse_tuple_type<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::TUPLE_TYPE);
    p.bump(); // (
    loop {
        p.skip_trivia();
        if p.at(SyntaxKind::R_PAREN) || p.at_eof() {
            break;
        }
        let pos_before = p.get_pos();
        parse_tuple_element(p);
        if p.get_pos() == pos_before {
            p.error_recover("expected tuple element", &[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
        }
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
    expect_next(p, SyntaxKind::R_PAREN);
    p.finish_node();
}

/// TupleTypeElement = (Name Name? ':')? 'inout'? Type '...'? ('=' Expr)?
fn parse_tuple_element<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::TUPLE_TYPE_ELEMENT);
    let kind = p.current_kind();
    if kind.is_name() && p.nth(1) == SyntaxKind::COLON {
        parse_name(p);
        expect_next(p, SyntaxKind::COLON);
        p.skip_trivia();
    } else if kind.is_name() && p.nth(1).is_name() && p.nth(2) == SyntaxKind::COLON {
        parse_name(p);
        parse_name(p);
        expect_next(p, SyntaxKind::COLON);
        p.skip_trivia();
    }
    while p.at(SyntaxKind::AT) {
        parse_attribute(p);
        p.skip_trivia();
    }
    if p.at(SyntaxKind::INOUT_KW) {
        p.bump();
        p.skip_trivia();
    }
    parse_type(p);
    eat_next(p, SyntaxKind::ELLIPSIS);
    if at_next(p, SyntaxKind::EQ) {
        p.skip_trivia();
        p.start_node(SyntaxKind::DEFAULT_ARG);
        p.bump(); // =
        p.skip_trivia();
        super::exprs::parse_expr(p, super::exprs::ExprEnd::ListItem);
        p.finish_node();
    }
    p.finish_node();
}
