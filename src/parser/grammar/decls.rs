//! Declaration grammar
//!
//! ```text
//! SourceFile   = (Decl | TopLevelCode)*
//! Decl         = Attribute* Modifier* DeclBody
//! DeclBody     = Import | Nominal | Extension | TypeAlias | AssociatedType
//!              | Func | Init | Deinit | Subscript | Var | EnumCase
//! Nominal      = ('class' | 'struct' | 'enum' | 'protocol') Name GenericParams?
//!                Inheritance? Where? MemberBlock
//! ```

use super::exprs::{ExprEnd, parse_code_block, parse_expr};
use super::types::{parse_tuple_type, parse_type};
use super::*;

/// Tokens where member-level recovery stops
const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::R_BRACE,
    SyntaxKind::AT,
    SyntaxKind::CLASS_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::PROTOCOL_KW,
    SyntaxKind::EXTENSION_KW,
    SyntaxKind::TYPEALIAS_KW,
    SyntaxKind::ASSOCIATEDTYPE_KW,
    SyntaxKind::FUNC_KW,
    SyntaxKind::INIT_KW,
    SyntaxKind::DEINIT_KW,
    SyntaxKind::SUBSCRIPT_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::LET_KW,
    SyntaxKind::CASE_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::INTERNAL_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::FILEPRIVATE_KW,
];

const ACCESSOR_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::GET_KW,
    SyntaxKind::SET_KW,
    SyntaxKind::WILLSET_KW,
    SyntaxKind::DIDSET_KW,
];

/// Tokens that can form an operator function name such as `==` or `<=`
fn is_operator_name_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OPERATOR
            | SyntaxKind::SLASH
            | SyntaxKind::EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::BANG
            | SyntaxKind::AMP
            | SyntaxKind::QUESTION
            | SyntaxKind::DOT
    )
}

/// SourceFile = (Decl | TopLevelCode)*
pub fn parse_source_file<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::SOURCE_FILE);

    loop {
        p.skip_trivia();
        if p.at_eof() {
            break;
        }
        let pos_before = p.get_pos();
        if p.current_kind() == SyntaxKind::SEMICOLON {
            p.bump();
        } else if starts_declaration(p) {
            parse_decl(p);
        } else {
            parse_top_level_code(p);
        }
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error(format!("stuck on token: {:?}", p.current_kind()));
            p.bump();
        }
    }

    p.finish_node();
}

/// Whether the current token begins a declaration rather than a statement
fn starts_declaration<P: SwiftParser>(p: &P) -> bool {
    let kind = p.current_kind();
    if !kind.starts_decl() {
        return false;
    }
    // A contextual modifier used as an identifier (`lazy = 1`) is a statement.
    if kind.is_contextual_keyword() {
        let next = p.nth(1);
        return next.starts_decl() || next == SyntaxKind::L_PAREN;
    }
    true
}

/// Statements at file scope, kept as an opaque node
fn parse_top_level_code<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::TOP_LEVEL_CODE);
    let mut depth = 0usize;
    loop {
        match p.current_kind() {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        p.bump();
        if p.at_end() {
            break;
        }
        if depth == 0 && p.newline_ahead() && starts_declaration_after_trivia(p) {
            break;
        }
        p.skip_trivia();
    }
    p.finish_node();
}

fn starts_declaration_after_trivia<P: SwiftParser>(p: &P) -> bool {
    let kind = p.nth(0);
    if !kind.starts_decl() {
        return false;
    }
    if kind.is_contextual_keyword() {
        let next = p.nth(1);
        return next.starts_decl() || next == SyntaxKind::L_PAREN;
    }
    true
}

/// Decl = Attribute* Modifier* DeclBody
///
/// Attributes and modifiers are wrapped into the declaration node via a
/// checkpoint so the typed AST sees them as children of the declaration.
pub fn parse_decl<P: SwiftParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    let mut consumed_prefix = false;

    loop {
        let kind = p.current_kind();
        if kind == SyntaxKind::AT {
            parse_attribute(p);
        } else if kind == SyntaxKind::HASH {
            if consumed_prefix {
                break;
            }
            parse_pound_directive(p);
            return;
        } else if kind.is_access() || kind.is_modifier() {
            // `open` and friends are names when nothing declaration-like follows
            if kind.is_contextual_keyword() {
                let next = p.nth(1);
                if !(next.starts_decl() || next == SyntaxKind::L_PAREN) {
                    break;
                }
            }
            p.bump();
            if p.at(SyntaxKind::L_PAREN) {
                parse_modifier_detail(p);
            }
        } else if kind == SyntaxKind::CLASS_KW && class_is_modifier(p) {
            p.bump();
        } else {
            break;
        }
        consumed_prefix = true;
        p.skip_trivia();
    }

    let kind = match p.current_kind() {
        SyntaxKind::IMPORT_KW => SyntaxKind::IMPORT_DECL,
        SyntaxKind::CLASS_KW => SyntaxKind::CLASS_DECL,
        SyntaxKind::STRUCT_KW => SyntaxKind::STRUCT_DECL,
        SyntaxKind::ENUM_KW => SyntaxKind::ENUM_DECL,
        SyntaxKind::PROTOCOL_KW => SyntaxKind::PROTOCOL_DECL,
        SyntaxKind::EXTENSION_KW => SyntaxKind::EXTENSION_DECL,
        SyntaxKind::TYPEALIAS_KW => SyntaxKind::TYPEALIAS_DECL,
        SyntaxKind::ASSOCIATEDTYPE_KW => SyntaxKind::ASSOCIATEDTYPE_DECL,
        SyntaxKind::FUNC_KW => SyntaxKind::FUNC_DECL,
        SyntaxKind::INIT_KW => SyntaxKind::INIT_DECL,
        SyntaxKind::DEINIT_KW => SyntaxKind::DEINIT_DECL,
        SyntaxKind::SUBSCRIPT_KW => SyntaxKind::SUBSCRIPT_DECL,
        SyntaxKind::VAR_KW | SyntaxKind::LET_KW => SyntaxKind::VAR_DECL,
        SyntaxKind::CASE_KW => SyntaxKind::ENUM_CASE_DECL,
        other => {
            if consumed_prefix {
                p.start_node_at(checkpoint, SyntaxKind::ERROR);
                p.error(format!("expected declaration after modifiers, found {:?}", other));
                p.finish_node();
            } else {
                p.error_recover(
                    format!("expected declaration, found {:?}", other),
                    MEMBER_RECOVERY,
                );
            }
            return;
        }
    };

    p.start_node_at(checkpoint, kind);
    match kind {
        SyntaxKind::IMPORT_DECL => parse_import(p),
        SyntaxKind::CLASS_DECL
        | SyntaxKind::STRUCT_DECL
        | SyntaxKind::ENUM_DECL
        | SyntaxKind::PROTOCOL_DECL => parse_nominal(p),
        SyntaxKind::EXTENSION_DECL => parse_extension(p),
        SyntaxKind::TYPEALIAS_DECL => parse_typealias(p),
        SyntaxKind::ASSOCIATEDTYPE_DECL => parse_associatedtype(p),
        SyntaxKind::FUNC_DECL => parse_func(p),
        SyntaxKind::INIT_DECL => parse_init(p),
        SyntaxKind::DEINIT_DECL => parse_deinit(p),
        SyntaxKind::SUBSCRIPT_DECL => parse_subscript(p),
        SyntaxKind::VAR_DECL => parse_var(p),
        _ => parse_enum_case(p),
    }
    p.finish_node();
}

/// `class` is a modifier in `class func`, `class var`, `class final func`
fn class_is_modifier<P: SwiftParser>(p: &P) -> bool {
    let next = p.nth(1);
    next.is_decl_keyword() || next.is_access() || next.is_modifier()
}

/// Attribute = '@' Name ('(' ... ')')?
pub(crate) fn parse_attribute<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::ATTRIBUTE);
    p.bump(); // @
    if p.current_kind().is_name() || p.current_kind().is_keyword() {
        p.bump();
    } else {
        p.error("expected attribute name");
    }
    if p.at(SyntaxKind::L_PAREN) {
        bump_balanced_parens(p);
    }
    p.finish_node();
}

/// The `(set)` of `private(set)` or the `(safe)` of `unowned(safe)`
fn parse_modifier_detail<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::MODIFIER_DETAIL);
    bump_balanced_parens(p);
    p.finish_node();
}

/// `#if`, `#endif`, `#warning(...)`: consumed to the end of the line
fn parse_pound_directive<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::POUND_DIRECTIVE);
    p.bump(); // #
    while !p.at_end() && !p.newline_ahead() {
        p.skip_trivia();
        p.bump();
    }
    p.finish_node();
}

/// Import = 'import' ImportKind? ImportPath
fn parse_import<P: SwiftParser>(p: &mut P) {
    p.bump(); // import
    p.skip_trivia();
    // `import class Foo.Bar`
    if matches!(
        p.current_kind(),
        SyntaxKind::CLASS_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::PROTOCOL_KW
            | SyntaxKind::TYPEALIAS_KW
            | SyntaxKind::FUNC_KW
            | SyntaxKind::VAR_KW
            | SyntaxKind::LET_KW
    ) {
        p.bump();
        p.skip_trivia();
    }

    if !p.current_kind().is_name() {
        p.error("expected module name");
        return;
    }
    p.start_node(SyntaxKind::IMPORT_PATH);
    p.bump();
    while at_next(p, SyntaxKind::DOT) && p.nth(1).is_name() {
        p.skip_trivia();
        p.bump(); // .
        p.skip_trivia();
        p.bump();
    }
    p.finish_node();
}

/// Nominal = keyword Name GenericParams? Inheritance? Where? MemberBlock
fn parse_nominal<P: SwiftParser>(p: &mut P) {
    p.bump(); // class/struct/enum/protocol
    parse_name(p);
    parse_decl_header_tail(p);
    if at_next(p, SyntaxKind::L_BRACE) {
        parse_member_block(p);
    } else {
        p.skip_trivia();
        p.error("expected '{' to start the declaration body");
    }
}

fn parse_decl_header_tail<P: SwiftParser>(p: &mut P) {
    if at_next(p, SyntaxKind::LT) {
        p.skip_trivia();
        parse_generic_params(p);
    }
    if at_next(p, SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if at_next(p, SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
}

/// Extension = 'extension' Type Inheritance? Where? MemberBlock
fn parse_extension<P: SwiftParser>(p: &mut P) {
    p.bump(); // extension
    p.skip_trivia();
    parse_type(p);
    if at_next(p, SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if at_next(p, SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if at_next(p, SyntaxKind::L_BRACE) {
        parse_member_block(p);
    } else {
        p.skip_trivia();
        p.error("expected '{' to start the extension body");
    }
}

/// TypeAlias = 'typealias' Name GenericParams? '=' Type
fn parse_typealias<P: SwiftParser>(p: &mut P) {
    p.bump(); // typealias
    parse_name(p);
    if at_next(p, SyntaxKind::LT) {
        p.skip_trivia();
        parse_generic_params(p);
    }
    if eat_next(p, SyntaxKind::EQ) {
        p.skip_trivia();
        parse_type(p);
    } else {
        p.skip_trivia();
        p.error("expected '=' in typealias");
    }
}

/// AssociatedType = 'associatedtype' Name Inheritance? ('=' Type)? Where?
fn parse_associatedtype<P: SwiftParser>(p: &mut P) {
    p.bump(); // associatedtype
    parse_name(p);
    if at_next(p, SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if eat_next(p, SyntaxKind::EQ) {
        p.skip_trivia();
        parse_type(p);
    }
    if at_next(p, SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
}

/// Func = 'func' (Name | Operator) GenericParams? ParamList Effects? Result? Where? CodeBlock?
fn parse_func<P: SwiftParser>(p: &mut P) {
    p.bump(); // func
    p.skip_trivia();
    if is_operator_name_token(p.current_kind()) {
        p.start_node(SyntaxKind::NAME);
        while is_operator_name_token(p.current_kind()) {
            p.bump();
        }
        p.finish_node();
    } else {
        parse_name(p);
    }
    if at_next(p, SyntaxKind::LT) {
        p.skip_trivia();
        parse_generic_params(p);
    }
    parse_signature_tail(p, true);
}

/// Init = 'init' ('?' | '!')? GenericParams? ParamList Effects? Where? CodeBlock?
fn parse_init<P: SwiftParser>(p: &mut P) {
    p.bump(); // init
    if p.at(SyntaxKind::QUESTION) || p.at(SyntaxKind::BANG) {
        p.bump();
    }
    if at_next(p, SyntaxKind::LT) {
        p.skip_trivia();
        parse_generic_params(p);
    }
    parse_signature_tail(p, false);
}

/// Shared tail of functions and initializers
fn parse_signature_tail<P: SwiftParser>(p: &mut P, allow_result: bool) {
    if at_next(p, SyntaxKind::L_PAREN) {
        parse_param_list(p);
    } else {
        p.skip_trivia();
        p.error("expected parameter list");
    }
    if !eat_next(p, SyntaxKind::THROWS_KW) {
        eat_next(p, SyntaxKind::RETHROWS_KW);
    }
    if allow_result && at_next(p, SyntaxKind::ARROW) {
        parse_result_clause(p);
    }
    if at_next(p, SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if at_next(p, SyntaxKind::L_BRACE) {
        p.skip_trivia();
        parse_code_block(p);
    }
}

/// Deinit = 'deinit' CodeBlock?
fn parse_deinit<P: SwiftParser>(p: &mut P) {
    p.bump(); // deinit
    if at_next(p, SyntaxKind::L_BRACE) {
        p.skip_trivia();
        parse_code_block(p);
    }
}

/// Subscript = 'subscript' GenericParams? ParamList Result Where? AccessorBlock?
fn parse_subscript<P: SwiftParser>(p: &mut P) {
    p.bump(); // subscript
    if at_next(p, SyntaxKind::LT) {
        p.skip_trivia();
        parse_generic_params(p);
    }
    if at_next(p, SyntaxKind::L_PAREN) {
        parse_param_list(p);
    } else {
        p.skip_trivia();
        p.error("expected subscript parameters");
    }
    if at_next(p, SyntaxKind::ARROW) {
        parse_result_clause(p);
    } else {
        p.skip_trivia();
        p.error("expected '->' in subscript");
    }
    if at_next(p, SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if at_next(p, SyntaxKind::L_BRACE) {
        parse_accessor_block(p);
    }
}

/// Var = ('var' | 'let') PatternBinding (',' PatternBinding)*
fn parse_var<P: SwiftParser>(p: &mut P) {
    p.bump(); // var/let
    loop {
        p.skip_trivia();
        p.start_node(SyntaxKind::PATTERN_BINDING);
        parse_name(p);
        if at_next(p, SyntaxKind::COLON) {
            p.skip_trivia();
            p.start_node(SyntaxKind::TYPE_ANNOTATION);
            p.bump(); // :
            p.skip_trivia();
            if p.at(SyntaxKind::AT) {
                parse_attribute(p);
                p.skip_trivia();
            }
            parse_type(p);
            p.finish_node();
        }
        if at_next(p, SyntaxKind::EQ) {
            p.skip_trivia();
            p.start_node(SyntaxKind::INITIALIZER);
            p.bump(); // =
            p.skip_trivia();
            parse_expr(p, ExprEnd::Initializer);
            p.finish_node();
        }
        if at_next(p, SyntaxKind::L_BRACE) {
            parse_accessor_block(p);
        }
        p.finish_node();
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
}

/// EnumCase = 'case' CaseElement (',' CaseElement)*
fn parse_enum_case<P: SwiftParser>(p: &mut P) {
    p.bump(); // case
    loop {
        p.skip_trivia();
        p.start_node(SyntaxKind::ENUM_CASE_ELEMENT);
        parse_name(p);
        if p.at(SyntaxKind::L_PAREN) {
            parse_tuple_type(p);
        }
        if at_next(p, SyntaxKind::EQ) {
            p.skip_trivia();
            p.start_node(SyntaxKind::RAW_VALUE);
            p.bump(); // =
            p.skip_trivia();
            parse_expr(p, ExprEnd::ListItem);
            p.finish_node();
        }
        p.finish_node();
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
}

/// GenericParams = '<' GenericParam (',' GenericParam)* '>'
fn parse_generic_params<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::GENERIC_PARAM_LIST);
    p.bump(); // <
    loop {
        p.skip_trivia();
        if p.at(SyntaxKind::GT) || p.at_eof() {
            break;
        }
        p.start_node(SyntaxKind::GENERIC_PARAM);
        parse_name(p);
        if eat_next(p, SyntaxKind::COLON) {
            p.skip_trivia();
            parse_type(p);
        }
        p.finish_node();
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
    expect_next(p, SyntaxKind::GT);
    p.finish_node();
}

/// Inheritance = ':' (Type | 'class') (',' (Type | 'class'))*
fn parse_inheritance<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::INHERITANCE_CLAUSE);
    p.bump(); // :
    loop {
        p.skip_trivia();
        if p.at(SyntaxKind::CLASS_KW) {
            p.bump();
        } else {
            parse_type(p);
        }
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// Where = 'where' requirement-tokens, kept opaque up to the body
fn parse_where_clause<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::WHERE_CLAUSE);
    p.bump(); // where
    while !p.at_end() && !at_next(p, SyntaxKind::L_BRACE) && !at_next(p, SyntaxKind::R_BRACE) {
        if p.newline_ahead() && p.nth(0).starts_decl() {
            break;
        }
        p.skip_trivia();
        p.bump();
    }
    p.finish_node();
}

/// MemberBlock = '{' Decl* '}'
fn parse_member_block<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::MEMBER_BLOCK);
    p.bump(); // {
    loop {
        p.skip_trivia();
        if p.at_eof() || p.at(SyntaxKind::R_BRACE) {
            break;
        }
        if p.at(SyntaxKind::SEMICOLON) {
            p.bump();
            continue;
        }
        let pos_before = p.get_pos();
        if starts_declaration(p) || p.at(SyntaxKind::HASH) {
            parse_decl(p);
        } else {
            p.error_recover(
                format!("expected member declaration, found {:?}", p.current_kind()),
                MEMBER_RECOVERY,
            );
        }
        if p.get_pos() == pos_before && !p.at_eof() {
            p.bump();
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// ParamList = '(' (Param (',' Param)*)? ')'
fn parse_param_list<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::PARAM_LIST);
    p.bump(); // (
    loop {
        p.skip_trivia();
        if p.at(SyntaxKind::R_PAREN) || p.at_eof() {
            break;
        }
        let pos_before = p.get_pos();
        parse_param(p);
        if p.get_pos() == pos_before {
            p.error_recover("expected parameter", &[SyntaxKind::COMMA, SyntaxKind::R_PAREN]);
        }
        if !eat_next(p, SyntaxKind::COMMA) {
            break;
        }
    }
    expect_next(p, SyntaxKind::R_PAREN);
    p.finish_node();
}

/// Param = Name Name? ':' 'inout'? Type '...'? DefaultArg?
fn parse_param<P: SwiftParser>(p: &mut P) {
    if !p.current_kind().is_name() {
        return;
    }
    p.start_node(SyntaxKind::PARAM);
    parse_name(p);
    if p.nth(0).is_name() {
        parse_name(p);
    }
    if expect_next(p, SyntaxKind::COLON) {
        p.skip_trivia();
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
    }
    if at_next(p, SyntaxKind::EQ) {
        p.skip_trivia();
        p.start_node(SyntaxKind::DEFAULT_ARG);
        p.bump(); // =
        p.skip_trivia();
        parse_expr(p, ExprEnd::ListItem);
        p.finish_node();
    }
    p.finish_node();
}

/// Result = '->' Type
fn parse_result_clause<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::RESULT_CLAUSE);
    p.bump(); // ->
    p.skip_trivia();
    while p.at(SyntaxKind::AT) {
        parse_attribute(p);
        p.skip_trivia();
    }
    parse_type(p);
    p.finish_node();
}

/// AccessorBlock = '{' Accessor* '}' | '{' statements '}'
fn parse_accessor_block<P: SwiftParser>(p: &mut P) {
    p.skip_trivia();
    p.start_node(SyntaxKind::ACCESSOR_BLOCK);

    let is_accessor_list = {
        let first = p.nth(1);
        ACCESSOR_KEYWORDS.contains(&first)
            || first == SyntaxKind::AT
            || (matches!(first, SyntaxKind::MUTATING_KW | SyntaxKind::NONMUTATING_KW)
                && ACCESSOR_KEYWORDS.contains(&p.nth(2)))
            || (first.is_access() && ACCESSOR_KEYWORDS.contains(&p.nth(2)))
    };

    if !is_accessor_list {
        // Implicit getter: the whole block is the getter body
        parse_code_block(p);
        p.finish_node();
        return;
    }

    p.bump(); // {
    loop {
        p.skip_trivia();
        if p.at_eof() || p.at(SyntaxKind::R_BRACE) {
            break;
        }
        let kind = p.current_kind();
        if ACCESSOR_KEYWORDS.contains(&kind)
            || kind == SyntaxKind::AT
            || kind.is_access()
            || matches!(kind, SyntaxKind::MUTATING_KW | SyntaxKind::NONMUTATING_KW)
        {
            parse_accessor(p);
        } else {
            p.error_recover(
                format!("expected accessor, found {:?}", kind),
                &[
                    SyntaxKind::R_BRACE,
                    SyntaxKind::GET_KW,
                    SyntaxKind::SET_KW,
                    SyntaxKind::WILLSET_KW,
                    SyntaxKind::DIDSET_KW,
                ],
            );
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// Accessor = Attribute* Modifier* ('get' | 'set' | 'willSet' | 'didSet') ('(' Name ')')? CodeBlock?
fn parse_accessor<P: SwiftParser>(p: &mut P) {
    p.start_node(SyntaxKind::ACCESSOR);
    while !p.at_eof() && !ACCESSOR_KEYWORDS.contains(&p.current_kind()) {
        if p.at(SyntaxKind::AT) {
            parse_attribute(p);
        } else {
            p.bump();
        }
        p.skip_trivia();
    }
    if !p.at_eof() {
        p.bump(); // get/set/willSet/didSet
    }
    if at_next(p, SyntaxKind::L_PAREN) {
        p.skip_trivia();
        bump_balanced_parens(p);
    }
    if at_next(p, SyntaxKind::L_BRACE) {
        p.skip_trivia();
        parse_code_block(p);
    }
    p.finish_node();
}
