//! Logos-based lexer for the Swift subset
//!
//! Fast tokenization using the logos crate. The lexer is lossless: every
//! byte of the input ends up in exactly one token, trivia included.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"`[a-zA-Z_][a-zA-Z0-9_]*`")]
    BacktickIdent,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9a-fA-F_]+")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("->")]
    Arrow,

    #[token("...")]
    Ellipsis,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("/")]
    Slash,

    #[regex(r"[-+*%|^~]+")]
    Operator,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("struct")]
    StructKw,
    #[token("enum")]
    EnumKw,
    #[token("protocol")]
    ProtocolKw,
    #[token("extension")]
    ExtensionKw,
    #[token("typealias")]
    TypealiasKw,
    #[token("associatedtype")]
    AssociatedtypeKw,
    #[token("func")]
    FuncKw,
    #[token("init")]
    InitKw,
    #[token("deinit")]
    DeinitKw,
    #[token("subscript")]
    SubscriptKw,
    #[token("var")]
    VarKw,
    #[token("let")]
    LetKw,
    #[token("case")]
    CaseKw,
    #[token("public")]
    PublicKw,
    #[token("internal")]
    InternalKw,
    #[token("private")]
    PrivateKw,
    #[token("fileprivate")]
    FileprivateKw,
    #[token("open")]
    OpenKw,
    #[token("static")]
    StaticKw,
    #[token("final")]
    FinalKw,
    #[token("override")]
    OverrideKw,
    #[token("mutating")]
    MutatingKw,
    #[token("nonmutating")]
    NonmutatingKw,
    #[token("required")]
    RequiredKw,
    #[token("convenience")]
    ConvenienceKw,
    #[token("optional")]
    OptionalKw,
    #[token("lazy")]
    LazyKw,
    #[token("weak")]
    WeakKw,
    #[token("unowned")]
    UnownedKw,
    #[token("dynamic")]
    DynamicKw,
    #[token("indirect")]
    IndirectKw,
    #[token("get")]
    GetKw,
    #[token("set")]
    SetKw,
    #[token("willSet")]
    WillSetKw,
    #[token("didSet")]
    DidSetKw,
    #[token("throws")]
    ThrowsKw,
    #[token("rethrows")]
    RethrowsKw,
    #[token("where")]
    WhereKw,
    #[token("inout")]
    InoutKw,
    #[token("Self")]
    SelfTypeKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("nil")]
    NilKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            BacktickIdent => SyntaxKind::BACKTICK_IDENT,
            Integer => SyntaxKind::INTEGER,
            Float => SyntaxKind::FLOAT,
            String => SyntaxKind::STRING,

            // Punctuation
            Arrow => SyntaxKind::ARROW,
            Ellipsis => SyntaxKind::ELLIPSIS,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            At => SyntaxKind::AT,
            Hash => SyntaxKind::HASH,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            Amp => SyntaxKind::AMP,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Slash => SyntaxKind::SLASH,
            Operator => SyntaxKind::OPERATOR,

            // Keywords
            ImportKw => SyntaxKind::IMPORT_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            ProtocolKw => SyntaxKind::PROTOCOL_KW,
            ExtensionKw => SyntaxKind::EXTENSION_KW,
            TypealiasKw => SyntaxKind::TYPEALIAS_KW,
            AssociatedtypeKw => SyntaxKind::ASSOCIATEDTYPE_KW,
            FuncKw => SyntaxKind::FUNC_KW,
            InitKw => SyntaxKind::INIT_KW,
            DeinitKw => SyntaxKind::DEINIT_KW,
            SubscriptKw => SyntaxKind::SUBSCRIPT_KW,
            VarKw => SyntaxKind::VAR_KW,
            LetKw => SyntaxKind::LET_KW,
            CaseKw => SyntaxKind::CASE_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            FileprivateKw => SyntaxKind::FILEPRIVATE_KW,
            OpenKw => SyntaxKind::OPEN_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            FinalKw => SyntaxKind::FINAL_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            MutatingKw => SyntaxKind::MUTATING_KW,
            NonmutatingKw => SyntaxKind::NONMUTATING_KW,
            RequiredKw => SyntaxKind::REQUIRED_KW,
            ConvenienceKw => SyntaxKind::CONVENIENCE_KW,
            OptionalKw => SyntaxKind::OPTIONAL_KW,
            LazyKw => SyntaxKind::LAZY_KW,
            WeakKw => SyntaxKind::WEAK_KW,
            UnownedKw => SyntaxKind::UNOWNED_KW,
            DynamicKw => SyntaxKind::DYNAMIC_KW,
            IndirectKw => SyntaxKind::INDIRECT_KW,
            GetKw => SyntaxKind::GET_KW,
            SetKw => SyntaxKind::SET_KW,
            WillSetKw => SyntaxKind::WILLSET_KW,
            DidSetKw => SyntaxKind::DIDSET_KW,
            ThrowsKw => SyntaxKind::THROWS_KW,
            RethrowsKw => SyntaxKind::RETHROWS_KW,
            WhereKw => SyntaxKind::WHERE_KW,
            InoutKw => SyntaxKind::INOUT_KW,
            SelfTypeKw => SyntaxKind::SELF_TYPE_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NilKw => SyntaxKind::NIL_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input)
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_class_header() {
        let tokens: Vec<_> = Lexer::new("public class Foo").collect();
        assert_eq!(tokens.len(), 5); // public, ws, class, ws, Foo
        assert_eq!(tokens[0].kind, SyntaxKind::PUBLIC_KW);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::CLASS_KW);
        assert_eq!(tokens[4].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[4].offset, TextSize::new(13));
    }

    #[test]
    fn test_lex_function_signature() {
        assert_eq!(
            kinds("func f(_ x: Int...) throws -> [String]"),
            vec![
                SyntaxKind::FUNC_KW,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::IDENT,
                SyntaxKind::IDENT,
                SyntaxKind::COLON,
                SyntaxKind::IDENT,
                SyntaxKind::ELLIPSIS,
                SyntaxKind::R_PAREN,
                SyntaxKind::THROWS_KW,
                SyntaxKind::ARROW,
                SyntaxKind::L_BRACKET,
                SyntaxKind::IDENT,
                SyntaxKind::R_BRACKET,
            ]
        );
    }

    #[test]
    fn test_lex_nested_generics_keep_angle_brackets_separate() {
        let k = kinds("Array<Array<Int>>");
        assert_eq!(k.iter().filter(|k| **k == SyntaxKind::GT).count(), 2);
    }

    #[test]
    fn test_lex_comments() {
        let tokens: Vec<_> = Lexer::new("// line\n/* block ** */x").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[3].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_literals() {
        assert_eq!(
            kinds(r#"42 0xFF 3.5 "a\"b" true nil"#),
            vec![
                SyntaxKind::INTEGER,
                SyntaxKind::INTEGER,
                SyntaxKind::FLOAT,
                SyntaxKind::STRING,
                SyntaxKind::TRUE_KW,
                SyntaxKind::NIL_KW,
            ]
        );
    }

    #[test]
    fn test_lex_is_lossless() {
        let input = "extension ET {\n  func foo() { let x = 1 + 2 }\n}\n";
        let rebuilt: String = Lexer::new(input).map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }
}
