//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the Swift subset understood by the interface generator.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, types, blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,          // foo
    BACKTICK_IDENT, // `default`
    INTEGER,        // 42, 0xFF
    FLOAT,          // 3.14
    STRING,         // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    DOT,       // .
    ELLIPSIS,  // ...
    EQ,        // =
    AT,        // @
    HASH,      // #
    QUESTION,  // ?
    BANG,      // !
    AMP,       // &
    LT,        // <
    GT,        // >
    ARROW,     // ->
    SLASH,     // /
    OPERATOR,  // + - * % | ^ ~ runs

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Declarations
    IMPORT_KW,
    CLASS_KW,
    STRUCT_KW,
    ENUM_KW,
    PROTOCOL_KW,
    EXTENSION_KW,
    TYPEALIAS_KW,
    ASSOCIATEDTYPE_KW,
    FUNC_KW,
    INIT_KW,
    DEINIT_KW,
    SUBSCRIPT_KW,
    VAR_KW,
    LET_KW,
    CASE_KW,

    // Access control
    PUBLIC_KW,
    INTERNAL_KW,
    PRIVATE_KW,
    FILEPRIVATE_KW,
    OPEN_KW,

    // Declaration modifiers (contextual)
    STATIC_KW,
    FINAL_KW,
    OVERRIDE_KW,
    MUTATING_KW,
    NONMUTATING_KW,
    REQUIRED_KW,
    CONVENIENCE_KW,
    OPTIONAL_KW,
    LAZY_KW,
    WEAK_KW,
    UNOWNED_KW,
    DYNAMIC_KW,
    INDIRECT_KW,

    // Accessors (contextual)
    GET_KW,
    SET_KW,
    WILLSET_KW,
    DIDSET_KW,

    // Signatures and types
    THROWS_KW,
    RETHROWS_KW,
    WHERE_KW,
    INOUT_KW,
    SELF_TYPE_KW,

    // Literal keywords
    TRUE_KW,
    FALSE_KW,
    NIL_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    NAME,
    ATTRIBUTE,
    MODIFIER_DETAIL, // the `(set)` in `private(set)`
    POUND_DIRECTIVE,
    TOP_LEVEL_CODE,

    // Declarations
    IMPORT_DECL,
    IMPORT_PATH,
    CLASS_DECL,
    STRUCT_DECL,
    ENUM_DECL,
    PROTOCOL_DECL,
    EXTENSION_DECL,
    TYPEALIAS_DECL,
    ASSOCIATEDTYPE_DECL,
    FUNC_DECL,
    INIT_DECL,
    DEINIT_DECL,
    SUBSCRIPT_DECL,
    VAR_DECL,
    PATTERN_BINDING,
    ENUM_CASE_DECL,
    ENUM_CASE_ELEMENT,

    // Declaration parts
    GENERIC_PARAM_LIST,
    GENERIC_PARAM,
    INHERITANCE_CLAUSE,
    WHERE_CLAUSE,
    MEMBER_BLOCK,
    PARAM_LIST,
    PARAM,
    DEFAULT_ARG,
    RESULT_CLAUSE,
    TYPE_ANNOTATION,
    INITIALIZER,
    ACCESSOR_BLOCK,
    ACCESSOR,
    CODE_BLOCK,
    EXPR,
    RAW_VALUE,

    // Types
    PATH_TYPE,
    TYPE_SEGMENT,
    GENERIC_ARG_LIST,
    ARRAY_TYPE,
    DICTIONARY_TYPE,
    OPTIONAL_TYPE,
    IUO_TYPE,
    TUPLE_TYPE,
    TUPLE_TYPE_ELEMENT,
    FUNCTION_TYPE,
    COMPOSITION_TYPE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::NIL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::OPERATOR as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::FLOAT | Self::STRING | Self::TRUE_KW | Self::FALSE_KW | Self::NIL_KW
        )
    }

    /// Keywords that Swift treats contextually and that may therefore name a declaration.
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            Self::OPEN_KW
                | Self::FINAL_KW
                | Self::OVERRIDE_KW
                | Self::MUTATING_KW
                | Self::NONMUTATING_KW
                | Self::REQUIRED_KW
                | Self::CONVENIENCE_KW
                | Self::OPTIONAL_KW
                | Self::LAZY_KW
                | Self::WEAK_KW
                | Self::UNOWNED_KW
                | Self::DYNAMIC_KW
                | Self::INDIRECT_KW
                | Self::GET_KW
                | Self::SET_KW
                | Self::WILLSET_KW
                | Self::DIDSET_KW
        )
    }

    /// Tokens that can spell the name of a declaration.
    pub fn is_name(self) -> bool {
        matches!(self, Self::IDENT | Self::BACKTICK_IDENT) || self.is_contextual_keyword()
    }

    /// Access-control keywords.
    pub fn is_access(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::INTERNAL_KW
                | Self::PRIVATE_KW
                | Self::FILEPRIVATE_KW
                | Self::OPEN_KW
        )
    }

    /// Declaration modifiers other than access control.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::STATIC_KW
                | Self::FINAL_KW
                | Self::OVERRIDE_KW
                | Self::MUTATING_KW
                | Self::NONMUTATING_KW
                | Self::REQUIRED_KW
                | Self::CONVENIENCE_KW
                | Self::OPTIONAL_KW
                | Self::LAZY_KW
                | Self::WEAK_KW
                | Self::UNOWNED_KW
                | Self::DYNAMIC_KW
                | Self::INDIRECT_KW
        )
    }

    /// Keywords that introduce a declaration.
    pub fn is_decl_keyword(self) -> bool {
        matches!(
            self,
            Self::IMPORT_KW
                | Self::CLASS_KW
                | Self::STRUCT_KW
                | Self::ENUM_KW
                | Self::PROTOCOL_KW
                | Self::EXTENSION_KW
                | Self::TYPEALIAS_KW
                | Self::ASSOCIATEDTYPE_KW
                | Self::FUNC_KW
                | Self::INIT_KW
                | Self::DEINIT_KW
                | Self::SUBSCRIPT_KW
                | Self::VAR_KW
                | Self::LET_KW
                | Self::CASE_KW
        )
    }

    /// Tokens that can begin a declaration (attributes, modifiers, keywords).
    pub fn starts_decl(self) -> bool {
        self == Self::AT
            || self == Self::HASH
            || self.is_decl_keyword()
            || self.is_access()
            || self.is_modifier()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SwiftLanguage {}

impl rowan::Language for SwiftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<SwiftLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SwiftLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SwiftLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<SwiftLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_range() {
        assert!(SyntaxKind::IMPORT_KW.is_keyword());
        assert!(SyntaxKind::NIL_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(!SyntaxKind::SOURCE_FILE.is_keyword());
    }

    #[test]
    fn test_contextual_keywords_are_names() {
        assert!(SyntaxKind::SET_KW.is_name());
        assert!(SyntaxKind::OPTIONAL_KW.is_name());
        assert!(!SyntaxKind::FUNC_KW.is_name());
    }

    #[test]
    fn test_roundtrip_raw_kind() {
        let raw: rowan::SyntaxKind = SyntaxKind::CLASS_DECL.into();
        assert_eq!(SyntaxKind::from(raw), SyntaxKind::CLASS_DECL);
    }
}
