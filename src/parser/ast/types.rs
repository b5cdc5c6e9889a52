use super::*;

// ============================================================================
// Type syntax
// ============================================================================

/// Any type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Path(PathType),
    Array(ArrayType),
    Dictionary(DictionaryType),
    Optional(OptionalType),
    ImplicitlyUnwrapped(IuoType),
    Tuple(TupleType),
    Function(FunctionType),
    Composition(CompositionType),
}

impl AstNode for Type {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PATH_TYPE
                | SyntaxKind::ARRAY_TYPE
                | SyntaxKind::DICTIONARY_TYPE
                | SyntaxKind::OPTIONAL_TYPE
                | SyntaxKind::IUO_TYPE
                | SyntaxKind::TUPLE_TYPE
                | SyntaxKind::FUNCTION_TYPE
                | SyntaxKind::COMPOSITION_TYPE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PATH_TYPE => Some(Self::Path(PathType(node))),
            SyntaxKind::ARRAY_TYPE => Some(Self::Array(ArrayType(node))),
            SyntaxKind::DICTIONARY_TYPE => Some(Self::Dictionary(DictionaryType(node))),
            SyntaxKind::OPTIONAL_TYPE => Some(Self::Optional(OptionalType(node))),
            SyntaxKind::IUO_TYPE => Some(Self::ImplicitlyUnwrapped(IuoType(node))),
            SyntaxKind::TUPLE_TYPE => Some(Self::Tuple(TupleType(node))),
            SyntaxKind::FUNCTION_TYPE => Some(Self::Function(FunctionType(node))),
            SyntaxKind::COMPOSITION_TYPE => Some(Self::Composition(CompositionType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Path(n) => n.syntax(),
            Self::Array(n) => n.syntax(),
            Self::Dictionary(n) => n.syntax(),
            Self::Optional(n) => n.syntax(),
            Self::ImplicitlyUnwrapped(n) => n.syntax(),
            Self::Tuple(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Composition(n) => n.syntax(),
        }
    }
}

ast_node!(PathType, PATH_TYPE);
ast_node!(TypeSegment, TYPE_SEGMENT);
ast_node!(GenericArgList, GENERIC_ARG_LIST);

impl PathType {
    children_method!(segments, TypeSegment);
}

impl TypeSegment {
    fn name_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_name() || t.kind() == SyntaxKind::SELF_TYPE_KW)
    }

    pub fn name(&self) -> String {
        self.name_token()
            .map(|t| t.text().trim_matches('`').to_string())
            .unwrap_or_default()
    }

    pub fn name_range(&self) -> TextRange {
        self.name_token()
            .map(|t| t.text_range())
            .unwrap_or_else(|| self.0.text_range())
    }

    pub fn generic_args(&self) -> Vec<Type> {
        self.0
            .children()
            .find_map(GenericArgList::cast)
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

impl GenericArgList {
    children_method!(args, Type);
}

ast_node!(ArrayType, ARRAY_TYPE);

impl ArrayType {
    first_child_method!(element, Type);
}

ast_node!(DictionaryType, DICTIONARY_TYPE);

impl DictionaryType {
    first_child_method!(key, Type);

    pub fn value(&self) -> Option<Type> {
        self.0.children().filter_map(Type::cast).nth(1)
    }
}

ast_node!(OptionalType, OPTIONAL_TYPE);

impl OptionalType {
    first_child_method!(wrapped, Type);
}

ast_node!(IuoType, IUO_TYPE);

impl IuoType {
    first_child_method!(wrapped, Type);
}

ast_node!(TupleType, TUPLE_TYPE);
ast_node!(TupleTypeElement, TUPLE_TYPE_ELEMENT);

impl TupleType {
    children_method!(elements, TupleTypeElement);
}

impl TupleTypeElement {
    children_method!(names, Name);
    first_child_method!(ty, Type);
    first_child_method!(default_arg, DefaultArg);
    has_token_method!(is_inout, INOUT_KW);
    has_token_method!(is_variadic, ELLIPSIS);

    /// The element label; `_` counts as no label
    pub fn label(&self) -> Option<String> {
        self.names().next().map(|n| n.text()).filter(|l| l != "_")
    }
}

ast_node!(FunctionType, FUNCTION_TYPE);

impl FunctionType {
    first_child_method!(params, TupleType);
    has_token_method!(is_throws, THROWS_KW);

    /// The return type (the type after `->`)
    pub fn result(&self) -> Option<Type> {
        self.0.children().filter_map(Type::cast).nth(1)
    }
}

ast_node!(CompositionType, COMPOSITION_TYPE);

impl CompositionType {
    children_method!(types, Type);
}
