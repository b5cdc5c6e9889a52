use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(decls, Decl);

    /// Module names of every `import` at file scope, in source order
    pub fn imported_modules(&self) -> Vec<String> {
        self.decls()
            .filter_map(|d| match d {
                Decl::Import(import) => import.module_name(),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Any declaration, at file scope or inside a member block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decl {
    Import(ImportDecl),
    Type(TypeDecl),
    Extension(ExtensionDecl),
    TypeAlias(TypeAliasDecl),
    AssociatedType(AssociatedTypeDecl),
    Func(FuncDecl),
    Init(InitDecl),
    Deinit(DeinitDecl),
    Subscript(SubscriptDecl),
    Var(VarDecl),
    EnumCase(EnumCaseDecl),
}

impl AstNode for Decl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::IMPORT_DECL
                | SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::PROTOCOL_DECL
                | SyntaxKind::EXTENSION_DECL
                | SyntaxKind::TYPEALIAS_DECL
                | SyntaxKind::ASSOCIATEDTYPE_DECL
                | SyntaxKind::FUNC_DECL
                | SyntaxKind::INIT_DECL
                | SyntaxKind::DEINIT_DECL
                | SyntaxKind::SUBSCRIPT_DECL
                | SyntaxKind::VAR_DECL
                | SyntaxKind::ENUM_CASE_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORT_DECL => Some(Self::Import(ImportDecl(node))),
            SyntaxKind::CLASS_DECL
            | SyntaxKind::STRUCT_DECL
            | SyntaxKind::ENUM_DECL
            | SyntaxKind::PROTOCOL_DECL => Some(Self::Type(TypeDecl(node))),
            SyntaxKind::EXTENSION_DECL => Some(Self::Extension(ExtensionDecl(node))),
            SyntaxKind::TYPEALIAS_DECL => Some(Self::TypeAlias(TypeAliasDecl(node))),
            SyntaxKind::ASSOCIATEDTYPE_DECL => {
                Some(Self::AssociatedType(AssociatedTypeDecl(node)))
            }
            SyntaxKind::FUNC_DECL => Some(Self::Func(FuncDecl(node))),
            SyntaxKind::INIT_DECL => Some(Self::Init(InitDecl(node))),
            SyntaxKind::DEINIT_DECL => Some(Self::Deinit(DeinitDecl(node))),
            SyntaxKind::SUBSCRIPT_DECL => Some(Self::Subscript(SubscriptDecl(node))),
            SyntaxKind::VAR_DECL => Some(Self::Var(VarDecl(node))),
            SyntaxKind::ENUM_CASE_DECL => Some(Self::EnumCase(EnumCaseDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Import(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Extension(n) => n.syntax(),
            Self::TypeAlias(n) => n.syntax(),
            Self::AssociatedType(n) => n.syntax(),
            Self::Func(n) => n.syntax(),
            Self::Init(n) => n.syntax(),
            Self::Deinit(n) => n.syntax(),
            Self::Subscript(n) => n.syntax(),
            Self::Var(n) => n.syntax(),
            Self::EnumCase(n) => n.syntax(),
        }
    }
}

impl Decl {
    /// Attributes written on this declaration
    pub fn attributes(&self) -> Vec<Attribute> {
        self.syntax().children().filter_map(Attribute::cast).collect()
    }

    /// Access and declaration modifiers
    pub fn modifiers(&self) -> DeclModifiers {
        let introducer: &[SyntaxKind] = match self {
            Self::Import(_) => &[SyntaxKind::IMPORT_KW],
            Self::Type(_) => &[
                SyntaxKind::CLASS_KW,
                SyntaxKind::STRUCT_KW,
                SyntaxKind::ENUM_KW,
                SyntaxKind::PROTOCOL_KW,
            ],
            Self::Extension(_) => &[SyntaxKind::EXTENSION_KW],
            Self::TypeAlias(_) => &[SyntaxKind::TYPEALIAS_KW],
            Self::AssociatedType(_) => &[SyntaxKind::ASSOCIATEDTYPE_KW],
            Self::Func(_) => &[SyntaxKind::FUNC_KW],
            Self::Init(_) => &[SyntaxKind::INIT_KW],
            Self::Deinit(_) => &[SyntaxKind::DEINIT_KW],
            Self::Subscript(_) => &[SyntaxKind::SUBSCRIPT_KW],
            Self::Var(_) => &[SyntaxKind::VAR_KW, SyntaxKind::LET_KW],
            Self::EnumCase(_) => &[SyntaxKind::CASE_KW],
        };
        collect_modifiers(self.syntax(), introducer)
    }
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    /// The attribute name without `@`
    pub fn name(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() != SyntaxKind::AT && !t.kind().is_trivia())
            .map(|t| t.text().to_string())
    }

    /// The attribute as written, e.g. `@available(*, deprecated)`
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

// ============================================================================
// Import
// ============================================================================

ast_node!(ImportDecl, IMPORT_DECL);
ast_node!(ImportPath, IMPORT_PATH);

impl ImportDecl {
    first_child_method!(path, ImportPath);

    /// The imported module (first path component)
    pub fn module_name(&self) -> Option<String> {
        self.path().and_then(|p| p.segments().into_iter().next())
    }
}

impl ImportPath {
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_name())
            .map(|t| t.text().to_string())
            .collect()
    }

    /// Range of the module name (the first path component)
    pub fn module_range(&self) -> Option<TextRange> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_name())
            .map(|t| t.text_range())
    }
}

// ============================================================================
// Nominal types
// ============================================================================

/// The flavour of a nominal type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Enum,
    Protocol,
}

/// `class`, `struct`, `enum` or `protocol` declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl(pub(crate) SyntaxNode);

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::PROTOCOL_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self(node))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl TypeDecl {
    first_child_method!(name, Name);
    first_child_method!(generic_params, GenericParamList);
    first_child_method!(inheritance, InheritanceClause);
    first_child_method!(member_block, MemberBlock);

    pub fn kind(&self) -> TypeDeclKind {
        match self.0.kind() {
            SyntaxKind::CLASS_DECL => TypeDeclKind::Class,
            SyntaxKind::STRUCT_DECL => TypeDeclKind::Struct,
            SyntaxKind::ENUM_DECL => TypeDeclKind::Enum,
            _ => TypeDeclKind::Protocol,
        }
    }

    pub fn members(&self) -> Vec<Decl> {
        self.member_block()
            .map(|b| b.members().collect())
            .unwrap_or_default()
    }
}

ast_node!(MemberBlock, MEMBER_BLOCK);

impl MemberBlock {
    children_method!(members, Decl);
}

ast_node!(GenericParamList, GENERIC_PARAM_LIST);
ast_node!(GenericParam, GENERIC_PARAM);

impl GenericParamList {
    children_method!(params, GenericParam);
}

impl GenericParam {
    first_child_method!(name, Name);
    first_child_method!(constraint, Type);
}

ast_node!(InheritanceClause, INHERITANCE_CLAUSE);

impl InheritanceClause {
    children_method!(types, Type);
    has_token_method!(has_class_constraint, CLASS_KW, "protocol P: class");
}

// ============================================================================
// Extension
// ============================================================================

ast_node!(ExtensionDecl, EXTENSION_DECL);

impl ExtensionDecl {
    first_child_method!(extended_type, Type);
    first_child_method!(inheritance, InheritanceClause);
    first_child_method!(member_block, MemberBlock);

    pub fn members(&self) -> Vec<Decl> {
        self.member_block()
            .map(|b| b.members().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Type aliases
// ============================================================================

ast_node!(TypeAliasDecl, TYPEALIAS_DECL);

impl TypeAliasDecl {
    first_child_method!(name, Name);
    first_child_method!(generic_params, GenericParamList);
    first_child_method!(aliased_type, Type);
}

ast_node!(AssociatedTypeDecl, ASSOCIATEDTYPE_DECL);

impl AssociatedTypeDecl {
    first_child_method!(name, Name);
    first_child_method!(inheritance, InheritanceClause);
    first_child_method!(default_type, Type);
}

// ============================================================================
// Functions
// ============================================================================

ast_node!(FuncDecl, FUNC_DECL);

impl FuncDecl {
    first_child_method!(name, Name);
    first_child_method!(generic_params, GenericParamList);
    first_child_method!(param_list, ParamList);
    first_child_method!(result_clause, ResultClause);
    first_child_method!(body, CodeBlock);
    has_token_method!(is_throws, THROWS_KW, "func f() throws");
    has_token_method!(is_rethrows, RETHROWS_KW, "func f(g: () throws -> Void) rethrows");

    pub fn result_type(&self) -> Option<Type> {
        self.result_clause().and_then(|r| r.ty())
    }
}

/// `init?` / `init!`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failability {
    Optional,
    ImplicitlyUnwrapped,
}

ast_node!(InitDecl, INIT_DECL);

impl InitDecl {
    first_child_method!(generic_params, GenericParamList);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, CodeBlock);
    has_token_method!(is_throws, THROWS_KW, "init() throws");
    token_to_enum_method!(failability, Failability, [
        QUESTION => Optional,
        BANG => ImplicitlyUnwrapped,
    ]);

    /// Range of the `init` keyword, which names the initializer
    pub fn keyword_range(&self) -> Option<TextRange> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::INIT_KW)
            .map(|t| t.text_range())
    }
}

ast_node!(DeinitDecl, DEINIT_DECL);

impl DeinitDecl {
    first_child_method!(body, CodeBlock);

    pub fn keyword_range(&self) -> Option<TextRange> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::DEINIT_KW)
            .map(|t| t.text_range())
    }
}

ast_node!(SubscriptDecl, SUBSCRIPT_DECL);

impl SubscriptDecl {
    first_child_method!(generic_params, GenericParamList);
    first_child_method!(param_list, ParamList);
    first_child_method!(result_clause, ResultClause);
    first_child_method!(accessor_block, AccessorBlock);

    pub fn result_type(&self) -> Option<Type> {
        self.result_clause().and_then(|r| r.ty())
    }

    pub fn keyword_range(&self) -> Option<TextRange> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::SUBSCRIPT_KW)
            .map(|t| t.text_range())
    }
}

ast_node!(ParamList, PARAM_LIST);
ast_node!(Param, PARAM);
ast_node!(DefaultArg, DEFAULT_ARG);
ast_node!(ResultClause, RESULT_CLAUSE);

impl ParamList {
    children_method!(params, Param);
}

impl Param {
    children_method!(names, Name);
    first_child_method!(ty, Type);
    first_child_method!(default_arg, DefaultArg);
    has_token_method!(is_inout, INOUT_KW, "x: inout Int");
    has_token_method!(is_variadic, ELLIPSIS, "xs: Int...");

    /// The argument label written first (`_` for none)
    pub fn first_name(&self) -> Option<Name> {
        self.names().next()
    }

    /// The internal parameter name, when it differs from the label
    pub fn second_name(&self) -> Option<Name> {
        self.names().nth(1)
    }
}

impl DefaultArg {
    first_child_method!(expr, Expr);
}

impl ResultClause {
    first_child_method!(ty, Type);
}

ast_node!(CodeBlock, CODE_BLOCK);

// ============================================================================
// Variables
// ============================================================================

ast_node!(VarDecl, VAR_DECL);

impl VarDecl {
    children_method!(bindings, PatternBinding);
    has_token_method!(is_let, LET_KW, "let x = 1");
}

ast_node!(PatternBinding, PATTERN_BINDING);
ast_node!(TypeAnnotation, TYPE_ANNOTATION);
ast_node!(Initializer, INITIALIZER);

impl PatternBinding {
    first_child_method!(name, Name);
    first_child_method!(type_annotation, TypeAnnotation);
    first_child_method!(initializer, Initializer);
    first_child_method!(accessor_block, AccessorBlock);

    pub fn ty(&self) -> Option<Type> {
        self.type_annotation().and_then(|a| a.ty())
    }

    pub fn initializer_expr(&self) -> Option<Expr> {
        self.initializer().and_then(|i| i.expr())
    }
}

impl TypeAnnotation {
    first_child_method!(ty, Type);
}

impl Initializer {
    first_child_method!(expr, Expr);
}

ast_node!(AccessorBlock, ACCESSOR_BLOCK);
ast_node!(Accessor, ACCESSOR);

impl AccessorBlock {
    children_method!(accessors, Accessor);

    /// `{ ... }` with statements instead of accessors: a read-only computed value
    pub fn is_implicit_getter(&self) -> bool {
        self.0.children().any(|c| c.kind() == SyntaxKind::CODE_BLOCK)
    }

    pub fn has(&self, kind: AccessorKind) -> bool {
        self.accessors().any(|a| a.kind() == Some(kind))
    }
}

/// Which accessor an `Accessor` node declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Set,
    WillSet,
    DidSet,
}

impl Accessor {
    token_to_enum_method!(kind, AccessorKind, [
        GET_KW => Get,
        SET_KW => Set,
        WILLSET_KW => WillSet,
        DIDSET_KW => DidSet,
    ]);
    first_child_method!(body, CodeBlock);
}

// ============================================================================
// Enum cases
// ============================================================================

ast_node!(EnumCaseDecl, ENUM_CASE_DECL);
ast_node!(EnumCaseElement, ENUM_CASE_ELEMENT);
ast_node!(RawValue, RAW_VALUE);

impl EnumCaseDecl {
    children_method!(elements, EnumCaseElement);
}

impl EnumCaseElement {
    first_child_method!(name, Name);
    first_child_method!(payload, TupleType);
    first_child_method!(raw_value, RawValue);
}

impl RawValue {
    first_child_method!(expr, Expr);
}

// ============================================================================
// Expressions
// ============================================================================

/// Literal categories recognised for type inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Boolean,
    Nil,
}

ast_node!(Expr, EXPR);

impl Expr {
    fn significant_tokens(&self) -> Vec<SyntaxToken> {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect()
    }

    /// The literal kind when the expression is a single (possibly negated) literal
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        let tokens = self.significant_tokens();
        let literal = match tokens.as_slice() {
            [single] => single,
            [sign, number] if sign.kind() == SyntaxKind::OPERATOR && sign.text() == "-" => number,
            _ => return None,
        };
        match literal.kind() {
            SyntaxKind::INTEGER => Some(LiteralKind::Integer),
            SyntaxKind::FLOAT => Some(LiteralKind::Float),
            SyntaxKind::STRING if tokens.len() == 1 => Some(LiteralKind::String),
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW if tokens.len() == 1 => {
                Some(LiteralKind::Boolean)
            }
            SyntaxKind::NIL_KW if tokens.len() == 1 => Some(LiteralKind::Nil),
            _ => None,
        }
    }

    /// The callee of a `Name(...)`, `A.B(...)` or `Name<T>(...)` constructor-style call
    pub fn call_path(&self) -> Option<PathType> {
        let callee = self.0.first_child().and_then(PathType::cast)?;
        if callee.syntax().text_range().start() != self.0.text_range().start() {
            return None;
        }
        let args: Vec<SyntaxToken> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect();
        if args.first()?.kind() != SyntaxKind::L_PAREN {
            return None;
        }
        // The first `(` must close at the very end
        let mut depth = 0usize;
        for (i, t) in args.iter().enumerate() {
            match t.kind() {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 && i != args.len() - 1 {
                        return None;
                    }
                }
                _ => {}
            }
        }
        (depth == 0).then_some(callee)
    }

    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}
