//! Symbol and type definitions for the HIR layer.
//!
//! Contains `HirSymbol`, `SymbolKind`, `TypeRepr` and the supporting
//! signature/storage types produced by extraction and completed by
//! resolution.

use std::fmt;
use std::sync::Arc;

use rowan::TextRange;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::parser::{Failability, SyntaxKind};

// ============================================================================
// IDS
// ============================================================================

/// Index of a symbol inside a `SymbolIndex`.
///
/// Extraction hands out file-local ids starting at zero; `SymbolIndex`
/// rebases them when the file is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn offset(self, base: u32) -> Self {
        Self(self.0 + base)
    }
}

// ============================================================================
// KINDS
// ============================================================================

/// The kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    TypeAlias,
    AssociatedType,
    GenericParam,
    Function,
    Method,
    StaticMethod,
    ClassMethod,
    Initializer,
    Deinitializer,
    Subscript,
    Variable,
    Property,
    StaticProperty,
    ClassProperty,
    EnumCase,
    /// Placeholder for a name that did not resolve
    Unresolved,
}

impl SymbolKind {
    /// Whether a symbol of this kind can be named in a type position
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Enum
                | Self::Protocol
                | Self::TypeAlias
                | Self::AssociatedType
                | Self::GenericParam
                | Self::Unresolved
        )
    }

    /// Class, struct, enum or protocol
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Enum | Self::Protocol)
    }

    pub fn is_function(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Method | Self::StaticMethod | Self::ClassMethod
        )
    }

    pub fn is_variable(self) -> bool {
        matches!(
            self,
            Self::Variable | Self::Property | Self::StaticProperty | Self::ClassProperty
        )
    }

    /// Members that are reached through the metatype rather than an instance
    pub fn is_static_member(self) -> bool {
        matches!(
            self,
            Self::StaticMethod | Self::ClassMethod | Self::StaticProperty | Self::ClassProperty
        )
    }

    /// The suffix used in `source.lang.swift.{decl,ref}.<suffix>` kind strings
    pub fn uid_suffix(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
            Self::TypeAlias => "typealias",
            Self::AssociatedType => "associatedtype",
            Self::GenericParam => "generic_type_param",
            Self::Function => "function.free",
            Self::Method => "function.method.instance",
            Self::StaticMethod => "function.method.static",
            Self::ClassMethod => "function.method.class",
            Self::Initializer => "function.constructor",
            Self::Deinitializer => "function.destructor",
            Self::Subscript => "function.subscript",
            Self::Variable => "var.global",
            Self::Property => "var.instance",
            Self::StaticProperty => "var.static",
            Self::ClassProperty => "var.class",
            Self::EnumCase => "enumelement",
            Self::Unresolved => "unresolved",
        }
    }

    /// Human-readable name for diagnostics
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
            Self::TypeAlias => "typealias",
            Self::AssociatedType => "associated type",
            Self::GenericParam => "generic parameter",
            Self::Function => "function",
            Self::Method | Self::StaticMethod | Self::ClassMethod => "method",
            Self::Initializer => "initializer",
            Self::Deinitializer => "deinitializer",
            Self::Subscript => "subscript",
            Self::Variable => "variable",
            Self::Property | Self::StaticProperty | Self::ClassProperty => "property",
            Self::EnumCase => "enum case",
            Self::Unresolved => "unresolved name",
        }
    }
}

/// Where a symbol comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    /// Declared in the module whose interface is being generated
    Primary,
    /// Declared in a module found through an `import`
    Overlay { module: SmolStr },
    /// Declared in the built-in `Swift` module
    Stdlib,
    /// Implied by another declaration (raw-value enum members)
    Synthesized,
    /// A placeholder standing in for a name that did not resolve
    Unresolved,
}

/// Access level, ordered from least to most visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Access {
    Private,
    FilePrivate,
    #[default]
    Internal,
    Public,
    Open,
}

impl Access {
    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::PRIVATE_KW => Some(Self::Private),
            SyntaxKind::FILEPRIVATE_KW => Some(Self::FilePrivate),
            SyntaxKind::INTERNAL_KW => Some(Self::Internal),
            SyntaxKind::PUBLIC_KW => Some(Self::Public),
            SyntaxKind::OPEN_KW => Some(Self::Open),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FilePrivate => "fileprivate",
            Self::Internal => "internal",
            Self::Public => "public",
            Self::Open => "open",
        }
    }
}

/// Declaration modifiers other than access.
///
/// Variant order is the canonical print order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Override,
    Required,
    Convenience,
    Final,
    Class,
    Static,
    Mutating,
    Nonmutating,
    Lazy,
    Weak,
    Unowned,
    Optional,
    Dynamic,
    Indirect,
}

impl Modifier {
    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let modifier = match kind {
            SyntaxKind::OVERRIDE_KW => Self::Override,
            SyntaxKind::REQUIRED_KW => Self::Required,
            SyntaxKind::CONVENIENCE_KW => Self::Convenience,
            SyntaxKind::FINAL_KW => Self::Final,
            SyntaxKind::CLASS_KW => Self::Class,
            SyntaxKind::STATIC_KW => Self::Static,
            SyntaxKind::MUTATING_KW => Self::Mutating,
            SyntaxKind::NONMUTATING_KW => Self::Nonmutating,
            SyntaxKind::LAZY_KW => Self::Lazy,
            SyntaxKind::WEAK_KW => Self::Weak,
            SyntaxKind::UNOWNED_KW => Self::Unowned,
            SyntaxKind::OPTIONAL_KW => Self::Optional,
            SyntaxKind::DYNAMIC_KW => Self::Dynamic,
            SyntaxKind::INDIRECT_KW => Self::Indirect,
            _ => return None,
        };
        Some(modifier)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Required => "required",
            Self::Convenience => "convenience",
            Self::Final => "final",
            Self::Class => "class",
            Self::Static => "static",
            Self::Mutating => "mutating",
            Self::Nonmutating => "nonmutating",
            Self::Lazy => "lazy",
            Self::Weak => "weak",
            Self::Unowned => "unowned",
            Self::Optional => "optional",
            Self::Dynamic => "dynamic",
            Self::Indirect => "indirect",
        }
    }
}

// ============================================================================
// TYPE REPRESENTATION
// ============================================================================

/// A type as written in source, with each named segment resolved to a symbol
/// once the index has been resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRepr {
    /// `A`, `A.B`, `Array<Int>`, `Self`
    Path(Vec<PathSegment>),
    /// `[T]`
    Array(Box<TypeRepr>),
    /// `[K: V]`
    Dictionary(Box<TypeRepr>, Box<TypeRepr>),
    /// `T?`
    Optional(Box<TypeRepr>),
    /// `T!`
    ImplicitlyUnwrapped(Box<TypeRepr>),
    /// `(A, b: B)`; `()` is the empty tuple
    Tuple(Vec<TupleElement>),
    /// `(A) throws -> B`
    Function {
        params: Vec<TupleElement>,
        throws: bool,
        result: Box<TypeRepr>,
    },
    /// `P & Q`
    Composition(Vec<TypeRepr>),
    /// A type that could not be determined
    Error,
}

/// One dotted component of a path type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: SmolStr,
    /// Source range of the name; `None` for inferred or synthesized types
    pub range: Option<TextRange>,
    pub generic_args: Vec<TypeRepr>,
    /// Filled in by resolution; always `Some` afterwards (possibly a placeholder)
    pub resolved: Option<SymbolId>,
}

impl PathSegment {
    pub fn new(name: impl Into<SmolStr>, range: Option<TextRange>) -> Self {
        Self {
            name: name.into(),
            range,
            generic_args: Vec::new(),
            resolved: None,
        }
    }
}

/// An element of a tuple or function parameter list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub label: Option<SmolStr>,
    pub ty: TypeRepr,
    pub is_inout: bool,
    pub is_variadic: bool,
}

impl TypeRepr {
    /// A single-segment path such as `Int`, not yet resolved
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::Path(vec![PathSegment::new(name, None)])
    }

    /// The symbol named by the last segment of a path type
    pub fn resolved_symbol(&self) -> Option<SymbolId> {
        match self {
            Self::Path(segments) => segments.last().and_then(|s| s.resolved),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Visit every path segment, outermost first
    pub fn for_each_segment<'a>(&'a self, f: &mut impl FnMut(&'a PathSegment)) {
        match self {
            Self::Path(segments) => {
                for segment in segments {
                    f(segment);
                    for arg in &segment.generic_args {
                        arg.for_each_segment(f);
                    }
                }
            }
            Self::Array(inner) | Self::Optional(inner) | Self::ImplicitlyUnwrapped(inner) => {
                inner.for_each_segment(f)
            }
            Self::Dictionary(key, value) => {
                key.for_each_segment(f);
                value.for_each_segment(f);
            }
            Self::Tuple(elements) => elements.iter().for_each(|e| e.ty.for_each_segment(f)),
            Self::Function { params, result, .. } => {
                params.iter().for_each(|e| e.ty.for_each_segment(f));
                result.for_each_segment(f);
            }
            Self::Composition(types) => types.iter().for_each(|t| t.for_each_segment(f)),
            Self::Error => {}
        }
    }
}

impl fmt::Display for TypeRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name)?;
                    if !segment.generic_args.is_empty() {
                        f.write_str("<")?;
                        write_joined(f, &segment.generic_args, ", ")?;
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            Self::Array(inner) => write!(f, "[{inner}]"),
            Self::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
            Self::Optional(inner) => write!(f, "{}?", Wrapped(inner)),
            Self::ImplicitlyUnwrapped(inner) => write!(f, "{}!", Wrapped(inner)),
            Self::Tuple(elements) => {
                f.write_str("(")?;
                write_joined(f, elements, ", ")?;
                f.write_str(")")
            }
            Self::Function {
                params,
                throws,
                result,
            } => {
                f.write_str("(")?;
                write_joined(f, params, ", ")?;
                f.write_str(")")?;
                if *throws {
                    f.write_str(" throws")?;
                }
                write!(f, " -> {result}")
            }
            Self::Composition(types) => write_joined(f, types, " & "),
            Self::Error => f.write_str("<<error type>>"),
        }
    }
}

impl fmt::Display for TupleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        if self.is_inout {
            f.write_str("inout ")?;
        }
        write!(f, "{}", self.ty)?;
        if self.is_variadic {
            f.write_str("...")?;
        }
        Ok(())
    }
}

/// Parenthesizes function and composition types under a postfix `?`/`!`
struct Wrapped<'a>(&'a TypeRepr);

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TypeRepr::Function { .. } | TypeRepr::Composition(_) => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ============================================================================
// SIGNATURES AND STORAGE
// ============================================================================

/// A parameter of a function, initializer or subscript.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    /// The first written name (`_` included)
    pub first_name: SmolStr,
    /// The internal name when two names are written
    pub second_name: Option<SmolStr>,
    pub ty: TypeRepr,
    pub has_default: bool,
    pub is_inout: bool,
    pub is_variadic: bool,
}

impl ParamInfo {
    /// The argument label callers write.
    ///
    /// Subscript parameters only have a label when two names are written.
    pub fn argument_label(&self, is_subscript: bool) -> Option<&str> {
        if is_subscript && self.second_name.is_none() {
            return None;
        }
        let label = self.first_name.as_str();
        (label != "_").then_some(label)
    }

    /// This parameter as an element of the callable's function type
    pub fn as_tuple_element(&self, is_subscript: bool) -> TupleElement {
        TupleElement {
            label: self.argument_label(is_subscript).map(SmolStr::new),
            ty: self.ty.clone(),
            is_inout: self.is_inout,
            is_variadic: self.is_variadic,
        }
    }
}

/// Signature of a function, initializer, deinitializer or subscript.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<ParamInfo>,
    pub throws: bool,
    pub rethrows: bool,
    /// `None` means `Void` (or `Self` for initializers)
    pub result: Option<TypeRepr>,
    pub failability: Option<Failability>,
}

/// Storage shape of a variable or property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Storage {
    pub is_let: bool,
    /// Declared with a getter (explicit or implicit) instead of storage
    pub is_computed: bool,
    /// Has a setter (stored `var`s and computed values with `set`)
    pub is_settable: bool,
    /// The type was inferred from the initializer expression
    pub type_inferred: bool,
}

// ============================================================================
// SYMBOL
// ============================================================================

/// A declaration extracted from source or synthesized during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HirSymbol {
    pub id: SymbolId,
    /// The simple name (`init`, `deinit` and `subscript` for those kinds)
    pub name: SmolStr,
    /// `Module.Outer.Name`
    pub qualified_name: Arc<str>,
    /// The mangled identifier; empty until the index is resolved
    pub usr: Arc<str>,
    pub kind: SymbolKind,
    pub origin: SymbolOrigin,
    pub module: SmolStr,
    pub file: Option<FileId>,
    /// Range of the token that names the declaration
    pub name_range: Option<TextRange>,
    /// Range of the whole declaration, attributes included
    pub decl_range: Option<TextRange>,
    pub parent: Option<SymbolId>,
    /// Members in declaration order, generic parameters excluded
    pub members: Vec<SymbolId>,
    pub generic_params: Vec<SymbolId>,
    pub access: Access,
    /// Whether `access` was written rather than defaulted
    pub explicit_access: bool,
    pub setter_access: Option<Access>,
    /// Non-access modifiers in canonical order
    pub modifiers: Vec<Modifier>,
    /// Attribute text as written (`@objc`, `@available(*, deprecated)`)
    pub attributes: Vec<SmolStr>,
    /// Inheritance clause, or the constraint of a generic parameter
    pub inherited: Vec<TypeRepr>,
    /// `protocol P: class`
    pub class_constraint: bool,
    /// Variable type, alias target, associated type default, extended type,
    /// or enum case payload (as a tuple)
    pub ty: Option<TypeRepr>,
    pub signature: Option<Signature>,
    pub storage: Option<Storage>,
    /// For extensions: the nominal type (or placeholder) being extended
    pub extends: Option<SymbolId>,
    /// 1-based position among the extensions of the same type in this module
    pub ordinal: u32,
    pub doc: Option<Arc<str>>,
}

impl HirSymbol {
    pub(crate) fn new(id: SymbolId, name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        let name = name.into();
        Self {
            id,
            qualified_name: Arc::from(name.as_str()),
            name,
            usr: Arc::from(""),
            kind,
            origin: SymbolOrigin::Primary,
            module: SmolStr::default(),
            file: None,
            name_range: None,
            decl_range: None,
            parent: None,
            members: Vec::new(),
            generic_params: Vec::new(),
            access: Access::Internal,
            explicit_access: false,
            setter_access: None,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            inherited: Vec::new(),
            class_constraint: false,
            ty: None,
            signature: None,
            storage: None,
            extends: None,
            ordinal: 0,
            doc: None,
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Every type written in this declaration's own header
    pub fn type_reprs(&self) -> impl Iterator<Item = &TypeRepr> {
        let signature = self.signature.iter().flat_map(|sig| {
            sig.params
                .iter()
                .map(|p| &p.ty)
                .chain(sig.result.as_ref())
        });
        self.inherited.iter().chain(self.ty.as_ref()).chain(signature)
    }
}

/// An `import` statement seen during extraction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportInfo {
    pub module: SmolStr,
    /// Range of the module name
    pub range: TextRange,
}

/// Result of extracting one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Symbols with file-local ids; parents precede their members
    pub symbols: Vec<HirSymbol>,
    pub imports: Vec<ImportInfo>,
    /// Ids of the declarations written at file scope, in source order
    pub top_level: Vec<SymbolId>,
}
