//! Node types of the declaration tree and the two capability traits.

use cppdom_core::lang::keywords::KeywordId;

use super::{
    BaseSpecifierId, ClassSpecifierId, ContainerRef, DeclarationSpecifier, DeclaratorId, Name, ParameterClauseId,
    ParameterDeclarationId, ScopeRef, SimpleDeclarationId, Span,
};

// ============================================================================
// Capabilities
// ============================================================================

/// Accepts child declarations in source order.
///
/// Implemented by [`super::TranslationUnit`] and [`ClassSpecifier`].
pub trait Scope {
    fn declarations(&self) -> &[Declaration];
}

/// Holds one declaration specifier, an optional type specifier, and an ordered list of declarators.
///
/// Implemented by [`SimpleDeclaration`] and [`ParameterDeclaration`].
pub trait SpecifierContainer {
    /// Accumulated specifier flags; `None` until the first specifier keyword arrives.
    fn decl_specifier(&self) -> Option<&DeclarationSpecifier>;

    /// Class, elaborated, or named type specifier, if any.
    fn type_specifier(&self) -> Option<&TypeSpecifier>;

    fn declarators(&self) -> &[DeclaratorId];

    /// Span of the token that opened the container.
    fn span(&self) -> Span;
}

/// Storage shared by both container kinds.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SpecifierSlots {
    pub(crate) decl_specifier: Option<DeclarationSpecifier>,
    pub(crate) type_specifier: Option<TypeSpecifier>,
    pub(crate) declarators: Vec<DeclaratorId>,
}

macro_rules! specifier_container {
    ($node:ty) => {
        impl SpecifierContainer for $node {
            fn decl_specifier(&self) -> Option<&DeclarationSpecifier> {
                self.slots.decl_specifier.as_ref()
            }

            fn type_specifier(&self) -> Option<&TypeSpecifier> {
                self.slots.type_specifier.as_ref()
            }

            fn declarators(&self) -> &[DeclaratorId] {
                &self.slots.declarators
            }

            fn span(&self) -> Span {
                self.span
            }
        }
    };
}

// ============================================================================
// Declarations
// ============================================================================

/// A declaration owned by a scope.
///
/// Only simple declarations are built today; the enum leaves room for other declaration forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    Simple(SimpleDeclarationId),
}

/// `decl-specifier-seq init-declarator-list ;`, or a function definition when a body followed the declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDeclaration {
    owner: ScopeRef,
    span: Span,
    access: Option<AccessSpecifier>,
    is_function_definition: bool,
    pub(crate) slots: SpecifierSlots,
}

impl SimpleDeclaration {
    pub(crate) fn new(owner: ScopeRef, span: Span, access: Option<AccessSpecifier>) -> Self {
        Self {
            owner,
            span,
            access,
            is_function_definition: false,
            slots: SpecifierSlots::default(),
        }
    }

    pub fn owner(&self) -> ScopeRef {
        self.owner
    }

    /// Member access for declarations inside a class body; `None` at namespace scope.
    pub fn access(&self) -> Option<AccessSpecifier> {
        self.access
    }

    /// `true` if a function body followed the declarator.
    pub fn is_function_definition(&self) -> bool {
        self.is_function_definition
    }

    pub(crate) fn mark_function_definition(&mut self) {
        self.is_function_definition = true;
    }
}

specifier_container!(SimpleDeclaration);

/// One parameter: a specifier plus an optional (possibly abstract) declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    owner: ParameterClauseId,
    span: Span,
    pub(crate) slots: SpecifierSlots,
}

impl ParameterDeclaration {
    pub(crate) fn new(owner: ParameterClauseId, span: Span) -> Self {
        Self {
            owner,
            span,
            slots: SpecifierSlots::default(),
        }
    }

    pub fn owner(&self) -> ParameterClauseId {
        self.owner
    }
}

specifier_container!(ParameterDeclaration);

// ============================================================================
// Type specifiers
// ============================================================================

/// The non-keyword part of a declaration's type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifier {
    /// `class Foo : Base { ... }`
    Class(ClassSpecifierId),
    /// `struct Foo` used without a body.
    Elaborated { kind: ClassKind, name: Name },
    /// A (possibly qualified) type name such as `std::string`.
    Named(Name),
}

/// `struct`, `class`, or `union`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Struct,
    Class,
    Union,
}

impl ClassKind {
    /// Map a class-key token to its kind.
    ///
    /// Anything other than `class`/`union` (including non-keywords) maps to [`ClassKind::Struct`].
    pub fn from_keyword(keyword: Option<KeywordId>) -> Self {
        match keyword {
            Some(KeywordId::Class) => ClassKind::Class,
            Some(KeywordId::Union) => ClassKind::Union,
            _ => ClassKind::Struct,
        }
    }

    /// Access of members declared before any access label.
    pub fn default_member_access(self) -> AccessSpecifier {
        match self {
            ClassKind::Class => AccessSpecifier::Private,
            ClassKind::Struct | ClassKind::Union => AccessSpecifier::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Struct => "struct",
            ClassKind::Class => "class",
            ClassKind::Union => "union",
        }
    }
}

/// `public`, `protected`, or `private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessSpecifier {
    #[default]
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    /// Map an access keyword; `None` for anything else.
    pub fn from_keyword(keyword: Option<KeywordId>) -> Option<Self> {
        match keyword {
            Some(KeywordId::Public) => Some(AccessSpecifier::Public),
            Some(KeywordId::Protected) => Some(AccessSpecifier::Protected),
            Some(KeywordId::Private) => Some(AccessSpecifier::Private),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::Private => "private",
        }
    }
}

/// `class Foo : public Base { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpecifier {
    owner: ContainerRef,
    kind: ClassKind,
    span: Span,
    name: Option<Name>,
    bases: Vec<BaseSpecifierId>,
    declarations: Vec<Declaration>,
    member_access: AccessSpecifier,
}

impl ClassSpecifier {
    pub(crate) fn new(owner: ContainerRef, kind: ClassKind, span: Span) -> Self {
        Self {
            owner,
            kind,
            span,
            name: None,
            bases: Vec::new(),
            declarations: Vec::new(),
            member_access: kind.default_member_access(),
        }
    }

    pub fn owner(&self) -> ContainerRef {
        self.owner
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Span of the class-key token.
    pub fn span(&self) -> Span {
        self.span
    }

    /// `None` for anonymous classes.
    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn bases(&self) -> &[BaseSpecifierId] {
        &self.bases
    }

    /// Access that the next member declaration will receive.
    pub fn member_access(&self) -> AccessSpecifier {
        self.member_access
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = Some(name);
    }

    pub(crate) fn set_member_access(&mut self, access: AccessSpecifier) {
        self.member_access = access;
    }

    pub(crate) fn push_base(&mut self, base: BaseSpecifierId) {
        self.bases.push(base);
    }

    pub(crate) fn push_declaration(&mut self, decl: Declaration) {
        self.declarations.push(decl);
    }
}

impl Scope for ClassSpecifier {
    fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

/// One entry of a base clause.
///
/// The base-class name is kept as plain text; it is not a resolvable [`Name`].
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpecifier {
    owner: ClassSpecifierId,
    name: Option<String>,
    access: AccessSpecifier,
    is_virtual: bool,
}

impl BaseSpecifier {
    pub(crate) fn new(owner: ClassSpecifierId) -> Self {
        Self {
            owner,
            name: None,
            access: AccessSpecifier::Public,
            is_virtual: false,
        }
    }

    pub fn owner(&self) -> ClassSpecifierId {
        self.owner
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn access(&self) -> AccessSpecifier {
        self.access
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_access(&mut self, access: AccessSpecifier) {
        self.access = access;
    }

    pub(crate) fn set_virtual(&mut self, is_virtual: bool) {
        self.is_virtual = is_virtual;
    }
}

// ============================================================================
// Declarators
// ============================================================================

/// Who owns a declarator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaratorOwner {
    Container(ContainerRef),
    /// The inner declarator of `(*fp)` in `int (*fp)(int)`.
    Declarator(DeclaratorId),
}

/// `*`, `&`, or `&&` in front of a declarator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Pointer,
    LvalueReference,
    RvalueReference,
}

/// A pointer operator plus the cv-qualifiers that follow it (`* const`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerOperator {
    pub kind: PointerKind,
    pub is_const: bool,
    pub is_volatile: bool,
}

/// The name-plus-shape part of a declaration: `*p`, `f(int)`, `a[4]`, `(*fp)(int)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    owner: DeclaratorOwner,
    name: Option<Name>,
    pointer_operators: Vec<PointerOperator>,
    array_dimensions: usize,
    nested: Option<DeclaratorId>,
    parameters: Option<ParameterClauseId>,
}

impl Declarator {
    pub(crate) fn new(owner: DeclaratorOwner) -> Self {
        Self {
            owner,
            name: None,
            pointer_operators: Vec::new(),
            array_dimensions: 0,
            nested: None,
            parameters: None,
        }
    }

    pub fn owner(&self) -> DeclaratorOwner {
        self.owner
    }

    /// `None` for abstract declarators (`int*` as a parameter) and for declarators whose name sits in a nested
    /// declarator.
    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn pointer_operators(&self) -> &[PointerOperator] {
        &self.pointer_operators
    }

    pub fn array_dimensions(&self) -> usize {
        self.array_dimensions
    }

    pub fn nested(&self) -> Option<DeclaratorId> {
        self.nested
    }

    /// Parameter clause; present exactly when this declarator has a function suffix.
    pub fn parameters(&self) -> Option<ParameterClauseId> {
        self.parameters
    }

    pub fn is_function(&self) -> bool {
        self.parameters.is_some()
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = Some(name);
    }

    pub(crate) fn push_pointer_operator(&mut self, kind: PointerKind) {
        self.pointer_operators.push(PointerOperator {
            kind,
            is_const: false,
            is_volatile: false,
        });
    }

    /// Apply a cv-qualifier to the most recent pointer operator; returns `false` if there is none.
    pub(crate) fn qualify_last_pointer(&mut self, keyword: KeywordId) -> bool {
        let Some(last) = self.pointer_operators.last_mut() else {
            return false;
        };
        match keyword {
            KeywordId::Const => last.is_const = true,
            KeywordId::Volatile => last.is_volatile = true,
            _ => return false,
        }
        true
    }

    pub(crate) fn add_array_dimension(&mut self) {
        self.array_dimensions += 1;
    }

    pub(crate) fn set_nested(&mut self, nested: DeclaratorId) {
        self.nested = Some(nested);
    }

    pub(crate) fn set_parameters(&mut self, clause: ParameterClauseId) {
        self.parameters = Some(clause);
    }
}

/// The parenthesized parameter list of a function declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclarationClause {
    owner: DeclaratorId,
    parameters: Vec<ParameterDeclarationId>,
}

impl ParameterDeclarationClause {
    pub(crate) fn new(owner: DeclaratorId) -> Self {
        Self {
            owner,
            parameters: Vec::new(),
        }
    }

    pub fn owner(&self) -> DeclaratorId {
        self.owner
    }

    pub fn parameters(&self) -> &[ParameterDeclarationId] {
        &self.parameters
    }

    pub(crate) fn push_parameter(&mut self, parameter: ParameterDeclarationId) {
        self.parameters.push(parameter);
    }
}
