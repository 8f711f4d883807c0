//! Abstract syntax tree for C/C++ declarations.
//!
//! The tree is an arena owned by [`TranslationUnit`]. Every node kind lives in its own vector and is addressed by a
//! typed index (`SimpleDeclarationId`, `DeclaratorId`, ...), so a handle to one kind can never be used where another
//! kind is expected. Capabilities are expressed as sum types over those indices:
//!
//! - [`ScopeRef`]: something that accepts declarations (the unit itself or a class body);
//! - [`ContainerRef`]: something that holds a declaration specifier and declarators;
//! - [`NodeRef`]: any node, used for traversal.
//!
//! ## Notes
//! - Nodes are created only by the builder (see `crate::builder`); consumers get read-only accessors.
//! - Every non-root node stores the handle of its single owner. Nothing is ever reparented.

mod name;
mod nodes;
mod specifier;
mod traverse;

pub use name::{BindError, Binding, BindingKind, Name, SymbolId};
pub use nodes::{
    AccessSpecifier, BaseSpecifier, ClassKind, ClassSpecifier, Declaration, Declarator, DeclaratorOwner,
    ParameterDeclaration, ParameterDeclarationClause, PointerKind, PointerOperator, Scope, SimpleDeclaration,
    SpecifierContainer, TypeSpecifier,
};
pub(crate) use nodes::SpecifierSlots;
pub use specifier::{DeclarationSpecifier, FundamentalType, SpecifierEffect, SpecifierFlag, classify};
pub use traverse::{Descendants, NameSite};

use std::fmt;
use std::ops::Index;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

// ============================================================================
// Node handles
// ============================================================================

macro_rules! node_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the node in its arena.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

node_id!(
    /// Handle of a [`SimpleDeclaration`].
    SimpleDeclarationId,
    "simple-declaration"
);
node_id!(
    /// Handle of a [`ClassSpecifier`].
    ClassSpecifierId,
    "class-specifier"
);
node_id!(
    /// Handle of a [`BaseSpecifier`].
    BaseSpecifierId,
    "base-specifier"
);
node_id!(
    /// Handle of a [`Declarator`].
    DeclaratorId,
    "declarator"
);
node_id!(
    /// Handle of a [`ParameterDeclarationClause`].
    ParameterClauseId,
    "parameter-clause"
);
node_id!(
    /// Handle of a [`ParameterDeclaration`].
    ParameterDeclarationId,
    "parameter-declaration"
);

/// Handle of a translation unit root.
///
/// Unlike the other handles this is not an arena index: every unit gets a process-unique id so that a root handle
/// from one builder is never mistaken for the root of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(u32);

static NEXT_UNIT_ID: AtomicU32 = AtomicU32::new(0);

impl UnitId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translation-unit#{}", self.0)
    }
}

/// A node that can own declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRef {
    Unit(UnitId),
    Class(ClassSpecifierId),
}

impl fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeRef::Unit(id) => id.fmt(f),
            ScopeRef::Class(id) => id.fmt(f),
        }
    }
}

/// A node that owns a declaration specifier, a type specifier, and declarators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    Simple(SimpleDeclarationId),
    Parameter(ParameterDeclarationId),
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Simple(id) => id.fmt(f),
            ContainerRef::Parameter(id) => id.fmt(f),
        }
    }
}

/// Any node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Unit(UnitId),
    SimpleDeclaration(SimpleDeclarationId),
    ClassSpecifier(ClassSpecifierId),
    BaseSpecifier(BaseSpecifierId),
    Declarator(DeclaratorId),
    ParameterClause(ParameterClauseId),
    ParameterDeclaration(ParameterDeclarationId),
}

impl From<ScopeRef> for NodeRef {
    fn from(scope: ScopeRef) -> Self {
        match scope {
            ScopeRef::Unit(id) => NodeRef::Unit(id),
            ScopeRef::Class(id) => NodeRef::ClassSpecifier(id),
        }
    }
}

impl From<ContainerRef> for NodeRef {
    fn from(container: ContainerRef) -> Self {
        match container {
            ContainerRef::Simple(id) => NodeRef::SimpleDeclaration(id),
            ContainerRef::Parameter(id) => NodeRef::ParameterDeclaration(id),
        }
    }
}

impl From<Declaration> for NodeRef {
    fn from(decl: Declaration) -> Self {
        match decl {
            Declaration::Simple(id) => NodeRef::SimpleDeclaration(id),
        }
    }
}

// ============================================================================
// Translation unit (arena + root scope)
// ============================================================================

/// Root of the tree: one parsed source file.
///
/// Owns every node of the tree. Top-level declarations are reachable through [`Scope::declarations`]; individual
/// nodes are read with indexing (`unit[declarator_id]`).
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    id: UnitId,
    declarations: Vec<Declaration>,
    simple_declarations: Vec<SimpleDeclaration>,
    class_specifiers: Vec<ClassSpecifier>,
    base_specifiers: Vec<BaseSpecifier>,
    declarators: Vec<Declarator>,
    parameter_clauses: Vec<ParameterDeclarationClause>,
    parameter_declarations: Vec<ParameterDeclaration>,
}

impl TranslationUnit {
    pub(crate) fn new(id: UnitId) -> Self {
        Self {
            id,
            declarations: Vec::new(),
            simple_declarations: Vec::new(),
            class_specifiers: Vec::new(),
            base_specifiers: Vec::new(),
            declarators: Vec::new(),
            parameter_clauses: Vec::new(),
            parameter_declarations: Vec::new(),
        }
    }

    /// Root handle of this unit.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.simple_declarations.len()
            + self.class_specifiers.len()
            + self.base_specifiers.len()
            + self.declarators.len()
            + self.parameter_clauses.len()
            + self.parameter_declarations.len()
    }

    /// Borrow a scope by handle; `None` if the handle was issued by another unit.
    pub fn scope(&self, scope: ScopeRef) -> Option<&dyn Scope> {
        match scope {
            ScopeRef::Unit(id) if id == self.id => Some(self as &dyn Scope),
            ScopeRef::Unit(_) => None,
            ScopeRef::Class(id) => self.class_specifiers.get(id.index()).map(|class| class as &dyn Scope),
        }
    }

    /// Borrow a specifier container by handle.
    pub fn container(&self, container: ContainerRef) -> &dyn SpecifierContainer {
        match container {
            ContainerRef::Simple(id) => &self[id],
            ContainerRef::Parameter(id) => &self[id],
        }
    }

    pub fn simple_declarations(&self) -> &[SimpleDeclaration] {
        &self.simple_declarations
    }

    pub fn class_specifiers(&self) -> &[ClassSpecifier] {
        &self.class_specifiers
    }

    pub fn base_specifiers(&self) -> &[BaseSpecifier] {
        &self.base_specifiers
    }

    pub fn declarators(&self) -> &[Declarator] {
        &self.declarators
    }

    pub fn parameter_clauses(&self) -> &[ParameterDeclarationClause] {
        &self.parameter_clauses
    }

    pub fn parameter_declarations(&self) -> &[ParameterDeclaration] {
        &self.parameter_declarations
    }

    // ========================================================================
    // Invariant-preserving mutators (builder only)
    // ========================================================================

    /// Append a new simple declaration to `scope`.
    ///
    /// Members of a class body inherit the class's current member access.
    pub(crate) fn add_simple_declaration(&mut self, scope: ScopeRef, span: Span) -> SimpleDeclarationId {
        let id = SimpleDeclarationId::new(self.simple_declarations.len());
        let access = match scope {
            ScopeRef::Unit(_) => None,
            ScopeRef::Class(class) => Some(self[class].member_access()),
        };
        self.simple_declarations.push(SimpleDeclaration::new(scope, span, access));
        let decl = Declaration::Simple(id);
        match scope {
            ScopeRef::Unit(_) => self.declarations.push(decl),
            ScopeRef::Class(class) => self.class_specifiers[class.index()].push_declaration(decl),
        }
        id
    }

    /// Create a class specifier and install it as the type specifier of `container`.
    pub(crate) fn add_class_specifier(&mut self, container: ContainerRef, kind: ClassKind, span: Span) -> ClassSpecifierId {
        let id = ClassSpecifierId::new(self.class_specifiers.len());
        self.class_specifiers.push(ClassSpecifier::new(container, kind, span));
        self.slots_mut(container).type_specifier = Some(TypeSpecifier::Class(id));
        id
    }

    pub(crate) fn add_base_specifier(&mut self, class: ClassSpecifierId) -> BaseSpecifierId {
        let id = BaseSpecifierId::new(self.base_specifiers.len());
        self.base_specifiers.push(BaseSpecifier::new(class));
        self.class_specifiers[class.index()].push_base(id);
        id
    }

    /// Create a declarator owned by a container, or nested inside another declarator.
    pub(crate) fn add_declarator(&mut self, owner: DeclaratorOwner) -> DeclaratorId {
        let id = DeclaratorId::new(self.declarators.len());
        self.declarators.push(Declarator::new(owner));
        match owner {
            DeclaratorOwner::Container(container) => self.slots_mut(container).declarators.push(id),
            DeclaratorOwner::Declarator(outer) => self.declarators[outer.index()].set_nested(id),
        }
        id
    }

    pub(crate) fn add_parameter_clause(&mut self, declarator: DeclaratorId) -> ParameterClauseId {
        let id = ParameterClauseId::new(self.parameter_clauses.len());
        self.parameter_clauses.push(ParameterDeclarationClause::new(declarator));
        self.declarators[declarator.index()].set_parameters(id);
        id
    }

    pub(crate) fn add_parameter_declaration(&mut self, clause: ParameterClauseId, span: Span) -> ParameterDeclarationId {
        let id = ParameterDeclarationId::new(self.parameter_declarations.len());
        self.parameter_declarations.push(ParameterDeclaration::new(clause, span));
        self.parameter_clauses[clause.index()].push_parameter(id);
        id
    }

    pub(crate) fn slots_mut(&mut self, container: ContainerRef) -> &mut SpecifierSlots {
        match container {
            ContainerRef::Simple(id) => &mut self.simple_declarations[id.index()].slots,
            ContainerRef::Parameter(id) => &mut self.parameter_declarations[id.index()].slots,
        }
    }

    pub(crate) fn simple_declaration_mut(&mut self, id: SimpleDeclarationId) -> &mut SimpleDeclaration {
        &mut self.simple_declarations[id.index()]
    }

    pub(crate) fn class_specifier_mut(&mut self, id: ClassSpecifierId) -> &mut ClassSpecifier {
        &mut self.class_specifiers[id.index()]
    }

    pub(crate) fn base_specifier_mut(&mut self, id: BaseSpecifierId) -> &mut BaseSpecifier {
        &mut self.base_specifiers[id.index()]
    }

    pub(crate) fn declarator_mut(&mut self, id: DeclaratorId) -> &mut Declarator {
        &mut self.declarators[id.index()]
    }
}

impl Scope for TranslationUnit {
    fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

macro_rules! arena_index {
    ($id:ty => $node:ty, $field:ident) => {
        impl Index<$id> for TranslationUnit {
            type Output = $node;

            fn index(&self, id: $id) -> &$node {
                &self.$field[id.index()]
            }
        }
    };
}

arena_index!(SimpleDeclarationId => SimpleDeclaration, simple_declarations);
arena_index!(ClassSpecifierId => ClassSpecifier, class_specifiers);
arena_index!(BaseSpecifierId => BaseSpecifier, base_specifiers);
arena_index!(DeclaratorId => Declarator, declarators);
arena_index!(ParameterClauseId => ParameterDeclarationClause, parameter_clauses);
arena_index!(ParameterDeclarationId => ParameterDeclaration, parameter_declarations);
