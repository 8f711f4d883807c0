//! Read-only traversal of a [`TranslationUnit`].
//!
//! Children are reported in source order:
//!
//! - unit / class body: declarations (a class reports its base specifiers first);
//! - simple / parameter declaration: the inline class specifier (if any), then declarators;
//! - declarator: the nested declarator (if any), then the parameter clause;
//! - parameter clause: parameter declarations.

use super::{
    ClassSpecifierId, ContainerRef, DeclaratorId, Name, NodeRef, ParameterClauseId, Scope, SpecifierContainer,
    TranslationUnit, TypeSpecifier,
};

/// Where a [`Name`] is stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSite {
    /// `Foo` in `class Foo { ... }`.
    ClassSpecifier(ClassSpecifierId),
    /// The declared name of a declarator.
    Declarator(DeclaratorId),
    /// An elaborated or named type specifier of a container.
    TypeSpecifier(ContainerRef),
}

impl TranslationUnit {
    /// Direct children of `node`, in source order.
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        match node {
            NodeRef::Unit(_) => self.declarations().iter().map(|d| NodeRef::from(*d)).collect(),
            NodeRef::SimpleDeclaration(id) => self.container_children(ContainerRef::Simple(id)),
            NodeRef::ParameterDeclaration(id) => self.container_children(ContainerRef::Parameter(id)),
            NodeRef::ClassSpecifier(id) => {
                let class = &self[id];
                class
                    .bases()
                    .iter()
                    .map(|b| NodeRef::BaseSpecifier(*b))
                    .chain(class.declarations().iter().map(|d| NodeRef::from(*d)))
                    .collect()
            }
            NodeRef::BaseSpecifier(_) => Vec::new(),
            NodeRef::Declarator(id) => {
                let declarator = &self[id];
                declarator
                    .nested()
                    .map(NodeRef::Declarator)
                    .into_iter()
                    .chain(declarator.parameters().map(NodeRef::ParameterClause))
                    .collect()
            }
            NodeRef::ParameterClause(id) => self[id]
                .parameters()
                .iter()
                .map(|p| NodeRef::ParameterDeclaration(*p))
                .collect(),
        }
    }

    fn container_children(&self, container: ContainerRef) -> Vec<NodeRef> {
        let c = self.container(container);
        let class = match c.type_specifier() {
            Some(TypeSpecifier::Class(id)) => Some(NodeRef::ClassSpecifier(*id)),
            _ => None,
        };
        class
            .into_iter()
            .chain(c.declarators().iter().map(|d| NodeRef::Declarator(*d)))
            .collect()
    }

    /// Every node below (and including) the root, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            unit: self,
            stack: vec![NodeRef::Unit(self.id())],
        }
    }

    /// Every name stored in the tree, in pre-order of the nodes that hold them.
    pub fn names(&self) -> Vec<(NameSite, &Name)> {
        let mut out = Vec::new();
        for node in self.descendants() {
            match node {
                NodeRef::SimpleDeclaration(id) => self.push_type_name(ContainerRef::Simple(id), &mut out),
                NodeRef::ParameterDeclaration(id) => self.push_type_name(ContainerRef::Parameter(id), &mut out),
                NodeRef::ClassSpecifier(id) => {
                    if let Some(name) = self[id].name() {
                        out.push((NameSite::ClassSpecifier(id), name));
                    }
                }
                NodeRef::Declarator(id) => {
                    if let Some(name) = self[id].name() {
                        out.push((NameSite::Declarator(id), name));
                    }
                }
                NodeRef::Unit(_) | NodeRef::BaseSpecifier(_) | NodeRef::ParameterClause(_) => {}
            }
        }
        out
    }

    fn push_type_name<'a>(&'a self, container: ContainerRef, out: &mut Vec<(NameSite, &'a Name)>) {
        match self.container(container).type_specifier() {
            Some(TypeSpecifier::Elaborated { name, .. }) | Some(TypeSpecifier::Named(name)) => {
                out.push((NameSite::TypeSpecifier(container), name));
            }
            Some(TypeSpecifier::Class(_)) | None => {}
        }
    }

    /// Look up the parameter clause of a function declarator, looking through nested declarators.
    pub fn function_parameters(&self, declarator: DeclaratorId) -> Option<ParameterClauseId> {
        let d = &self[declarator];
        d.parameters().or_else(|| d.nested().and_then(|n| self.function_parameters(n)))
    }
}

/// Pre-order iterator over the nodes of a unit. See [`TranslationUnit::descendants`].
pub struct Descendants<'a> {
    unit: &'a TranslationUnit,
    stack: Vec<NodeRef>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let node = self.stack.pop()?;
        let children = self.unit.children(node);
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}
