//! Driver for name-binding passes over a finished tree.
//!
//! A semantic pass implements [`Binder`]; [`bind_names`] walks every [`Name`] in pre-order, asks the binder to
//! resolve it and records the answer in the name's write-once slot. Symbol tables are entirely the binder's business.
//!
//! ## Notes
//! - Running a pass twice is harmless: names that already carry a binding are skipped and counted.
//! - [`DeclarationBinder`] is a deliberately small binder: it gives every declared name a fresh symbol and resolves
//!   type names against class and typedef names declared earlier in the unit.

use std::collections::HashMap;

use crate::ast::{
    BindError, Binding, BindingKind, ContainerRef, DeclaratorId, DeclaratorOwner, Name, NameSite, ScopeRef,
    SpecifierContainer, SpecifierFlag, SymbolId, TranslationUnit,
};

/// Resolves one name at a time.
pub trait Binder {
    /// Return the binding for `name` found at `site`, or `None` to leave it unresolved.
    fn resolve(&mut self, unit: &TranslationUnit, site: NameSite, name: &Name) -> Option<Binding>;
}

/// Counts from one [`bind_names`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    pub bound: usize,
    pub unresolved: usize,
    pub already_bound: usize,
}

/// Visit every name of `unit` in pre-order and bind the ones `binder` resolves.
///
/// ## Errors
/// Returns [`BindError::AlreadyBound`] if the binder (directly or through the tree) bound a name to one symbol and
/// then resolved it to another.
#[tracing::instrument(skip_all, fields(unit = %unit.id()))]
pub fn bind_names<B: Binder + ?Sized>(unit: &TranslationUnit, binder: &mut B) -> Result<BindReport, BindError> {
    let mut report = BindReport::default();
    for (site, name) in unit.names() {
        if name.is_bound() {
            report.already_bound += 1;
            continue;
        }
        match binder.resolve(unit, site, name) {
            Some(binding) => {
                name.bind(binding)?;
                report.bound += 1;
            }
            None => {
                tracing::trace!(name = %name, ?site, "name left unresolved");
                report.unresolved += 1;
            }
        }
    }
    tracing::debug!(?report, "binding pass finished");
    Ok(report)
}

/// Binds declarations to fresh symbols and type names to earlier class / typedef declarations.
#[derive(Debug, Default)]
pub struct DeclarationBinder {
    next_symbol: u32,
    types: HashMap<String, Binding>,
}

impl DeclarationBinder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&mut self, kind: BindingKind) -> Binding {
        let symbol = SymbolId(self.next_symbol);
        self.next_symbol += 1;
        Binding::new(symbol, kind)
    }

    fn declare_type(&mut self, name: &Name, binding: Binding) {
        self.types.entry(name.as_str().to_string()).or_insert(binding);
    }
}

impl Binder for DeclarationBinder {
    fn resolve(&mut self, unit: &TranslationUnit, site: NameSite, name: &Name) -> Option<Binding> {
        match site {
            NameSite::ClassSpecifier(_) => {
                let binding = self.fresh(BindingKind::Type);
                self.declare_type(name, binding);
                Some(binding)
            }
            NameSite::Declarator(declarator) => {
                let kind = declarator_kind(unit, declarator);
                let binding = self.fresh(kind);
                if kind == BindingKind::Typedef {
                    self.declare_type(name, binding);
                }
                Some(binding)
            }
            NameSite::TypeSpecifier(_) => self.types.get(name.as_str()).copied(),
        }
    }
}

/// What a named declarator declares, judged from its container and its own shape.
fn declarator_kind(unit: &TranslationUnit, declarator: DeclaratorId) -> BindingKind {
    let mut owner = unit[declarator].owner();
    let container = loop {
        match owner {
            DeclaratorOwner::Container(container) => break container,
            DeclaratorOwner::Declarator(outer) => owner = unit[outer].owner(),
        }
    };
    match container {
        ContainerRef::Parameter(_) => BindingKind::Parameter,
        ContainerRef::Simple(decl) => {
            let is_typedef = unit[decl]
                .decl_specifier()
                .is_some_and(|spec| spec.has(SpecifierFlag::Typedef));
            if is_typedef {
                BindingKind::Typedef
            } else if unit[declarator].is_function() {
                BindingKind::Function
            } else if matches!(unit[decl].owner(), ScopeRef::Class(_)) {
                BindingKind::Member
            } else {
                BindingKind::Variable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::build_translation_unit;

    /// Resolves nothing.
    struct NullBinder;

    impl Binder for NullBinder {
        fn resolve(&mut self, _: &TranslationUnit, _: NameSite, _: &Name) -> Option<Binding> {
            None
        }
    }

    fn kinds(unit: &TranslationUnit) -> Vec<(String, Option<BindingKind>)> {
        unit.names()
            .into_iter()
            .map(|(_, name)| (name.as_str().to_string(), name.resolve_binding().map(|b| b.kind)))
            .collect()
    }

    #[test]
    fn names_are_unresolved_until_a_pass_runs() {
        let unit = build_translation_unit("int x;").unwrap();
        let report = bind_names(&unit, &mut NullBinder).unwrap();
        assert_eq!(report, BindReport { bound: 0, unresolved: 1, already_bound: 0 });
        assert!(unit.names().iter().all(|(_, name)| name.resolve_binding().is_none()));
    }

    #[test]
    fn declaration_binder_classifies_declared_names() {
        let unit = build_translation_unit(
            "class Point { int x; void move(int dx); }; typedef unsigned long size_t; Point origin; size_t n; Other o;",
        )
        .unwrap();
        let report = bind_names(&unit, &mut DeclarationBinder::new()).unwrap();
        assert_eq!(report.unresolved, 1);

        assert_eq!(
            kinds(&unit),
            vec![
                ("Point".to_string(), Some(BindingKind::Type)),
                ("x".to_string(), Some(BindingKind::Member)),
                ("move".to_string(), Some(BindingKind::Function)),
                ("dx".to_string(), Some(BindingKind::Parameter)),
                ("size_t".to_string(), Some(BindingKind::Typedef)),
                ("Point".to_string(), Some(BindingKind::Type)),
                ("origin".to_string(), Some(BindingKind::Variable)),
                ("size_t".to_string(), Some(BindingKind::Typedef)),
                ("n".to_string(), Some(BindingKind::Variable)),
                ("Other".to_string(), None),
                ("o".to_string(), Some(BindingKind::Variable)),
            ]
        );
    }

    #[test]
    fn type_names_share_the_symbol_of_their_declaration() {
        let unit = build_translation_unit("struct S {}; S a;").unwrap();
        bind_names(&unit, &mut DeclarationBinder::new()).unwrap();
        let names = unit.names();
        let class = names[0].1.resolve_binding().copied();
        let use_site = names[1].1.resolve_binding().copied();
        assert!(class.is_some());
        assert_eq!(class, use_site);
    }

    #[test]
    fn second_pass_skips_bound_names() {
        let unit = build_translation_unit("int f(int a); int g;").unwrap();
        let first = bind_names(&unit, &mut DeclarationBinder::new()).unwrap();
        assert_eq!(first.bound, 3);

        let before: Vec<_> = unit.names().iter().map(|(_, n)| n.resolve_binding().copied()).collect();
        // A fresh binder would hand out different symbols; the skip keeps the first answers.
        let second = bind_names(&unit, &mut DeclarationBinder::new()).unwrap();
        assert_eq!(second, BindReport { bound: 0, unresolved: 0, already_bound: 3 });
        let after: Vec<_> = unit.names().iter().map(|(_, n)| n.resolve_binding().copied()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn function_pointer_is_a_variable() {
        let unit = build_translation_unit("void (*handler)(int sig);").unwrap();
        bind_names(&unit, &mut DeclarationBinder::new()).unwrap();
        assert_eq!(
            kinds(&unit),
            vec![
                ("handler".to_string(), Some(BindingKind::Variable)),
                ("sig".to_string(), Some(BindingKind::Parameter)),
            ]
        );
    }

    #[test]
    fn conflicting_rebind_is_reported() {
        /// Binds the name itself, then answers with a different symbol.
        struct Conflicting;

        impl Binder for Conflicting {
            fn resolve(&mut self, _: &TranslationUnit, _: NameSite, name: &Name) -> Option<Binding> {
                name.bind(Binding::new(SymbolId(1), BindingKind::Variable)).unwrap();
                Some(Binding::new(SymbolId(2), BindingKind::Variable))
            }
        }

        let unit = build_translation_unit("int x;").unwrap();
        let err = bind_names(&unit, &mut Conflicting).unwrap_err();
        assert!(matches!(err, BindError::AlreadyBound { .. }));
    }
}
