//! Property-based tests for the cppdom frontend
//!
//! These tests use proptest to verify tree-shape invariants across many randomly
//! generated declaration lists.

use cppdom::ast::{Declaration, NodeRef, Scope, SpecifierContainer, TypeSpecifier};
use cppdom::events::EventLog;
use cppdom::{build_translation_unit, lexer, parser};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct GenDeclarator {
    name: String,
    pointers: usize,
    arrays: usize,
    function: bool,
}

impl GenDeclarator {
    fn render(&self) -> String {
        let mut text = "*".repeat(self.pointers);
        text.push_str(&self.name);
        if self.function {
            text.push_str("(int a, char *b)");
        } else {
            for _ in 0..self.arrays {
                text.push_str("[4]");
            }
        }
        text
    }
}

#[derive(Debug, Clone)]
struct GenDeclaration {
    specifier: &'static str,
    /// Wrap the declarators' type in a class definition instead of a fundamental type.
    class_body: Option<Vec<GenDeclaration>>,
    declarators: Vec<GenDeclarator>,
}

impl GenDeclaration {
    fn render(&self) -> String {
        let ty = match &self.class_body {
            Some(members) => {
                let body: String = members.iter().map(GenDeclaration::render).collect();
                format!("struct {{ {body}}}")
            }
            None => self.specifier.to_string(),
        };
        let declarators: Vec<String> = self.declarators.iter().map(GenDeclarator::render).collect();
        format!("{ty} {}; ", declarators.join(", "))
    }

    fn declarator_names(&self, out: &mut Vec<String>) {
        if let Some(members) = &self.class_body {
            for member in members {
                member.declarator_names(out);
            }
        }
        for declarator in &self.declarators {
            out.push(declarator.name.clone());
            if declarator.function {
                out.extend(["a".to_string(), "b".to_string()]);
            }
        }
    }
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}".prop_filter("not a keyword", |s| cppdom::lang::keywords::from_str(s).is_none())
}

fn declarator() -> impl Strategy<Value = GenDeclarator> {
    (identifier(), 0usize..3, 0usize..3, any::<bool>()).prop_map(|(name, pointers, arrays, function)| GenDeclarator {
        name,
        pointers,
        arrays,
        function,
    })
}

fn specifier() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "int",
        "unsigned long",
        "static const char",
        "volatile double",
        "long long int",
        "signed short",
        "bool",
    ])
}

fn plain_declaration() -> impl Strategy<Value = GenDeclaration> {
    (specifier(), prop::collection::vec(declarator(), 1..4)).prop_map(|(specifier, declarators)| GenDeclaration {
        specifier,
        class_body: None,
        declarators,
    })
}

fn declaration() -> impl Strategy<Value = GenDeclaration> {
    plain_declaration().prop_recursive(2, 12, 4, |inner| {
        (prop::collection::vec(inner, 0..4), prop::collection::vec(declarator(), 1..3)).prop_map(
            |(members, declarators)| GenDeclaration {
                specifier: "",
                class_body: Some(members),
                declarators,
            },
        )
    })
}

fn source_of(decls: &[GenDeclaration]) -> String {
    decls.iter().map(GenDeclaration::render).collect()
}

proptest! {
    /// Property: every generated declaration list builds, one top-level declaration per generated one.
    #[test]
    fn declarations_build(decls in prop::collection::vec(declaration(), 0..6)) {
        let source = source_of(&decls);
        let unit = build_translation_unit(&source).map_err(|e| TestCaseError::fail(format!("{source}: {e:?}")))?;
        prop_assert_eq!(unit.declarations().len(), decls.len());

        for (decl, generated) in unit.declarations().iter().zip(&decls) {
            let Declaration::Simple(id) = decl;
            prop_assert_eq!(unit[*id].declarators().len(), generated.declarators.len());
            let is_class = matches!(unit[*id].type_specifier(), Some(TypeSpecifier::Class(_)));
            prop_assert_eq!(is_class, generated.class_body.is_some());
        }
    }

    /// Property: declared names come out of the tree in source order.
    #[test]
    fn declarator_names_follow_source_order(decls in prop::collection::vec(declaration(), 1..6)) {
        let source = source_of(&decls);
        let unit = build_translation_unit(&source).unwrap();

        let mut expected = Vec::new();
        for decl in &decls {
            decl.declarator_names(&mut expected);
        }
        let actual: Vec<String> = unit
            .descendants()
            .filter_map(|node| match node {
                NodeRef::Declarator(id) => unit[id].name().map(|n| n.as_str().to_string()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: the traversal reaches every node exactly once.
    #[test]
    fn traversal_covers_every_node(decls in prop::collection::vec(declaration(), 0..6)) {
        let unit = build_translation_unit(&source_of(&decls)).unwrap();
        let visited: Vec<NodeRef> = unit.descendants().collect();
        prop_assert_eq!(visited.len(), unit.node_count() + 1);
        let mut unique: Vec<String> = visited.iter().map(|n| format!("{n:?}")).collect();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), visited.len());
    }

    /// Property: the event stream is strictly nested (every begin has its end, depth returns to zero).
    #[test]
    fn event_stream_is_balanced(decls in prop::collection::vec(declaration(), 0..6)) {
        let tokens = lexer::lex(&source_of(&decls)).unwrap();
        let mut log = EventLog::new();
        parser::parse(&tokens, &mut log).unwrap();

        let event = |line: &str| line.split_whitespace().next().unwrap_or_default().to_string();
        let begins = log.lines().iter().filter(|l| event(l.as_str()).ends_with("_begin")).count();
        let ends = log.lines().iter().filter(|l| event(l.as_str()).ends_with("_end")).count();
        prop_assert_eq!(begins, ends);
        prop_assert_eq!(log.lines().last().map(String::as_str), Some("translation_unit_end"));
    }

    /// Property: arbitrary input never panics the frontend.
    #[test]
    fn arbitrary_input_never_panics(source in "[ -~\n]{0,64}") {
        let _ = build_translation_unit(&source);
    }
}
