//! Deterministic, indented text dump of a [`TranslationUnit`].
//!
//! One line per node, two spaces of indentation per level, children in source order. Containers get extra detail
//! lines for their specifier and named type. Used by the CLI and by snapshot tests.
//!
//! ```text
//! translation-unit
//!   simple-declaration
//!     class-specifier class Foo
//!       base public Base
//!       simple-declaration [private]
//!         specifier: int
//!         declarator x
//! ```

use std::fmt::Write as _;

use crate::ast::{
    ContainerRef, Declarator, NodeRef, PointerKind, PointerOperator, SpecifierContainer, TranslationUnit,
    TypeSpecifier,
};

/// Render the whole unit.
pub fn render(unit: &TranslationUnit) -> String {
    let mut out = String::new();
    write_node(unit, NodeRef::Unit(unit.id()), 0, &mut out);
    out
}

fn write_node(unit: &TranslationUnit, node: NodeRef, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        NodeRef::Unit(_) => {
            let _ = writeln!(out, "{indent}translation-unit");
        }
        NodeRef::SimpleDeclaration(id) => {
            let decl = &unit[id];
            let mut line = format!("{indent}simple-declaration");
            if let Some(access) = decl.access() {
                let _ = write!(line, " [{}]", access.as_str());
            }
            if decl.is_function_definition() {
                line.push_str(" (definition)");
            }
            let _ = writeln!(out, "{line}");
            write_container_details(unit, ContainerRef::Simple(id), depth + 1, out);
        }
        NodeRef::ParameterDeclaration(id) => {
            let _ = writeln!(out, "{indent}parameter");
            write_container_details(unit, ContainerRef::Parameter(id), depth + 1, out);
        }
        NodeRef::ClassSpecifier(id) => {
            let class = &unit[id];
            let name = class.name().map_or("<anonymous>", |n| n.as_str());
            let _ = writeln!(out, "{indent}class-specifier {} {name}", class.kind().as_str());
        }
        NodeRef::BaseSpecifier(id) => {
            let base = &unit[id];
            let virtual_ = if base.is_virtual() { " virtual" } else { "" };
            let name = base.name().unwrap_or("<unnamed>");
            let _ = writeln!(out, "{indent}base {}{virtual_} {name}", base.access().as_str());
        }
        NodeRef::Declarator(id) => {
            let _ = writeln!(out, "{indent}declarator {}", declarator_shape(&unit[id]));
        }
        NodeRef::ParameterClause(_) => {
            let _ = writeln!(out, "{indent}parameters");
        }
    }
    for child in unit.children(node) {
        write_node(unit, child, depth + 1, out);
    }
}

fn write_container_details(unit: &TranslationUnit, container: ContainerRef, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let c = unit.container(container);
    if let Some(spec) = c.decl_specifier() {
        let _ = writeln!(out, "{indent}specifier: {spec}");
    }
    match c.type_specifier() {
        Some(TypeSpecifier::Elaborated { kind, name }) => {
            let _ = writeln!(out, "{indent}elaborated: {} {name}", kind.as_str());
        }
        Some(TypeSpecifier::Named(name)) => {
            let _ = writeln!(out, "{indent}type: {name}");
        }
        Some(TypeSpecifier::Class(_)) | None => {}
    }
}

/// `*const p`, `&r`, `m[][]`, `(nested)`, `<abstract>`.
fn declarator_shape(declarator: &Declarator) -> String {
    let mut shape: String = declarator.pointer_operators().iter().map(pointer_text).collect();
    match declarator.name() {
        Some(name) => shape.push_str(name.as_str()),
        None if declarator.nested().is_some() => shape.push_str("(nested)"),
        None => shape.push_str("<abstract>"),
    }
    for _ in 0..declarator.array_dimensions() {
        shape.push_str("[]");
    }
    shape
}

fn pointer_text(op: &PointerOperator) -> String {
    let mut text = match op.kind {
        PointerKind::Pointer => "*",
        PointerKind::LvalueReference => "&",
        PointerKind::RvalueReference => "&&",
    }
    .to_string();
    if op.is_const {
        text.push_str("const ");
    }
    if op.is_volatile {
        text.push_str("volatile ");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::build_translation_unit;

    fn outline(source: &str) -> String {
        render(&build_translation_unit(source).unwrap())
    }

    #[test]
    fn class_with_members() {
        insta::assert_snapshot!(outline("class Foo : public Base { int x; void m(int a); };"), @r"
        translation-unit
          simple-declaration
            class-specifier class Foo
              base public Base
              simple-declaration [private]
                specifier: int
                declarator x
              simple-declaration [private]
                specifier: void
                declarator m
                  parameters
                    parameter
                      specifier: int
                      declarator a
        ");
    }

    #[test]
    fn bare_sign_specifier_is_not_blank() {
        insta::assert_snapshot!(outline("signed x; unsigned signed y;"), @r"
        translation-unit
          simple-declaration
            specifier: int
            declarator x
          simple-declaration
            specifier: int
            declarator y
        ");
    }

    #[test]
    fn declarator_shapes() {
        insta::assert_snapshot!(outline("const char *const names[4], &&r = f(); void (*cb)(int);"), @r"
        translation-unit
          simple-declaration
            specifier: const char
            declarator *const names[]
            declarator &&r
          simple-declaration
            specifier: void
            declarator (nested)
              declarator *cb
              parameters
                parameter
                  specifier: int
        ");
    }

    #[test]
    fn type_specifiers_and_definitions() {
        insta::assert_snapshot!(outline("struct S *p; std::string name() { return {}; }"), @r"
        translation-unit
          simple-declaration
            elaborated: struct S
            declarator *p
          simple-declaration (definition)
            type: std::string
            declarator name
              parameters
        ");
    }

    #[test]
    fn anonymous_union_and_virtual_base() {
        insta::assert_snapshot!(outline("struct A : virtual private B { union { int i; float f; } u; };"), @r"
        translation-unit
          simple-declaration
            class-specifier struct A
              base private virtual B
              simple-declaration [public]
                class-specifier union <anonymous>
                  simple-declaration [public]
                    specifier: int
                    declarator i
                  simple-declaration [public]
                    specifier: float
                    declarator f
                declarator u
        ");
    }
}
