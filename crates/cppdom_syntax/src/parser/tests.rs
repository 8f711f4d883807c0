#[cfg(test)]
/// Parser unit tests.
///
/// Event-level tests pin the exact sequence through [`crate::events::EventLog`]; tree-level tests go through
/// [`build_translation_unit`] and the real builder.
mod tests {
    use super::*;
    use crate::ast::{
        AccessSpecifier, ClassKind, Declaration, FundamentalType, PointerKind, Scope, SpecifierContainer,
        SpecifierFlag, TypeSpecifier,
    };
    use crate::diagnostics::ErrorKind;
    use crate::events::EventLog;

    fn events(source: &str) -> Vec<String> {
        let tokens = lexer::lex(source).expect("lexes");
        let mut log = EventLog::new();
        parse(&tokens, &mut log).expect("parses");
        log.lines().to_vec()
    }

    fn build(source: &str) -> TranslationUnit {
        build_translation_unit(source).unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
    }

    fn syntax_error(source: &str) -> CompileError {
        match build_translation_unit(source) {
            Err(FrontendError::Syntax(error)) => error,
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }

    /// Top-level simple declarations in order.
    fn decls(unit: &TranslationUnit) -> Vec<crate::ast::SimpleDeclarationId> {
        unit.declarations()
            .iter()
            .map(|d| match d {
                Declaration::Simple(id) => *id,
            })
            .collect()
    }

    fn declarator_names(unit: &TranslationUnit, container: ContainerRef) -> Vec<String> {
        unit.container(container)
            .declarators()
            .iter()
            .map(|d| unit[*d].name().map_or_else(String::new, |n| n.as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_simple_declaration_event_sequence() {
        assert_eq!(
            events("int x;"),
            vec![
                "translation_unit_begin",
                "  simple_declaration_begin unit `int` -> simple-declaration#0",
                "    simple_decl_specifier simple-declaration#0 `int`",
                "    declarator_begin simple-declaration#0 -> declarator#0",
                "      name_begin `x`",
                "      name_end `x`",
                "      declarator_id declarator#0",
                "    declarator_end declarator#0",
                "  simple_declaration_end simple-declaration#0",
                "translation_unit_end",
            ]
        );
    }

    #[test]
    fn test_skipped_expressions_report_operators_and_terminals() {
        let lines = events("int a[N + 1] = { x, 'c' }, b = -nullptr; void f(int p = 2 * k);");
        let expression: Vec<&str> = lines
            .iter()
            .map(|l| l.trim_start())
            .filter(|l| l.starts_with("expression_"))
            .collect();
        assert_eq!(
            expression,
            vec![
                "expression_terminal `N`",
                "expression_operator `+`",
                "expression_terminal `1`",
                "expression_terminal `x`",
                "expression_terminal `'c'`",
                "expression_operator `-`",
                "expression_terminal `nullptr`",
                "expression_terminal `2`",
                "expression_operator `*`",
                "expression_terminal `k`",
            ]
        );
        // The builder ignores them.
        let unit = build("int a[N + 1] = { x, 'c' };");
        assert_eq!(unit.node_count(), 2);
    }

    #[test]
    fn test_class_event_sequence_nests_members_inside_class() {
        let lines = events("struct S : virtual public B { int a; };");
        let expected = [
            "  simple_declaration_begin unit `struct` -> simple-declaration#0",
            "    class_specifier_begin simple-declaration#0 `struct` -> class-specifier#0",
            "      name_begin `S`",
            "      name_end `S`",
            "      class_specifier_name class-specifier#0",
            "      base_specifier_begin class-specifier#0 -> base-specifier#0",
            "        base_specifier_virtual base-specifier#0 true",
            "        base_specifier_visibility base-specifier#0 `public`",
            "        name_begin `B`",
            "        name_end `B`",
            "        base_specifier_name base-specifier#0",
            "      base_specifier_end base-specifier#0",
            "      simple_declaration_begin class-specifier#0 `int` -> simple-declaration#1",
        ];
        assert_eq!(&lines[1..=expected.len()], &expected[..]);
        assert_eq!(lines.last().map(String::as_str), Some("translation_unit_end"));
    }

    #[test]
    fn test_end_to_end_class_with_base_and_members() {
        let unit = build("class Foo : public Base { int x; void m(int a); };");
        let top = decls(&unit);
        assert_eq!(top.len(), 1);

        let Some(TypeSpecifier::Class(class)) = unit[top[0]].type_specifier() else {
            panic!("expected a class specifier");
        };
        let class = &unit[*class];
        assert_eq!(class.kind(), ClassKind::Class);
        assert_eq!(class.name().map(|n| n.as_str()), Some("Foo"));

        assert_eq!(class.bases().len(), 1);
        let base = &unit[class.bases()[0]];
        assert_eq!(base.name(), Some("Base"));
        assert_eq!(base.access(), AccessSpecifier::Public);
        assert!(!base.is_virtual());

        let members: Vec<_> = class
            .declarations()
            .iter()
            .map(|d| match d {
                Declaration::Simple(id) => *id,
            })
            .collect();
        assert_eq!(members.len(), 2);
        assert_eq!(unit[members[0]].access(), Some(AccessSpecifier::Private));
        assert_eq!(declarator_names(&unit, ContainerRef::Simple(members[0])), vec!["x"]);

        let m = unit[members[1]].declarators()[0];
        assert_eq!(unit[m].name().map(|n| n.as_str()), Some("m"));
        let clause = unit[m].parameters().expect("m is a function");
        let params = unit[clause].parameters();
        assert_eq!(params.len(), 1);
        let param = &unit[params[0]];
        assert_eq!(param.decl_specifier().map(|s| s.fundamental()), Some(FundamentalType::Int));
        assert_eq!(declarator_names(&unit, ContainerRef::Parameter(params[0])), vec!["a"]);
    }

    #[test]
    fn test_specifiers_and_multiple_declarators() {
        let unit = build("static const unsigned long int x = 5, *y, z[3][4];");
        let decl = decls(&unit)[0];
        let spec = unit[decl].decl_specifier().expect("has specifiers");
        assert_eq!(spec.to_string(), "static const unsigned long int");
        assert!(spec.has(SpecifierFlag::Static));
        assert!(spec.is_frozen());

        let ds = unit[decl].declarators();
        assert_eq!(declarator_names(&unit, ContainerRef::Simple(decl)), vec!["x", "y", "z"]);
        assert!(unit[ds[0]].pointer_operators().is_empty());
        assert_eq!(unit[ds[1]].pointer_operators()[0].kind, PointerKind::Pointer);
        assert_eq!(unit[ds[2]].array_dimensions(), 2);
    }

    #[test]
    fn test_function_definition_body_is_skipped() {
        let unit = build("int main(int argc, char **argv) { if (argc) { return 1; } return 0; }\nint after;");
        let top = decls(&unit);
        assert_eq!(top.len(), 2);
        assert!(unit[top[0]].is_function_definition());
        assert!(!unit[top[1]].is_function_definition());

        let main = unit[top[0]].declarators()[0];
        let clause = unit[main].parameters().expect("main takes parameters");
        let params = unit[clause].parameters();
        assert_eq!(params.len(), 2);
        let argv = unit[params[1]].declarators()[0];
        assert_eq!(unit[argv].pointer_operators().len(), 2);
    }

    #[test]
    fn test_function_pointer_uses_nested_declarator() {
        let unit = build("void (*handler)(int);");
        let outer = unit[decls(&unit)[0]].declarators()[0];
        assert!(unit[outer].name().is_none());
        assert!(unit[outer].is_function());

        let inner = unit[outer].nested().expect("nested declarator");
        assert_eq!(unit[inner].name().map(|n| n.as_str()), Some("handler"));
        assert_eq!(unit[inner].pointer_operators().len(), 1);
        assert_eq!(unit.function_parameters(outer), unit[outer].parameters());
    }

    #[test]
    fn test_direct_initializer_is_not_a_parameter_clause() {
        let unit = build("int x(5); int f(int); int g();");
        let top = decls(&unit);
        let x = unit[top[0]].declarators()[0];
        let f = unit[top[1]].declarators()[0];
        let g = unit[top[2]].declarators()[0];
        assert!(!unit[x].is_function());
        assert!(unit[f].is_function());
        assert!(unit[g].is_function());
    }

    #[test]
    fn test_member_visibility_labels() {
        let unit = build("class C { int a; public: int b; protected: int c; };");
        let Some(TypeSpecifier::Class(class)) = unit[decls(&unit)[0]].type_specifier() else {
            panic!("expected a class specifier");
        };
        let access: Vec<_> = unit[*class]
            .declarations()
            .iter()
            .map(|d| match d {
                Declaration::Simple(id) => unit[*id].access(),
            })
            .collect();
        assert_eq!(
            access,
            vec![
                Some(AccessSpecifier::Private),
                Some(AccessSpecifier::Public),
                Some(AccessSpecifier::Protected)
            ]
        );
    }

    #[test]
    fn test_elaborated_and_named_type_specifiers() {
        let unit = build("struct S *p; std::string s; const Foo &r = other;");
        let top = decls(&unit);
        match unit[top[0]].type_specifier() {
            Some(TypeSpecifier::Elaborated { kind, name }) => {
                assert_eq!(*kind, ClassKind::Struct);
                assert_eq!(name.as_str(), "S");
            }
            other => panic!("expected elaborated specifier, got {other:?}"),
        }
        match unit[top[1]].type_specifier() {
            Some(TypeSpecifier::Named(name)) => assert_eq!(name.as_str(), "std::string"),
            other => panic!("expected named specifier, got {other:?}"),
        }
        match unit[top[2]].type_specifier() {
            Some(TypeSpecifier::Named(name)) => assert_eq!(name.as_str(), "Foo"),
            other => panic!("expected named specifier, got {other:?}"),
        }
        assert_eq!(declarator_names(&unit, ContainerRef::Simple(top[2])), vec!["r"]);
    }

    #[test]
    fn test_special_member_names() {
        let unit = build(
            "class V { public: V(); explicit V(int n); virtual ~V(); V& operator=(const V&); \
             explicit operator bool() const; void* operator new[](unsigned long size); };",
        );
        let Some(TypeSpecifier::Class(class)) = unit[decls(&unit)[0]].type_specifier() else {
            panic!("expected a class specifier");
        };
        let names: Vec<String> = unit[*class]
            .declarations()
            .iter()
            .flat_map(|d| match d {
                Declaration::Simple(id) => declarator_names(&unit, ContainerRef::Simple(*id)),
            })
            .collect();
        assert_eq!(names, vec!["V", "V", "~V", "operator=", "operator bool", "operator new[]"]);
    }

    #[test]
    fn test_out_of_class_constructor_with_initializers() {
        let unit = build("Foo::Foo(int x) : a(x), b{x}, Base() { init(); }");
        let decl = decls(&unit)[0];
        assert!(unit[decl].is_function_definition());
        assert!(unit[decl].type_specifier().is_none());
        assert_eq!(declarator_names(&unit, ContainerRef::Simple(decl)), vec!["Foo::Foo"]);
    }

    #[test]
    fn test_bit_fields_and_pure_virtual() {
        let unit = build("struct B { unsigned a : 3, b : 5; virtual void f() = 0; };");
        let Some(TypeSpecifier::Class(class)) = unit[decls(&unit)[0]].type_specifier() else {
            panic!("expected a class specifier");
        };
        let members: Vec<_> = unit[*class]
            .declarations()
            .iter()
            .map(|d| match d {
                Declaration::Simple(id) => *id,
            })
            .collect();
        assert_eq!(declarator_names(&unit, ContainerRef::Simple(members[0])), vec!["a", "b"]);
        assert!(!unit[members[1]].is_function_definition());
    }

    #[test]
    fn test_base_clause_accepts_virtual_and_access_in_either_order() {
        let unit = build("struct D : virtual protected A, private virtual B, C {};");
        let Some(TypeSpecifier::Class(class)) = unit[decls(&unit)[0]].type_specifier() else {
            panic!("expected a class specifier");
        };
        let bases: Vec<_> = unit[*class]
            .bases()
            .iter()
            .map(|b| (unit[*b].name().map(str::to_string), unit[*b].access(), unit[*b].is_virtual()))
            .collect();
        assert_eq!(
            bases,
            vec![
                (Some("A".to_string()), AccessSpecifier::Protected, true),
                (Some("B".to_string()), AccessSpecifier::Private, true),
                (Some("C".to_string()), AccessSpecifier::Public, false),
            ]
        );
    }

    #[test]
    fn test_directives_emit_markers() {
        let lines = events("#include <stdio.h>\n#include \"local.h\"\n#define MAX 10\n#pragma once\nint x;");
        assert_eq!(
            &lines[1..6],
            &[
                "  inclusion_begin stdio.h",
                "  inclusion_end",
                "  inclusion_begin local.h",
                "  inclusion_end",
                "  macro_defined MAX",
            ]
        );
        assert_eq!(lines[6], "  simple_declaration_begin unit `int` -> simple-declaration#0");
    }

    #[test]
    fn test_variadic_and_abstract_parameters() {
        let unit = build("int printf(const char *fmt, ...); void g(int, void (*)(int), int[]);");
        let top = decls(&unit);
        let printf = unit[top[0]].declarators()[0];
        let clause = unit[printf].parameters().expect("function");
        assert_eq!(unit[clause].parameters().len(), 1);

        let g = unit[top[1]].declarators()[0];
        let clause = unit[g].parameters().expect("function");
        let params = unit[clause].parameters();
        assert_eq!(params.len(), 3);
        assert!(unit[params[0]].declarators().is_empty());
        let callback = unit[params[1]].declarators()[0];
        assert!(unit[callback].nested().is_some());
        assert!(unit[callback].is_function());
        let array = unit[params[2]].declarators()[0];
        assert_eq!(unit[array].array_dimensions(), 1);
    }

    #[test]
    fn test_unsupported_constructs_are_reported() {
        for source in ["namespace n { int x; }", "template <class T> T id(T);", "enum E { A };", "extern \"C\" int f();"]
        {
            match build_translation_unit(source) {
                Err(FrontendError::Syntax(error)) => {
                    assert_eq!(error.kind, ErrorKind::Unsupported, "{source}: {}", error.message)
                }
                other => panic!("expected an unsupported error for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_semicolon_is_a_syntax_error() {
        let error = syntax_error("int x int y;");
        assert_eq!(error.kind, ErrorKind::Syntax);
        assert!(error.message.contains("Expected ';' after declaration"), "{}", error.message);
    }

    #[test]
    fn test_unclosed_class_body_is_a_syntax_error() {
        let error = syntax_error("class A { int x;");
        assert!(error.message.contains("Expected '}' to close class body"), "{}", error.message);
    }

    #[test]
    fn test_unbalanced_function_body_is_a_syntax_error() {
        let error = syntax_error("void f() { if (x) {");
        assert!(error.message.contains("Unclosed bracket"), "{}", error.message);
    }

    fn nested_structs(depth: usize) -> String {
        format!("{}int a; {}", "struct { ".repeat(depth), "} s; ".repeat(depth))
    }

    #[test]
    fn test_deep_nesting_is_rejected_instead_of_overflowing() {
        let depth = 10_000;
        let declarators = format!("int {}x{};", "(*".repeat(depth), ")".repeat(depth));
        let parameters = format!("void f({}{};", "void (*g)(".repeat(depth), ")".repeat(depth + 1));
        for source in [declarators, parameters, nested_structs(depth)] {
            let error = syntax_error(&source);
            assert!(error.message.contains("Declaration nesting too deep"), "{}", error.message);
            assert_eq!(error.notes.len(), 1);
        }
    }

    #[test]
    fn test_moderate_nesting_builds() {
        let unit = build(&nested_structs(64));
        assert_eq!(decls(&unit).len(), 1);
        let unit = build(&format!("int {}x{};", "(*".repeat(60), ")".repeat(60)));
        assert_eq!(unit.names().len(), 1);
    }

    #[test]
    fn test_token_stream_without_eof_is_rejected() {
        let mut log = EventLog::new();
        let err = parse(&[], &mut log).expect_err("empty stream has no Eof");
        assert!(matches!(err, ParseError::Syntax(_)));
        assert!(log.lines().is_empty(), "no events before the stream is validated");
    }

    #[test]
    fn test_callback_errors_stop_the_parse() {
        let source = "int x;";
        let tokens = lexer::lex(source).expect("lexes");
        let mut builder = DomBuilder::new(source);
        // Starting the unit twice makes the builder reject the parser's own translation_unit_begin.
        builder.translation_unit_begin().expect("first start");
        let err = parse(&tokens, &mut builder).expect_err("second start fails");
        assert_eq!(err, ParseError::Build(BuildError::AlreadyStarted));
    }

    #[test]
    fn test_lexer_errors_surface_through_build() {
        match build_translation_unit("int s = \"unterminated;") {
            Err(FrontendError::Lex(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected lexer errors, got {other:?}"),
        }
    }
}
