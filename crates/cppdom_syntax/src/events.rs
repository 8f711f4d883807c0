//! A [`ParserCallback`] that records events as indented text instead of building a tree.
//!
//! Used by the CLI's `--events` mode and by parser tests to pin down the exact event sequence. Handles are minted from
//! simple counters; no protocol checks are made.

use std::fmt::Write as _;

use crate::ast::{
    BaseSpecifierId, ClassSpecifierId, ContainerRef, DeclaratorId, ParameterClauseId, ParameterDeclarationId,
    ScopeRef, SimpleDeclarationId, UnitId,
};
use crate::builder::BuildResult;
use crate::callback::ParserCallback;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Default)]
pub struct EventLog {
    lines: Vec<String>,
    depth: usize,
    next_simple: usize,
    next_class: usize,
    next_base: usize,
    next_declarator: usize,
    next_clause: usize,
    next_parameter: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All events, one per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(out, "{line}");
        }
        out
    }

    fn record(&mut self, line: String) {
        self.lines.push(format!("{}{}", "  ".repeat(self.depth), line));
    }

    fn open(&mut self, line: String) {
        self.record(line);
        self.depth += 1;
    }

    fn close(&mut self, line: String) {
        self.depth = self.depth.saturating_sub(1);
        self.record(line);
    }

    fn mint(counter: &mut usize) -> usize {
        let id = *counter;
        *counter += 1;
        id
    }
}

/// Compact spelling of a token for the log.
fn show(token: &Token) -> String {
    match &token.kind {
        TokenKind::Keyword(id) => cppdom_core::lang::keywords::as_str(*id).to_string(),
        TokenKind::Operator(id) => cppdom_core::lang::operators::as_str(*id).to_string(),
        TokenKind::Punctuation(id) => cppdom_core::lang::punctuation::as_str(*id).to_string(),
        TokenKind::Ident(s) | TokenKind::Int(s) | TokenKind::Float(s) | TokenKind::Char(s) | TokenKind::String(s) => {
            s.clone()
        }
        TokenKind::Directive { name, .. } => format!("#{name}"),
        TokenKind::Eof => "<eof>".to_string(),
    }
}

impl ParserCallback for EventLog {
    fn translation_unit_begin(&mut self) -> BuildResult<UnitId> {
        self.open("translation_unit_begin".to_string());
        Ok(UnitId::fresh())
    }

    fn translation_unit_end(&mut self, _unit: UnitId) -> BuildResult<()> {
        self.close("translation_unit_end".to_string());
        Ok(())
    }

    fn inclusion_begin(&mut self, path: &str) -> BuildResult<()> {
        self.open(format!("inclusion_begin {path}"));
        Ok(())
    }

    fn inclusion_end(&mut self) -> BuildResult<()> {
        self.close("inclusion_end".to_string());
        Ok(())
    }

    fn macro_defined(&mut self, name: &str) -> BuildResult<()> {
        self.record(format!("macro_defined {name}"));
        Ok(())
    }

    fn simple_declaration_begin(&mut self, scope: ScopeRef, first: &Token) -> BuildResult<SimpleDeclarationId> {
        let id = SimpleDeclarationId::new(Self::mint(&mut self.next_simple));
        let scope = match scope {
            // Unit ids are process-unique; keep the log reproducible.
            ScopeRef::Unit(_) => "unit".to_string(),
            ScopeRef::Class(class) => class.to_string(),
        };
        self.open(format!("simple_declaration_begin {scope} `{}` -> {id}", show(first)));
        Ok(id)
    }

    fn simple_declaration_end(&mut self, decl: SimpleDeclarationId) -> BuildResult<()> {
        self.close(format!("simple_declaration_end {decl}"));
        Ok(())
    }

    fn simple_decl_specifier(&mut self, container: ContainerRef, token: &Token) -> BuildResult<()> {
        self.record(format!("simple_decl_specifier {container} `{}`", show(token)));
        Ok(())
    }

    fn simple_decl_specifier_name(&mut self, container: ContainerRef) -> BuildResult<()> {
        self.record(format!("simple_decl_specifier_name {container}"));
        Ok(())
    }

    fn elaborated_type_specifier(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<()> {
        self.record(format!("elaborated_type_specifier {container} `{}`", show(class_key)));
        Ok(())
    }

    fn function_body_begin(&mut self) -> BuildResult<()> {
        self.open("function_body_begin".to_string());
        Ok(())
    }

    fn function_body_end(&mut self) -> BuildResult<()> {
        self.close("function_body_end".to_string());
        Ok(())
    }

    fn class_specifier_begin(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<ClassSpecifierId> {
        let id = ClassSpecifierId::new(Self::mint(&mut self.next_class));
        self.open(format!("class_specifier_begin {container} `{}` -> {id}", show(class_key)));
        Ok(id)
    }

    fn class_specifier_name(&mut self, class: ClassSpecifierId) -> BuildResult<()> {
        self.record(format!("class_specifier_name {class}"));
        Ok(())
    }

    fn class_member_visibility(&mut self, class: ClassSpecifierId, token: &Token) -> BuildResult<()> {
        self.record(format!("class_member_visibility {class} `{}`", show(token)));
        Ok(())
    }

    fn class_specifier_end(&mut self, class: ClassSpecifierId) -> BuildResult<()> {
        self.close(format!("class_specifier_end {class}"));
        Ok(())
    }

    fn base_specifier_begin(&mut self, class: ClassSpecifierId) -> BuildResult<BaseSpecifierId> {
        let id = BaseSpecifierId::new(Self::mint(&mut self.next_base));
        self.open(format!("base_specifier_begin {class} -> {id}"));
        Ok(id)
    }

    fn base_specifier_virtual(&mut self, base: BaseSpecifierId, is_virtual: bool) -> BuildResult<()> {
        self.record(format!("base_specifier_virtual {base} {is_virtual}"));
        Ok(())
    }

    fn base_specifier_visibility(&mut self, base: BaseSpecifierId, token: &Token) -> BuildResult<()> {
        self.record(format!("base_specifier_visibility {base} `{}`", show(token)));
        Ok(())
    }

    fn base_specifier_name(&mut self, base: BaseSpecifierId) -> BuildResult<()> {
        self.record(format!("base_specifier_name {base}"));
        Ok(())
    }

    fn base_specifier_end(&mut self, base: BaseSpecifierId) -> BuildResult<()> {
        self.close(format!("base_specifier_end {base}"));
        Ok(())
    }

    fn declarator_begin(&mut self, container: ContainerRef) -> BuildResult<DeclaratorId> {
        let id = DeclaratorId::new(Self::mint(&mut self.next_declarator));
        self.open(format!("declarator_begin {container} -> {id}"));
        Ok(id)
    }

    fn nested_declarator_begin(&mut self, outer: DeclaratorId) -> BuildResult<DeclaratorId> {
        let id = DeclaratorId::new(Self::mint(&mut self.next_declarator));
        self.open(format!("nested_declarator_begin {outer} -> {id}"));
        Ok(id)
    }

    fn pointer_operator(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()> {
        self.record(format!("pointer_operator {declarator} `{}`", show(token)));
        Ok(())
    }

    fn pointer_operator_cv(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()> {
        self.record(format!("pointer_operator_cv {declarator} `{}`", show(token)));
        Ok(())
    }

    fn declarator_id(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        self.record(format!("declarator_id {declarator}"));
        Ok(())
    }

    fn array_declarator(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        self.record(format!("array_declarator {declarator}"));
        Ok(())
    }

    fn declarator_end(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        self.close(format!("declarator_end {declarator}"));
        Ok(())
    }

    fn arguments_begin(&mut self, declarator: DeclaratorId) -> BuildResult<ParameterClauseId> {
        let id = ParameterClauseId::new(Self::mint(&mut self.next_clause));
        self.open(format!("arguments_begin {declarator} -> {id}"));
        Ok(id)
    }

    fn arguments_end(&mut self, clause: ParameterClauseId) -> BuildResult<()> {
        self.close(format!("arguments_end {clause}"));
        Ok(())
    }

    fn parameter_declaration_begin(
        &mut self,
        clause: ParameterClauseId,
        first: &Token,
    ) -> BuildResult<ParameterDeclarationId> {
        let id = ParameterDeclarationId::new(Self::mint(&mut self.next_parameter));
        self.open(format!("parameter_declaration_begin {clause} `{}` -> {id}", show(first)));
        Ok(id)
    }

    fn parameter_declaration_end(&mut self, param: ParameterDeclarationId) -> BuildResult<()> {
        self.close(format!("parameter_declaration_end {param}"));
        Ok(())
    }

    fn expression_operator(&mut self, operator: &Token) -> BuildResult<()> {
        self.record(format!("expression_operator `{}`", show(operator)));
        Ok(())
    }

    fn expression_terminal(&mut self, terminal: &Token) -> BuildResult<()> {
        self.record(format!("expression_terminal `{}`", show(terminal)));
        Ok(())
    }

    fn name_begin(&mut self, first: &Token) -> BuildResult<()> {
        self.record(format!("name_begin `{}`", show(first)));
        Ok(())
    }

    fn name_end(&mut self, last: &Token) -> BuildResult<()> {
        self.record(format!("name_end `{}`", show(last)));
        Ok(())
    }
}
