//! The event vocabulary between a parser and whatever consumes its grammar productions.
//!
//! A parser drives a [`ParserCallback`] with strictly nested `*_begin` / `*_end` pairs plus leaf events. Each begin
//! receives the handle of the innermost open construct and returns the handle of the new one, which the parser
//! threads into nested events and finally into the matching end.
//!
//! ## Notes
//! - Names are delivered out of band: `name_begin(first)` / `name_end(last)` bracket a token range and the next
//!   claiming event (`class_specifier_name`, `declarator_id`, ...) consumes it.
//! - Every event returns [`BuildResult`]; the parser stops at the first error.
//!
//! ## See also
//! - [`crate::builder::DomBuilder`] builds a tree from these events.
//! - [`crate::events::EventLog`] records them as text.

use crate::ast::{
    BaseSpecifierId, ClassSpecifierId, ContainerRef, DeclaratorId, ParameterClauseId, ParameterDeclarationId,
    ScopeRef, SimpleDeclarationId, UnitId,
};
use crate::builder::BuildResult;
use crate::lexer::Token;

/// Receiver of grammar events.
pub trait ParserCallback {
    // ---- translation unit ----
    fn translation_unit_begin(&mut self) -> BuildResult<UnitId>;
    fn translation_unit_end(&mut self, unit: UnitId) -> BuildResult<()>;

    // ---- preprocessor markers ----
    fn inclusion_begin(&mut self, path: &str) -> BuildResult<()>;
    fn inclusion_end(&mut self) -> BuildResult<()>;
    fn macro_defined(&mut self, name: &str) -> BuildResult<()>;

    // ---- simple declarations ----
    fn simple_declaration_begin(&mut self, scope: ScopeRef, first: &Token) -> BuildResult<SimpleDeclarationId>;
    fn simple_declaration_end(&mut self, decl: SimpleDeclarationId) -> BuildResult<()>;

    /// One specifier keyword. Tokens that are not specifiers leave the record unchanged.
    fn simple_decl_specifier(&mut self, container: ContainerRef, token: &Token) -> BuildResult<()>;
    /// Claim the buffered name as a named type specifier (`std::string s;`).
    fn simple_decl_specifier_name(&mut self, container: ContainerRef) -> BuildResult<()>;
    /// Claim the buffered name as an elaborated type specifier (`struct S *p;`).
    fn elaborated_type_specifier(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<()>;

    fn function_body_begin(&mut self) -> BuildResult<()>;
    fn function_body_end(&mut self) -> BuildResult<()>;

    // ---- class specifiers ----
    fn class_specifier_begin(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<ClassSpecifierId>;
    fn class_specifier_name(&mut self, class: ClassSpecifierId) -> BuildResult<()>;
    fn class_member_visibility(&mut self, class: ClassSpecifierId, token: &Token) -> BuildResult<()>;
    fn class_specifier_end(&mut self, class: ClassSpecifierId) -> BuildResult<()>;

    fn base_specifier_begin(&mut self, class: ClassSpecifierId) -> BuildResult<BaseSpecifierId>;
    fn base_specifier_virtual(&mut self, base: BaseSpecifierId, is_virtual: bool) -> BuildResult<()>;
    fn base_specifier_visibility(&mut self, base: BaseSpecifierId, token: &Token) -> BuildResult<()>;
    fn base_specifier_name(&mut self, base: BaseSpecifierId) -> BuildResult<()>;
    fn base_specifier_end(&mut self, base: BaseSpecifierId) -> BuildResult<()>;

    // ---- declarators ----
    fn declarator_begin(&mut self, container: ContainerRef) -> BuildResult<DeclaratorId>;
    /// Open the inner declarator of `(*fp)`; owned by `outer`.
    fn nested_declarator_begin(&mut self, outer: DeclaratorId) -> BuildResult<DeclaratorId>;
    fn pointer_operator(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()>;
    fn pointer_operator_cv(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()>;
    fn declarator_id(&mut self, declarator: DeclaratorId) -> BuildResult<()>;
    fn array_declarator(&mut self, declarator: DeclaratorId) -> BuildResult<()>;
    fn declarator_end(&mut self, declarator: DeclaratorId) -> BuildResult<()>;

    // ---- parameters ----
    fn arguments_begin(&mut self, declarator: DeclaratorId) -> BuildResult<ParameterClauseId>;
    fn arguments_end(&mut self, clause: ParameterClauseId) -> BuildResult<()>;
    fn parameter_declaration_begin(
        &mut self,
        clause: ParameterClauseId,
        first: &Token,
    ) -> BuildResult<ParameterDeclarationId>;
    fn parameter_declaration_end(&mut self, param: ParameterDeclarationId) -> BuildResult<()>;

    // ---- names ----
    fn name_begin(&mut self, first: &Token) -> BuildResult<()>;
    fn name_end(&mut self, last: &Token) -> BuildResult<()>;

    // ---- expressions ----
    // Initializers and array bounds are skipped, not parsed; these report their tokens in order and are ignored
    // unless overridden.
    fn expression_operator(&mut self, _operator: &Token) -> BuildResult<()> {
        Ok(())
    }
    fn expression_terminal(&mut self, _terminal: &Token) -> BuildResult<()> {
        Ok(())
    }
}
