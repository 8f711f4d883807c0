//! Incremental tree builder driven by parser events.
//!
//! [`DomBuilder`] implements [`ParserCallback`]. It keeps an explicit stack of open construction contexts and checks
//! every event against it:
//!
//! - a `*_begin` must receive the innermost open construct as its parent (inclusion markers are transparent);
//! - a `*_end` must close exactly the innermost open context;
//! - mutators and name claims must refer to a context that is still open somewhere on the stack.
//!
//! Names travel through a single-slot buffer (`name_begin` / `name_end` / claim). Specifier keywords are folded into
//! the container's [`DeclarationSpecifier`](crate::ast::DeclarationSpecifier), which freezes when the container ends.
//!
//! ## Notes
//! - The first contract violation poisons the builder: that event and every later one return an error, and
//!   [`DomBuilder::finish`] never yields a half-built tree.
//! - Tokens that make no sense at a classification site (an unknown class key or access keyword, a non-pointer
//!   token passed to `pointer_operator`) are not errors; they fall back to the documented default and are logged at
//!   `trace`.

mod errors;
mod name_buffer;

pub use errors::{BuildError, BuildResult};

use std::fmt;

use cppdom_core::lang::keywords::KeywordId;
use cppdom_core::lang::operators::OperatorId;

use crate::ast::{
    AccessSpecifier, BaseSpecifierId, ClassKind, ClassSpecifierId, ContainerRef, DeclarationSpecifier, DeclaratorId,
    DeclaratorOwner, ParameterClauseId, ParameterDeclarationId, PointerKind, ScopeRef, SimpleDeclarationId,
    TranslationUnit, TypeSpecifier, UnitId,
};
use crate::callback::ParserCallback;
use crate::lexer::Token;

use name_buffer::NameBuffer;

/// One entry of the construction stack.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {
    Unit(UnitId),
    SimpleDeclaration(SimpleDeclarationId),
    ClassSpecifier(ClassSpecifierId),
    BaseSpecifier(BaseSpecifierId),
    Declarator(DeclaratorId),
    ParameterClause(ParameterClauseId),
    ParameterDeclaration(ParameterDeclarationId),
    Inclusion(String),
    FunctionBody,
}

impl From<ScopeRef> for Context {
    fn from(scope: ScopeRef) -> Self {
        match scope {
            ScopeRef::Unit(id) => Context::Unit(id),
            ScopeRef::Class(id) => Context::ClassSpecifier(id),
        }
    }
}

impl From<ContainerRef> for Context {
    fn from(container: ContainerRef) -> Self {
        match container {
            ContainerRef::Simple(id) => Context::SimpleDeclaration(id),
            ContainerRef::Parameter(id) => Context::ParameterDeclaration(id),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Unit(id) => id.fmt(f),
            Context::SimpleDeclaration(id) => id.fmt(f),
            Context::ClassSpecifier(id) => id.fmt(f),
            Context::BaseSpecifier(id) => id.fmt(f),
            Context::Declarator(id) => id.fmt(f),
            Context::ParameterClause(id) => id.fmt(f),
            Context::ParameterDeclaration(id) => id.fmt(f),
            Context::Inclusion(path) => write!(f, "inclusion of `{path}`"),
            Context::FunctionBody => f.write_str("function body"),
        }
    }
}

/// Builds a [`TranslationUnit`] from a stream of [`ParserCallback`] events.
///
/// The builder borrows the source text so that names can be spelled from their token spans.
#[derive(Debug)]
pub struct DomBuilder<'src> {
    source: &'src str,
    unit: Option<TranslationUnit>,
    contexts: Vec<Context>,
    names: NameBuffer,
    ended: bool,
    poisoned: Option<BuildError>,
}

impl<'src> DomBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            unit: None,
            contexts: Vec::new(),
            names: NameBuffer::default(),
            ended: false,
            poisoned: None,
        }
    }

    /// The first contract violation, if one happened.
    pub fn poisoned_by(&self) -> Option<&BuildError> {
        self.poisoned.as_ref()
    }

    /// Number of open contexts, including the unit itself.
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Hand over the finished tree.
    ///
    /// ## Errors
    /// - [`BuildError::Poisoned`] if any event failed.
    /// - [`BuildError::Unfinished`] if `translation_unit_end` has not been seen.
    pub fn finish(mut self) -> BuildResult<TranslationUnit> {
        if let Some(first) = self.poisoned {
            return Err(BuildError::Poisoned { first: Box::new(first) });
        }
        match self.unit.take() {
            Some(unit) if self.ended => Ok(unit),
            _ => Err(BuildError::Unfinished),
        }
    }

    // ========================================================================
    // Poisoning
    // ========================================================================

    /// Run one event, refusing it if the builder is poisoned and poisoning it if the event fails.
    fn guard<T>(&mut self, event: &'static str, f: impl FnOnce(&mut Self) -> BuildResult<T>) -> BuildResult<T> {
        if let Some(first) = &self.poisoned {
            return Err(BuildError::Poisoned {
                first: Box::new(first.clone()),
            });
        }
        let result = f(self);
        if let Err(err) = &result {
            tracing::warn!(event, error = %err, "builder poisoned");
            self.poisoned = Some(err.clone());
        }
        result
    }

    // ========================================================================
    // Context stack
    // ========================================================================

    fn unit_mut(&mut self, event: &'static str) -> BuildResult<&mut TranslationUnit> {
        self.unit.as_mut().ok_or(BuildError::NotStarted { event })
    }

    /// Innermost open context, looking through inclusion markers.
    fn innermost(&self) -> Option<&Context> {
        self.contexts
            .iter()
            .rev()
            .find(|ctx| !matches!(ctx, Context::Inclusion(_)))
    }

    fn describe_innermost(&self) -> String {
        self.innermost()
            .map(ToString::to_string)
            .unwrap_or_else(|| "nothing".to_string())
    }

    fn require_started(&self, event: &'static str) -> BuildResult<()> {
        if self.unit.is_none() {
            return Err(BuildError::NotStarted { event });
        }
        Ok(())
    }

    fn require_innermost(&self, event: &'static str, parent: Context) -> BuildResult<()> {
        self.require_started(event)?;
        if self.innermost() == Some(&parent) {
            Ok(())
        } else {
            Err(BuildError::NotInnermost {
                event,
                given: parent.to_string(),
                innermost: self.describe_innermost(),
            })
        }
    }

    fn require_open(&self, event: &'static str, ctx: Context) -> BuildResult<()> {
        self.require_started(event)?;
        if self.contexts.contains(&ctx) {
            Ok(())
        } else {
            Err(BuildError::ClosedContext {
                event,
                handle: ctx.to_string(),
            })
        }
    }

    fn push(&mut self, ctx: Context) {
        tracing::debug!(context = %ctx, depth = self.contexts.len() + 1, "open");
        self.contexts.push(ctx);
    }

    fn pop(&mut self, event: &'static str, ctx: Context) -> BuildResult<()> {
        self.require_started(event)?;
        match self.contexts.last() {
            Some(top) if *top == ctx => {
                tracing::debug!(context = %ctx, depth = self.contexts.len(), "close");
                self.contexts.pop();
                Ok(())
            }
            top => Err(BuildError::UnbalancedEnd {
                event,
                closing: ctx.to_string(),
                innermost: top.map(ToString::to_string).unwrap_or_else(|| "nothing".to_string()),
            }),
        }
    }

    fn freeze_specifier(&mut self, event: &'static str, container: ContainerRef) -> BuildResult<()> {
        if let Some(spec) = self.unit_mut(event)?.slots_mut(container).decl_specifier.as_mut() {
            spec.freeze();
        }
        Ok(())
    }

    fn claim_name(&mut self, event: &'static str) -> BuildResult<crate::ast::Name> {
        self.names.claim(event, self.source)
    }
}

impl ParserCallback for DomBuilder<'_> {
    // ---- translation unit ----

    fn translation_unit_begin(&mut self) -> BuildResult<UnitId> {
        self.guard("translation_unit_begin", |b| {
            if b.unit.is_some() {
                return Err(BuildError::AlreadyStarted);
            }
            let id = UnitId::fresh();
            b.unit = Some(TranslationUnit::new(id));
            b.push(Context::Unit(id));
            Ok(id)
        })
    }

    fn translation_unit_end(&mut self, unit: UnitId) -> BuildResult<()> {
        self.guard("translation_unit_end", |b| {
            let root = b.unit_mut("translation_unit_end")?.id();
            if unit != root {
                return Err(BuildError::UnitNotRoot {
                    given: unit.to_string(),
                    root: root.to_string(),
                });
            }
            if let Some(name) = b.names.pending_text(b.source) {
                return Err(BuildError::UnclaimedName { name });
            }
            if b.contexts.len() > 1 {
                return Err(BuildError::UnclosedContexts {
                    count: b.contexts.len() - 1,
                    innermost: b.contexts.last().map(ToString::to_string).unwrap_or_default(),
                });
            }
            b.pop("translation_unit_end", Context::Unit(unit))?;
            b.ended = true;
            Ok(())
        })
    }

    // ---- preprocessor markers ----

    fn inclusion_begin(&mut self, path: &str) -> BuildResult<()> {
        self.guard("inclusion_begin", |b| {
            b.require_started("inclusion_begin")?;
            tracing::debug!(path, "inclusion");
            b.push(Context::Inclusion(path.to_string()));
            Ok(())
        })
    }

    fn inclusion_end(&mut self) -> BuildResult<()> {
        self.guard("inclusion_end", |b| {
            b.require_started("inclusion_end")?;
            match b.contexts.last() {
                Some(Context::Inclusion(_)) => {
                    b.contexts.pop();
                    Ok(())
                }
                top => Err(BuildError::UnbalancedEnd {
                    event: "inclusion_end",
                    closing: "an inclusion".to_string(),
                    innermost: top.map(ToString::to_string).unwrap_or_else(|| "nothing".to_string()),
                }),
            }
        })
    }

    fn macro_defined(&mut self, name: &str) -> BuildResult<()> {
        self.guard("macro_defined", |b| {
            b.require_started("macro_defined")?;
            tracing::debug!(name, "macro defined");
            Ok(())
        })
    }

    // ---- simple declarations ----

    fn simple_declaration_begin(&mut self, scope: ScopeRef, first: &Token) -> BuildResult<SimpleDeclarationId> {
        const EVENT: &str = "simple_declaration_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, scope.into())?;
            let id = b.unit_mut(EVENT)?.add_simple_declaration(scope, first.span);
            b.push(Context::SimpleDeclaration(id));
            Ok(id)
        })
    }

    fn simple_declaration_end(&mut self, decl: SimpleDeclarationId) -> BuildResult<()> {
        const EVENT: &str = "simple_declaration_end";
        self.guard(EVENT, |b| {
            b.pop(EVENT, Context::SimpleDeclaration(decl))?;
            b.freeze_specifier(EVENT, ContainerRef::Simple(decl))
        })
    }

    fn simple_decl_specifier(&mut self, container: ContainerRef, token: &Token) -> BuildResult<()> {
        const EVENT: &str = "simple_decl_specifier";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, container.into())?;
            let spec = b
                .unit_mut(EVENT)?
                .slots_mut(container)
                .decl_specifier
                .get_or_insert_with(DeclarationSpecifier::new);
            let applied = token.keyword_id().is_some_and(|kw| spec.accumulate(kw));
            if !applied {
                tracing::trace!(token = ?token.kind, "not a declaration specifier; ignored");
            }
            Ok(())
        })
    }

    fn simple_decl_specifier_name(&mut self, container: ContainerRef) -> BuildResult<()> {
        const EVENT: &str = "simple_decl_specifier_name";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, container.into())?;
            let name = b.claim_name(EVENT)?;
            b.unit_mut(EVENT)?.slots_mut(container).type_specifier = Some(TypeSpecifier::Named(name));
            Ok(())
        })
    }

    fn elaborated_type_specifier(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<()> {
        const EVENT: &str = "elaborated_type_specifier";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, container.into())?;
            let kind = ClassKind::from_keyword(class_key.keyword_id());
            let name = b.claim_name(EVENT)?;
            b.unit_mut(EVENT)?.slots_mut(container).type_specifier = Some(TypeSpecifier::Elaborated { kind, name });
            Ok(())
        })
    }

    fn function_body_begin(&mut self) -> BuildResult<()> {
        const EVENT: &str = "function_body_begin";
        self.guard(EVENT, |b| {
            b.require_started(EVENT)?;
            let Some(Context::SimpleDeclaration(decl)) = b.innermost().cloned() else {
                return Err(BuildError::NotInnermost {
                    event: EVENT,
                    given: "a function body".to_string(),
                    innermost: b.describe_innermost(),
                });
            };
            b.unit_mut(EVENT)?.simple_declaration_mut(decl).mark_function_definition();
            b.push(Context::FunctionBody);
            Ok(())
        })
    }

    fn function_body_end(&mut self) -> BuildResult<()> {
        const EVENT: &str = "function_body_end";
        self.guard(EVENT, |b| b.pop(EVENT, Context::FunctionBody))
    }

    // ---- class specifiers ----

    fn class_specifier_begin(&mut self, container: ContainerRef, class_key: &Token) -> BuildResult<ClassSpecifierId> {
        const EVENT: &str = "class_specifier_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, container.into())?;
            let keyword = class_key.keyword_id();
            let kind = ClassKind::from_keyword(keyword);
            if !matches!(keyword, Some(KeywordId::Class | KeywordId::Struct | KeywordId::Union)) {
                tracing::trace!(token = ?class_key.kind, "unrecognized class key; using struct");
            }
            let id = b.unit_mut(EVENT)?.add_class_specifier(container, kind, class_key.span);
            b.push(Context::ClassSpecifier(id));
            Ok(id)
        })
    }

    fn class_specifier_name(&mut self, class: ClassSpecifierId) -> BuildResult<()> {
        const EVENT: &str = "class_specifier_name";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::ClassSpecifier(class))?;
            let name = b.claim_name(EVENT)?;
            b.unit_mut(EVENT)?.class_specifier_mut(class).set_name(name);
            Ok(())
        })
    }

    fn class_member_visibility(&mut self, class: ClassSpecifierId, token: &Token) -> BuildResult<()> {
        const EVENT: &str = "class_member_visibility";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::ClassSpecifier(class))?;
            match AccessSpecifier::from_keyword(token.keyword_id()) {
                Some(access) => b.unit_mut(EVENT)?.class_specifier_mut(class).set_member_access(access),
                None => tracing::trace!(token = ?token.kind, "unrecognized access label; keeping current access"),
            }
            Ok(())
        })
    }

    fn class_specifier_end(&mut self, class: ClassSpecifierId) -> BuildResult<()> {
        const EVENT: &str = "class_specifier_end";
        self.guard(EVENT, |b| b.pop(EVENT, Context::ClassSpecifier(class)))
    }

    fn base_specifier_begin(&mut self, class: ClassSpecifierId) -> BuildResult<BaseSpecifierId> {
        const EVENT: &str = "base_specifier_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, Context::ClassSpecifier(class))?;
            let id = b.unit_mut(EVENT)?.add_base_specifier(class);
            b.push(Context::BaseSpecifier(id));
            Ok(id)
        })
    }

    fn base_specifier_virtual(&mut self, base: BaseSpecifierId, is_virtual: bool) -> BuildResult<()> {
        const EVENT: &str = "base_specifier_virtual";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::BaseSpecifier(base))?;
            b.unit_mut(EVENT)?.base_specifier_mut(base).set_virtual(is_virtual);
            Ok(())
        })
    }

    fn base_specifier_visibility(&mut self, base: BaseSpecifierId, token: &Token) -> BuildResult<()> {
        const EVENT: &str = "base_specifier_visibility";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::BaseSpecifier(base))?;
            match AccessSpecifier::from_keyword(token.keyword_id()) {
                Some(access) => b.unit_mut(EVENT)?.base_specifier_mut(base).set_access(access),
                None => tracing::trace!(token = ?token.kind, "unrecognized base access; keeping current access"),
            }
            Ok(())
        })
    }

    fn base_specifier_name(&mut self, base: BaseSpecifierId) -> BuildResult<()> {
        const EVENT: &str = "base_specifier_name";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::BaseSpecifier(base))?;
            let name = b.claim_name(EVENT)?;
            b.unit_mut(EVENT)?
                .base_specifier_mut(base)
                .set_name(name.as_str().to_string());
            Ok(())
        })
    }

    fn base_specifier_end(&mut self, base: BaseSpecifierId) -> BuildResult<()> {
        const EVENT: &str = "base_specifier_end";
        self.guard(EVENT, |b| b.pop(EVENT, Context::BaseSpecifier(base)))
    }

    // ---- declarators ----

    fn declarator_begin(&mut self, container: ContainerRef) -> BuildResult<DeclaratorId> {
        const EVENT: &str = "declarator_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, container.into())?;
            let id = b.unit_mut(EVENT)?.add_declarator(DeclaratorOwner::Container(container));
            b.push(Context::Declarator(id));
            Ok(id)
        })
    }

    fn nested_declarator_begin(&mut self, outer: DeclaratorId) -> BuildResult<DeclaratorId> {
        const EVENT: &str = "nested_declarator_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, Context::Declarator(outer))?;
            let id = b.unit_mut(EVENT)?.add_declarator(DeclaratorOwner::Declarator(outer));
            b.push(Context::Declarator(id));
            Ok(id)
        })
    }

    fn pointer_operator(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()> {
        const EVENT: &str = "pointer_operator";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::Declarator(declarator))?;
            let kind = match token.operator_id() {
                Some(OperatorId::Star) => PointerKind::Pointer,
                Some(OperatorId::Amp) => PointerKind::LvalueReference,
                Some(OperatorId::AmpAmp) => PointerKind::RvalueReference,
                _ => {
                    tracing::trace!(token = ?token.kind, "not a pointer operator; ignored");
                    return Ok(());
                }
            };
            b.unit_mut(EVENT)?.declarator_mut(declarator).push_pointer_operator(kind);
            Ok(())
        })
    }

    fn pointer_operator_cv(&mut self, declarator: DeclaratorId, token: &Token) -> BuildResult<()> {
        const EVENT: &str = "pointer_operator_cv";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::Declarator(declarator))?;
            let applied = match token.keyword_id() {
                Some(keyword) => b.unit_mut(EVENT)?.declarator_mut(declarator).qualify_last_pointer(keyword),
                None => false,
            };
            if !applied {
                tracing::trace!(token = ?token.kind, "cv-qualifier without a pointer operator; ignored");
            }
            Ok(())
        })
    }

    fn declarator_id(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        const EVENT: &str = "declarator_id";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::Declarator(declarator))?;
            let name = b.claim_name(EVENT)?;
            b.unit_mut(EVENT)?.declarator_mut(declarator).set_name(name);
            Ok(())
        })
    }

    fn array_declarator(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        const EVENT: &str = "array_declarator";
        self.guard(EVENT, |b| {
            b.require_open(EVENT, Context::Declarator(declarator))?;
            b.unit_mut(EVENT)?.declarator_mut(declarator).add_array_dimension();
            Ok(())
        })
    }

    fn declarator_end(&mut self, declarator: DeclaratorId) -> BuildResult<()> {
        const EVENT: &str = "declarator_end";
        self.guard(EVENT, |b| b.pop(EVENT, Context::Declarator(declarator)))
    }

    // ---- parameters ----

    fn arguments_begin(&mut self, declarator: DeclaratorId) -> BuildResult<ParameterClauseId> {
        const EVENT: &str = "arguments_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, Context::Declarator(declarator))?;
            let id = b.unit_mut(EVENT)?.add_parameter_clause(declarator);
            b.push(Context::ParameterClause(id));
            Ok(id)
        })
    }

    fn arguments_end(&mut self, clause: ParameterClauseId) -> BuildResult<()> {
        const EVENT: &str = "arguments_end";
        self.guard(EVENT, |b| b.pop(EVENT, Context::ParameterClause(clause)))
    }

    fn parameter_declaration_begin(
        &mut self,
        clause: ParameterClauseId,
        first: &Token,
    ) -> BuildResult<ParameterDeclarationId> {
        const EVENT: &str = "parameter_declaration_begin";
        self.guard(EVENT, |b| {
            b.require_innermost(EVENT, Context::ParameterClause(clause))?;
            let id = b.unit_mut(EVENT)?.add_parameter_declaration(clause, first.span);
            b.push(Context::ParameterDeclaration(id));
            Ok(id)
        })
    }

    fn parameter_declaration_end(&mut self, param: ParameterDeclarationId) -> BuildResult<()> {
        const EVENT: &str = "parameter_declaration_end";
        self.guard(EVENT, |b| {
            b.pop(EVENT, Context::ParameterDeclaration(param))?;
            b.freeze_specifier(EVENT, ContainerRef::Parameter(param))
        })
    }

    // ---- names ----

    fn name_begin(&mut self, first: &Token) -> BuildResult<()> {
        const EVENT: &str = "name_begin";
        self.guard(EVENT, |b| {
            b.require_started(EVENT)?;
            b.names.begin(first.span, b.source)
        })
    }

    fn name_end(&mut self, last: &Token) -> BuildResult<()> {
        const EVENT: &str = "name_end";
        self.guard(EVENT, |b| {
            b.require_started(EVENT)?;
            b.names.end(last.span, b.source)
        })
    }
}
