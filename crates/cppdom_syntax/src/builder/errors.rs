//! Contract violations reported by the builder.
//!
//! Every variant means the event source broke the callback protocol; none of them is caused by the content of the
//! source text. The builder refuses all further events after the first one (see [`BuildError::Poisoned`]).

use thiserror::Error;

/// Result alias used by every builder event.
pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum BuildError {
    #[error("translation unit already started")]
    #[diagnostic(code(cppdom::build::already_started))]
    AlreadyStarted,

    #[error("`{event}` before `translation_unit_begin`")]
    #[diagnostic(code(cppdom::build::not_started))]
    NotStarted { event: &'static str },

    #[error("`{event}` was given {given}, but the innermost open context is {innermost}")]
    #[diagnostic(
        code(cppdom::build::not_innermost),
        help("every begin event must receive the handle of the innermost open construct")
    )]
    NotInnermost {
        event: &'static str,
        given: String,
        innermost: String,
    },

    #[error("`{event}` tried to close {closing}, but the innermost open context is {innermost}")]
    #[diagnostic(code(cppdom::build::unbalanced_end))]
    UnbalancedEnd {
        event: &'static str,
        closing: String,
        innermost: String,
    },

    #[error("`{event}` refers to {handle}, which is not open")]
    #[diagnostic(code(cppdom::build::closed_context))]
    ClosedContext { event: &'static str, handle: String },

    #[error("{given} is not the root of this builder ({root})")]
    #[diagnostic(code(cppdom::build::unit_not_root))]
    UnitNotRoot { given: String, root: String },

    #[error("{count} context(s) still open; innermost is {innermost}")]
    #[diagnostic(code(cppdom::build::unclosed_contexts))]
    UnclosedContexts { count: usize, innermost: String },

    #[error("`name_begin` while the name `{pending}` is still unclaimed")]
    #[diagnostic(
        code(cppdom::build::name_pending),
        help("the name buffer holds one name; claim it before starting another")
    )]
    NamePending { pending: String },

    #[error("`name_end` without a matching `name_begin`")]
    #[diagnostic(code(cppdom::build::no_open_name))]
    NoOpenName,

    #[error("`{event}` claims a name, but none is buffered")]
    #[diagnostic(code(cppdom::build::no_pending_name))]
    NoPendingName { event: &'static str },

    #[error("the name `{name}` was never claimed")]
    #[diagnostic(code(cppdom::build::unclaimed_name))]
    UnclaimedName { name: String },

    #[error("token span {start}..{end} lies outside the source (length {len})")]
    #[diagnostic(code(cppdom::build::span_out_of_bounds))]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("`finish` before `translation_unit_end`")]
    #[diagnostic(code(cppdom::build::unfinished))]
    Unfinished,

    #[error("builder was poisoned by an earlier error: {first}")]
    #[diagnostic(code(cppdom::build::poisoned))]
    Poisoned { first: Box<BuildError> },
}
