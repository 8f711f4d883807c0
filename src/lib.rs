#![forbid(unsafe_code)]
//! cppdom: an incremental C/C++ declaration AST builder
//!
//! A recursive-descent parser walks C/C++ declarations and reports what it sees as a strictly nested stream of grammar
//! events. A builder consumes those events one at a time and assembles a typed, navigable tree of translation unit,
//! declarations, class specifiers, base specifiers, declarators and parameter clauses. Names in the tree carry a
//! write-once slot for a later binding pass.
//!
//! The frontend lives in `cppdom_syntax`; vocabulary registries live in `cppdom_core`. This crate re-exports both and
//! adds the command-line driver.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`. Protocol violations in the event stream are `BuildError`s, never panics.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug in the builder itself (logic error), use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;

pub use cppdom_core::lang;
pub use cppdom_syntax::ast;
pub use cppdom_syntax::binding;
pub use cppdom_syntax::builder;
pub use cppdom_syntax::callback;
pub use cppdom_syntax::diagnostics;
pub use cppdom_syntax::events;
pub use cppdom_syntax::lexer;
pub use cppdom_syntax::outline;
pub use cppdom_syntax::parser;

pub use cppdom_syntax::builder::DomBuilder;
pub use cppdom_syntax::parser::build_translation_unit;
