//! C/C++ syntax frontend for cppdom: lexer, event-emitting parser, and the incremental AST builder.
//!
//! The parser does not build a tree itself. It emits a strictly nested stream of grammar events through the
//! [`callback::ParserCallback`] trait; [`builder::DomBuilder`] is the implementation that turns those events into a
//! typed [`ast::TranslationUnit`].
//!
//! ## Notes
//! - This crate is “syntax-only”: it does not build symbol tables or check types. The [`binding`] module defines the
//!   contract a later semantic pass plugs into.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `cppdom_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use cppdom_syntax::ast::{Declaration, Scope, ScopeRef, SpecifierContainer, TypeSpecifier};
//! use cppdom_syntax::parser;
//!
//! let unit = parser::build_translation_unit("class Foo : public Base { int x; };").unwrap();
//! let Declaration::Simple(decl) = unit.declarations()[0];
//! assert!(matches!(unit[decl].type_specifier(), Some(TypeSpecifier::Class(_))));
//! assert_eq!(unit[decl].owner(), ScopeRef::Unit(unit.id()));
//! ```
//!
//! ## See also
//! - `cppdom_core::lang` for registry-backed C/C++ vocabulary.

pub mod ast;
pub mod binding;
pub mod builder;
pub mod callback;
pub mod diagnostics;
pub mod events;
pub mod lexer;
pub mod outline;
pub mod parser;
pub mod token_helpers;
