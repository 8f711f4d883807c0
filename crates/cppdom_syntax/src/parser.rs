//! Event-emitting parser for the C/C++ declaration subset.
//!
//! The parser does not build a tree. It walks the token stream once and drives a [`ParserCallback`] with strictly
//! nested begin/end events; [`crate::builder::DomBuilder`] turns those into a [`TranslationUnit`] and
//! [`crate::events::EventLog`] prints them.
//!
//! ## Examples
//!
//! ```rust
//! use cppdom_syntax::{events::EventLog, lexer, parser};
//!
//! let tokens = lexer::lex("unsigned long x;").unwrap();
//! let mut log = EventLog::new();
//! parser::parse(&tokens, &mut log).unwrap();
//! assert!(log.render().contains("declarator_id declarator#0"));
//! ```

use crate::ast::{ClassSpecifierId, ContainerRef, DeclaratorId, ParameterClauseId, ScopeRef, Span, TranslationUnit};
use crate::builder::{BuildError, DomBuilder};
use crate::callback::ParserCallback;
use crate::diagnostics::{CompileError, FrontendError};
use crate::lexer::{self, Token, TokenKind};
use cppdom_core::lang::keywords::{self, KeywordCategory, KeywordId};
use cppdom_core::lang::operators::OperatorId;
use cppdom_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/class.rs");
include!("parser/declarator.rs");
include!("parser/directives.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
