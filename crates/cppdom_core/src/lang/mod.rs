//! C/C++ vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators, and punctuators.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer, parser, and builder. Callers work with
//! **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - Keyword categories drive classification in the tree builder (storage class vs. fundamental type vs. class key).
//!
//! ## Examples
//! ```rust
//! use cppdom_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("struct"), Some(KeywordId::Struct));
//! assert_eq!(keywords::as_str(KeywordId::WcharT), "wchar_t");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
