//! Token types for the C/C++ lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Literals keep their source spelling. Nothing in the declaration builder evaluates them.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use cppdom_core::lang::keywords::{self, KeywordId};
use cppdom_core::lang::operators::OperatorId;
use cppdom_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Integer literal spelling including any suffix (`42u`, `0x1F`).
    Int(String),
    /// Floating literal spelling including any suffix (`1.5f`, `1e10`).
    Float(String),
    /// Character literal including prefix and quotes (`L'a'`).
    Char(String),
    /// String literal including prefix and quotes (`u8"x"`).
    String(String),

    // ========== Preprocessor ==========
    /// A whole directive line: `#include <x>` is `Directive { name: "include", body: "<x>" }`.
    Directive { name: String, body: String },

    // ========== Special ==========
    Eof, // end of file
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
