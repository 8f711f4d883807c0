//! Operator vocabulary.
//!
//! This module defines the canonical C++ operator set along with precedence metadata. The parser only needs a few of
//! these for declarators (`*`, `&`, `&&`, `=`, `~`), but the lexer must recognise all of them so that initializers and
//! skipped function bodies tokenize cleanly.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Precedence follows the usual C++ table with a larger number binding tighter; unary/postfix-only operators carry
//!   the precedence of their tightest use.
//!
//! ## Examples
//! ```rust
//! use cppdom_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("->*"), Some(OperatorId::ArrowStar));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::{Stability, Standard};

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    LtLt,
    GtGt,

    // Logical
    Bang,
    AmpAmp,
    PipePipe,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    LtLtEq,
    GtGtEq,

    // Member access
    Dot,
    DotStar,
    Arrow,
    ArrowStar,

    // Conditional
    Question,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    /// Binding strength; larger binds tighter.
    pub precedence: u8,
    pub introduced_in: Standard,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    info(OperatorId::Plus, "+", 12),
    info(OperatorId::Minus, "-", 12),
    info(OperatorId::Star, "*", 13),
    info(OperatorId::Slash, "/", 13),
    info(OperatorId::Percent, "%", 13),
    info(OperatorId::PlusPlus, "++", 16),
    info(OperatorId::MinusMinus, "--", 16),
    // Bitwise
    info(OperatorId::Amp, "&", 7),
    info(OperatorId::Pipe, "|", 5),
    info(OperatorId::Caret, "^", 6),
    info(OperatorId::Tilde, "~", 15),
    info(OperatorId::LtLt, "<<", 11),
    info(OperatorId::GtGt, ">>", 11),
    // Logical
    info(OperatorId::Bang, "!", 15),
    info(OperatorId::AmpAmp, "&&", 4),
    info(OperatorId::PipePipe, "||", 3),
    // Comparison
    info(OperatorId::EqEq, "==", 8),
    info(OperatorId::NotEq, "!=", 8),
    info(OperatorId::Lt, "<", 10),
    info(OperatorId::LtEq, "<=", 10),
    info(OperatorId::Gt, ">", 10),
    info(OperatorId::GtEq, ">=", 10),
    // Assignment
    info(OperatorId::Eq, "=", 1),
    info(OperatorId::PlusEq, "+=", 1),
    info(OperatorId::MinusEq, "-=", 1),
    info(OperatorId::StarEq, "*=", 1),
    info(OperatorId::SlashEq, "/=", 1),
    info(OperatorId::PercentEq, "%=", 1),
    info(OperatorId::AmpEq, "&=", 1),
    info(OperatorId::PipeEq, "|=", 1),
    info(OperatorId::CaretEq, "^=", 1),
    info(OperatorId::LtLtEq, "<<=", 1),
    info(OperatorId::GtGtEq, ">>=", 1),
    // Member access
    info(OperatorId::Dot, ".", 16),
    info(OperatorId::DotStar, ".*", 14),
    info(OperatorId::Arrow, "->", 16),
    info(OperatorId::ArrowStar, "->*", 14),
    // Conditional
    info(OperatorId::Question, "?", 2),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

const fn info(id: OperatorId, canonical: &'static str, precedence: u8) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        precedence,
        introduced_in: Standard::Cxx98,
        stability: Stability::Stable,
    }
}
