//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuators used by the lexer/parser: delimiters,
//! separators, and the scope-resolution marker.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use cppdom_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::ColonColon));
//! assert_eq!(punctuation::as_str(PunctuationId::Ellipsis), "...");
//! ```

use super::registry::{Stability, Standard};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`, `;` and `:`.
    Separator,
    /// The scope-resolution marker `::`.
    Access,
    /// Misc markers like `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Semicolon,
    Comma,
    Colon,

    // Access / path
    ColonColon,

    // Special markers
    Ellipsis,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: PunctuationCategory,
    pub introduced_in: Standard,
    pub stability: Stability,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Semicolon, ";", &[], PunctuationCategory::Separator),
    info(PunctuationId::Comma, ",", &[], PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", &[], PunctuationCategory::Separator),
    info(PunctuationId::ColonColon, "::", &[], PunctuationCategory::Access),
    info(PunctuationId::Ellipsis, "...", &[], PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", &[], PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", &[], PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", &[], PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", &[], PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", &[], PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", &[], PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the accepted aliases for a punctuation token.
pub fn aliases(id: PunctuationId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    if let Some(p) = PUNCTUATION.iter().find(|p| p.canonical == s) {
        return Some(p.id);
    }
    PUNCTUATION
        .iter()
        .find(|p| {
            let aliases: &[&str] = p.aliases;
            aliases.contains(&s)
        })
        .map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: PunctuationCategory,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        aliases,
        category,
        introduced_in: Standard::Cxx98,
        stability: Stability::Stable,
    }
}
