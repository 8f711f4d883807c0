//! Define the reserved keyword vocabulary for C and C++.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, aliases, categories, and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - GNU spellings such as `__inline__` and the C spelling `_Bool` are accepted as aliases of their C++ keyword.
//! - The [`KeywordCategory`] of a keyword is what the tree builder dispatches on when it classifies declaration
//!   specifiers, so categories here are semantic, not just documentation.
//!
//! ## Examples
//! ```rust
//! use cppdom_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("unsigned"), Some(KeywordId::Unsigned));
//! assert_eq!(keywords::from_str("__inline__"), Some(KeywordId::Inline)); // alias
//! assert_eq!(keywords::category(KeywordId::Union), KeywordCategory::ClassKey);
//! ```

use super::registry::{Stability, Standard};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Storage class
    Auto,
    Register,
    Static,
    Extern,
    Mutable,
    ThreadLocal,

    // Function specifiers
    Inline,
    Virtual,
    Explicit,

    // Declaration modifiers
    Typedef,
    Friend,
    Constexpr,

    // cv-qualifiers
    Const,
    Volatile,

    // Fundamental types
    Char,
    WcharT,
    Char16T,
    Char32T,
    Bool,
    Int,
    Float,
    Double,
    Void,

    // Size / sign modifiers
    Short,
    Long,
    Signed,
    Unsigned,

    // Class keys
    Class,
    Struct,
    Union,

    // Access specifiers
    Public,
    Protected,
    Private,

    // Other definitions
    Enum,
    Namespace,
    Template,
    Typename,
    Using,
    Operator,
    Asm,
    StaticAssert,
    Decltype,

    // Statements
    If,
    Else,
    Switch,
    Case,
    Default,
    While,
    Do,
    For,
    Break,
    Continue,
    Return,
    Goto,
    Try,
    Catch,
    Throw,

    // Expressions
    New,
    Delete,
    Sizeof,
    Alignof,
    Typeid,
    This,
    ConstCast,
    DynamicCast,
    ReinterpretCast,
    StaticCast,
    Noexcept,

    // Literals
    True,
    False,
    Nullptr,
}

/// Grouping of keywords by the role they play in a declaration or statement.
///
/// ## Notes
/// - The first six categories together form the *simple declaration specifiers*; see
///   [`KeywordCategory::is_simple_decl_specifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    StorageClass,
    FunctionSpecifier,
    DeclModifier,
    CvQualifier,
    FundamentalType,
    TypeModifier,
    ClassKey,
    Access,
    Definition,
    Statement,
    Expression,
    Literal,
}

impl KeywordCategory {
    /// Return `true` if keywords in this category may appear in a decl-specifier-seq as a single token.
    pub fn is_simple_decl_specifier(self) -> bool {
        matches!(
            self,
            KeywordCategory::StorageClass
                | KeywordCategory::FunctionSpecifier
                | KeywordCategory::DeclModifier
                | KeywordCategory::CvQualifier
                | KeywordCategory::FundamentalType
                | KeywordCategory::TypeModifier
        )
    }
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    pub introduced_in: Standard,
    pub stability: Stability,
}

use KeywordCategory as Cat;
use Standard::{Cxx11, Cxx98};

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Storage class
    info(KeywordId::Auto, "auto", &[], Cat::StorageClass, Cxx98),
    deprecated(KeywordId::Register, "register", Cat::StorageClass, Cxx98),
    info(KeywordId::Static, "static", &[], Cat::StorageClass, Cxx98),
    info(KeywordId::Extern, "extern", &[], Cat::StorageClass, Cxx98),
    info(KeywordId::Mutable, "mutable", &[], Cat::StorageClass, Cxx98),
    info(KeywordId::ThreadLocal, "thread_local", &[], Cat::StorageClass, Cxx11),
    // Function specifiers
    info(KeywordId::Inline, "inline", &["__inline", "__inline__"], Cat::FunctionSpecifier, Cxx98),
    info(KeywordId::Virtual, "virtual", &[], Cat::FunctionSpecifier, Cxx98),
    info(KeywordId::Explicit, "explicit", &[], Cat::FunctionSpecifier, Cxx98),
    // Declaration modifiers
    info(KeywordId::Typedef, "typedef", &[], Cat::DeclModifier, Cxx98),
    info(KeywordId::Friend, "friend", &[], Cat::DeclModifier, Cxx98),
    info(KeywordId::Constexpr, "constexpr", &[], Cat::DeclModifier, Cxx11),
    // cv-qualifiers
    info(KeywordId::Const, "const", &["__const", "__const__"], Cat::CvQualifier, Cxx98),
    info(KeywordId::Volatile, "volatile", &["__volatile", "__volatile__"], Cat::CvQualifier, Cxx98),
    // Fundamental types
    info(KeywordId::Char, "char", &[], Cat::FundamentalType, Cxx98),
    info(KeywordId::WcharT, "wchar_t", &[], Cat::FundamentalType, Cxx98),
    info(KeywordId::Char16T, "char16_t", &[], Cat::FundamentalType, Cxx11),
    info(KeywordId::Char32T, "char32_t", &[], Cat::FundamentalType, Cxx11),
    info(KeywordId::Bool, "bool", &["_Bool"], Cat::FundamentalType, Cxx98),
    info(KeywordId::Int, "int", &[], Cat::FundamentalType, Cxx98),
    info(KeywordId::Float, "float", &[], Cat::FundamentalType, Cxx98),
    info(KeywordId::Double, "double", &[], Cat::FundamentalType, Cxx98),
    info(KeywordId::Void, "void", &[], Cat::FundamentalType, Cxx98),
    // Size / sign modifiers
    info(KeywordId::Short, "short", &[], Cat::TypeModifier, Cxx98),
    info(KeywordId::Long, "long", &[], Cat::TypeModifier, Cxx98),
    info(KeywordId::Signed, "signed", &["__signed", "__signed__"], Cat::TypeModifier, Cxx98),
    info(KeywordId::Unsigned, "unsigned", &[], Cat::TypeModifier, Cxx98),
    // Class keys
    info(KeywordId::Class, "class", &[], Cat::ClassKey, Cxx98),
    info(KeywordId::Struct, "struct", &[], Cat::ClassKey, Cxx98),
    info(KeywordId::Union, "union", &[], Cat::ClassKey, Cxx98),
    // Access specifiers
    info(KeywordId::Public, "public", &[], Cat::Access, Cxx98),
    info(KeywordId::Protected, "protected", &[], Cat::Access, Cxx98),
    info(KeywordId::Private, "private", &[], Cat::Access, Cxx98),
    // Other definitions
    info(KeywordId::Enum, "enum", &[], Cat::Definition, Cxx98),
    info(KeywordId::Namespace, "namespace", &[], Cat::Definition, Cxx98),
    info(KeywordId::Template, "template", &[], Cat::Definition, Cxx98),
    info(KeywordId::Typename, "typename", &[], Cat::Definition, Cxx98),
    info(KeywordId::Using, "using", &[], Cat::Definition, Cxx98),
    info(KeywordId::Operator, "operator", &[], Cat::Definition, Cxx98),
    info(KeywordId::Asm, "asm", &["__asm", "__asm__"], Cat::Definition, Cxx98),
    info(KeywordId::StaticAssert, "static_assert", &[], Cat::Definition, Cxx11),
    info(KeywordId::Decltype, "decltype", &[], Cat::Definition, Cxx11),
    // Statements
    info(KeywordId::If, "if", &[], Cat::Statement, Cxx98),
    info(KeywordId::Else, "else", &[], Cat::Statement, Cxx98),
    info(KeywordId::Switch, "switch", &[], Cat::Statement, Cxx98),
    info(KeywordId::Case, "case", &[], Cat::Statement, Cxx98),
    info(KeywordId::Default, "default", &[], Cat::Statement, Cxx98),
    info(KeywordId::While, "while", &[], Cat::Statement, Cxx98),
    info(KeywordId::Do, "do", &[], Cat::Statement, Cxx98),
    info(KeywordId::For, "for", &[], Cat::Statement, Cxx98),
    info(KeywordId::Break, "break", &[], Cat::Statement, Cxx98),
    info(KeywordId::Continue, "continue", &[], Cat::Statement, Cxx98),
    info(KeywordId::Return, "return", &[], Cat::Statement, Cxx98),
    info(KeywordId::Goto, "goto", &[], Cat::Statement, Cxx98),
    info(KeywordId::Try, "try", &[], Cat::Statement, Cxx98),
    info(KeywordId::Catch, "catch", &[], Cat::Statement, Cxx98),
    info(KeywordId::Throw, "throw", &[], Cat::Statement, Cxx98),
    // Expressions
    info(KeywordId::New, "new", &[], Cat::Expression, Cxx98),
    info(KeywordId::Delete, "delete", &[], Cat::Expression, Cxx98),
    info(KeywordId::Sizeof, "sizeof", &[], Cat::Expression, Cxx98),
    info(KeywordId::Alignof, "alignof", &[], Cat::Expression, Cxx11),
    info(KeywordId::Typeid, "typeid", &[], Cat::Expression, Cxx98),
    info(KeywordId::This, "this", &[], Cat::Expression, Cxx98),
    info(KeywordId::ConstCast, "const_cast", &[], Cat::Expression, Cxx98),
    info(KeywordId::DynamicCast, "dynamic_cast", &[], Cat::Expression, Cxx98),
    info(KeywordId::ReinterpretCast, "reinterpret_cast", &[], Cat::Expression, Cxx98),
    info(KeywordId::StaticCast, "static_cast", &[], Cat::Expression, Cxx98),
    info(KeywordId::Noexcept, "noexcept", &[], Cat::Expression, Cxx11),
    // Literals
    info(KeywordId::True, "true", &[], Cat::Literal, Cxx98),
    info(KeywordId::False, "false", &[], Cat::Literal, Cxx98),
    info(KeywordId::Nullptr, "nullptr", &[], Cat::Literal, Cxx11),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling as a static string.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Accepted alias spellings.
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
    introduced_in: Standard,
) -> KeywordInfo {
    let stability = if aliases.is_empty() {
        Stability::Stable
    } else {
        // Alias-bearing entries exist to accept compiler-extension spellings.
        Stability::Extension
    };
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        introduced_in,
        stability,
    }
}

const fn deprecated(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    introduced_in: Standard,
) -> KeywordInfo {
    KeywordInfo {
        stability: Stability::Deprecated,
        ..info(id, canonical, &[], category, introduced_in)
    }
}
