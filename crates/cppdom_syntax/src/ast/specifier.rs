//! Declaration specifiers and the specifier classifier.
//!
//! Specifier keywords arrive one at a time, in source order, with no lookahead. [`classify`] maps a keyword to the
//! effect it has on the accumulated record, and [`DeclarationSpecifier::accumulate`] folds those effects in:
//!
//! - storage-class, function, declaration-modifier and cv keywords set a flag (repeating one is harmless);
//! - fundamental-type keywords set the type code; a later one replaces an earlier one (`char int` is `int`);
//! - `short`/`long` set flags layered on top of the type code; `signed` clears and `unsigned` sets the unsigned
//!   flag, whichever came last.
//!
//! ## Notes
//! - The sign handling intentionally does not remember *which* sign keyword was seen, so `unsigned signed` ends up
//!   signed and `signed char` is indistinguishable from `char`.

use std::fmt;

use cppdom_core::lang::keywords::{self, KeywordId};

/// Type code set by a fundamental-type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FundamentalType {
    /// No fundamental-type keyword seen (a class or named type, or implicit `int` after `unsigned`).
    #[default]
    Unspecified,
    Char,
    WcharT,
    Char16T,
    Char32T,
    Bool,
    Int,
    Float,
    Double,
    Void,
}

impl FundamentalType {
    pub fn as_str(self) -> Option<&'static str> {
        let keyword = match self {
            FundamentalType::Unspecified => return None,
            FundamentalType::Char => KeywordId::Char,
            FundamentalType::WcharT => KeywordId::WcharT,
            FundamentalType::Char16T => KeywordId::Char16T,
            FundamentalType::Char32T => KeywordId::Char32T,
            FundamentalType::Bool => KeywordId::Bool,
            FundamentalType::Int => KeywordId::Int,
            FundamentalType::Float => KeywordId::Float,
            FundamentalType::Double => KeywordId::Double,
            FundamentalType::Void => KeywordId::Void,
        };
        Some(keywords::as_str(keyword))
    }
}

/// Boolean specifier flags. `unsigned` is tracked separately because `signed` can clear it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierFlag {
    Auto,
    Register,
    Static,
    Extern,
    Mutable,
    ThreadLocal,
    Inline,
    Virtual,
    Explicit,
    Typedef,
    Friend,
    Constexpr,
    Const,
    Volatile,
    Short,
    Long,
}

impl SpecifierFlag {
    /// Every flag, in the order they are printed.
    pub const ALL: [SpecifierFlag; 16] = [
        SpecifierFlag::Typedef,
        SpecifierFlag::Friend,
        SpecifierFlag::Constexpr,
        SpecifierFlag::Auto,
        SpecifierFlag::Register,
        SpecifierFlag::Static,
        SpecifierFlag::Extern,
        SpecifierFlag::Mutable,
        SpecifierFlag::ThreadLocal,
        SpecifierFlag::Inline,
        SpecifierFlag::Virtual,
        SpecifierFlag::Explicit,
        SpecifierFlag::Const,
        SpecifierFlag::Volatile,
        SpecifierFlag::Short,
        SpecifierFlag::Long,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn as_str(self) -> &'static str {
        let keyword = match self {
            SpecifierFlag::Auto => KeywordId::Auto,
            SpecifierFlag::Register => KeywordId::Register,
            SpecifierFlag::Static => KeywordId::Static,
            SpecifierFlag::Extern => KeywordId::Extern,
            SpecifierFlag::Mutable => KeywordId::Mutable,
            SpecifierFlag::ThreadLocal => KeywordId::ThreadLocal,
            SpecifierFlag::Inline => KeywordId::Inline,
            SpecifierFlag::Virtual => KeywordId::Virtual,
            SpecifierFlag::Explicit => KeywordId::Explicit,
            SpecifierFlag::Typedef => KeywordId::Typedef,
            SpecifierFlag::Friend => KeywordId::Friend,
            SpecifierFlag::Constexpr => KeywordId::Constexpr,
            SpecifierFlag::Const => KeywordId::Const,
            SpecifierFlag::Volatile => KeywordId::Volatile,
            SpecifierFlag::Short => KeywordId::Short,
            SpecifierFlag::Long => KeywordId::Long,
        };
        keywords::as_str(keyword)
    }
}

/// What one specifier keyword does to a [`DeclarationSpecifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierEffect {
    Set(SpecifierFlag),
    Type(FundamentalType),
    Unsigned(bool),
}

/// Map a keyword to its specifier effect.
///
/// Returns `None` for keywords that are not simple declaration specifiers (class keys, statements, ...).
pub fn classify(keyword: KeywordId) -> Option<SpecifierEffect> {
    use SpecifierEffect::{Set, Type, Unsigned};

    let effect = match keyword {
        KeywordId::Auto => Set(SpecifierFlag::Auto),
        KeywordId::Register => Set(SpecifierFlag::Register),
        KeywordId::Static => Set(SpecifierFlag::Static),
        KeywordId::Extern => Set(SpecifierFlag::Extern),
        KeywordId::Mutable => Set(SpecifierFlag::Mutable),
        KeywordId::ThreadLocal => Set(SpecifierFlag::ThreadLocal),
        KeywordId::Inline => Set(SpecifierFlag::Inline),
        KeywordId::Virtual => Set(SpecifierFlag::Virtual),
        KeywordId::Explicit => Set(SpecifierFlag::Explicit),
        KeywordId::Typedef => Set(SpecifierFlag::Typedef),
        KeywordId::Friend => Set(SpecifierFlag::Friend),
        KeywordId::Constexpr => Set(SpecifierFlag::Constexpr),
        KeywordId::Const => Set(SpecifierFlag::Const),
        KeywordId::Volatile => Set(SpecifierFlag::Volatile),
        KeywordId::Short => Set(SpecifierFlag::Short),
        KeywordId::Long => Set(SpecifierFlag::Long),

        KeywordId::Char => Type(FundamentalType::Char),
        KeywordId::WcharT => Type(FundamentalType::WcharT),
        KeywordId::Char16T => Type(FundamentalType::Char16T),
        KeywordId::Char32T => Type(FundamentalType::Char32T),
        KeywordId::Bool => Type(FundamentalType::Bool),
        KeywordId::Int => Type(FundamentalType::Int),
        KeywordId::Float => Type(FundamentalType::Float),
        KeywordId::Double => Type(FundamentalType::Double),
        KeywordId::Void => Type(FundamentalType::Void),

        KeywordId::Signed => Unsigned(false),
        KeywordId::Unsigned => Unsigned(true),

        KeywordId::Class
        | KeywordId::Struct
        | KeywordId::Union
        | KeywordId::Public
        | KeywordId::Protected
        | KeywordId::Private
        | KeywordId::Enum
        | KeywordId::Namespace
        | KeywordId::Template
        | KeywordId::Typename
        | KeywordId::Using
        | KeywordId::Operator
        | KeywordId::Asm
        | KeywordId::StaticAssert
        | KeywordId::Decltype
        | KeywordId::If
        | KeywordId::Else
        | KeywordId::Switch
        | KeywordId::Case
        | KeywordId::Default
        | KeywordId::While
        | KeywordId::Do
        | KeywordId::For
        | KeywordId::Break
        | KeywordId::Continue
        | KeywordId::Return
        | KeywordId::Goto
        | KeywordId::Try
        | KeywordId::Catch
        | KeywordId::Throw
        | KeywordId::New
        | KeywordId::Delete
        | KeywordId::Sizeof
        | KeywordId::Alignof
        | KeywordId::Typeid
        | KeywordId::This
        | KeywordId::ConstCast
        | KeywordId::DynamicCast
        | KeywordId::ReinterpretCast
        | KeywordId::StaticCast
        | KeywordId::Noexcept
        | KeywordId::True
        | KeywordId::False
        | KeywordId::Nullptr => return None,
    };
    Some(effect)
}

/// Accumulated storage class, qualifiers, and fundamental type of one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationSpecifier {
    flags: u32,
    is_unsigned: bool,
    fundamental: FundamentalType,
    frozen: bool,
}

impl DeclarationSpecifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, flag: SpecifierFlag) -> bool {
        self.flags & flag.bit() != 0
    }

    pub fn is_unsigned(&self) -> bool {
        self.is_unsigned
    }

    pub fn fundamental(&self) -> FundamentalType {
        self.fundamental
    }

    /// `true` once the owning declaration has ended; further keywords are ignored.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Apply one effect to the record.
    pub fn apply(&mut self, effect: SpecifierEffect) {
        match effect {
            SpecifierEffect::Set(flag) => self.flags |= flag.bit(),
            SpecifierEffect::Type(ty) => self.fundamental = ty,
            SpecifierEffect::Unsigned(value) => self.is_unsigned = value,
        }
    }

    /// Classify `keyword` and fold it in.
    ///
    /// ## Returns
    /// - `true` if the keyword was a specifier and the record was updated.
    /// - `false` if the keyword is not a specifier, or the record is frozen; the record is left unchanged.
    pub fn accumulate(&mut self, keyword: KeywordId) -> bool {
        if self.frozen {
            return false;
        }
        match classify(keyword) {
            Some(effect) => {
                self.apply(effect);
                true
            }
            None => false,
        }
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }
}

impl fmt::Display for DeclarationSpecifier {
    /// Canonical spelling: flags, then sign, then the type keyword (`static const unsigned long int`).
    ///
    /// Never empty: a record with no words spells `int`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<SpecifierFlag> = SpecifierFlag::ALL.iter().copied().filter(|flag| self.has(*flag)).collect();
        let mut words: Vec<&str> = flags.iter().map(|flag| flag.as_str()).collect();
        if self.is_unsigned {
            // Sign words go before the size modifiers: `unsigned long`, not `long unsigned`.
            let at = flags
                .iter()
                .position(|flag| matches!(flag, SpecifierFlag::Short | SpecifierFlag::Long))
                .unwrap_or(words.len());
            words.insert(at, keywords::as_str(KeywordId::Unsigned));
        }
        if let Some(ty) = self.fundamental.as_str() {
            words.push(ty);
        }
        // A bare `signed` (or `unsigned signed`) leaves nothing to spell but its implicit type.
        if words.is_empty() {
            words.push(keywords::as_str(KeywordId::Int));
        }
        f.write_str(&words.join(" "))
    }
}
