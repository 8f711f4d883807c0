//! Shareable metadata for `cppdom_core::lang` registries.
//!
//! Every vocabulary table (keywords, operators, punctuation) records where an item comes from and how stable its
//! support is. These types are small and `Copy` so the tables can live in `const` items.
//!
//! ## See also
//! - [`crate::lang::keywords`]
//! - [`crate::lang::operators`]
//! - [`crate::lang::punctuation`]

use std::fmt;

/// Identify the language standard that introduced a vocabulary item.
///
/// ## Notes
/// - Items shared with C are tagged with the first C++ standard that has them.
///
/// ## Examples
/// ```rust
/// use cppdom_core::lang::registry::Standard;
///
/// assert!(Standard::Cxx98 < Standard::Cxx11);
/// assert_eq!(Standard::Cxx11.to_string(), "C++11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Standard {
    Cxx98,
    Cxx11,
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Standard::Cxx98 => "C++98",
            Standard::Cxx11 => "C++11",
        };
        f.write_str(s)
    }
}

/// Describe the support status of a vocabulary item.
///
/// ## Notes
/// - `Extension` marks compiler-specific spellings (GNU `__inline__` and friends) accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Extension,
    Deprecated,
}
