//! Provide the canonical C/C++ vocabulary shared by the cppdom lexer, parser, and tree builder.
//!
//! This crate is intentionally small and dependency-free. It contains the registry tables that say which spellings are
//! reserved words, operators, and punctuators, and how each keyword is classified (storage class, cv-qualifier,
//! fundamental type, class key, ...).
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no AST types.
//! - Syntactic legality is enforced by the parser; the tables here only describe vocabulary.

pub mod lang;
