//! Names and the deferred binding contract.
//!
//! A [`Name`] is the token range of an identifier (possibly qualified: `A::B::c`, `~Foo`, `operator+`). It is
//! immutable once built, except for a single write-once slot where a later semantic pass records what the name refers
//! to.
//!
//! ## Notes
//! - [`Name::resolve_binding`] is safe to call at any time, including while the tree is still being built. Before a
//!   binding pass has run it returns `None`; that is the normal “unresolved” state, not an error.
//! - Bindings are never invalidated. Editing the tree after binding is outside this contract.

use std::cell::OnceCell;
use std::fmt;

use thiserror::Error;

use super::Span;

/// Identifier of a symbol in whatever symbol table the binding pass maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol#{}", self.0)
    }
}

/// What kind of entity a name was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Type,
    Typedef,
    Function,
    Variable,
    Parameter,
    Member,
}

/// The semantic result of resolving a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub symbol: SymbolId,
    pub kind: BindingKind,
}

impl Binding {
    pub fn new(symbol: SymbolId, kind: BindingKind) -> Self {
        Self { symbol, kind }
    }
}

/// Errors raised when recording a binding.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum BindError {
    #[error("name `{name}` is already bound to {existing}; refusing to rebind it to {attempted}")]
    #[diagnostic(
        code(cppdom::bind::already_bound),
        help("bindings are write-once; a binding pass must not resolve the same name twice to different symbols")
    )]
    AlreadyBound {
        name: String,
        existing: SymbolId,
        attempted: SymbolId,
    },
}

/// A name token range plus its (lazily filled) binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    text: String,
    span: Span,
    binding: OnceCell<Binding>,
}

impl Name {
    pub(crate) fn new(text: String, span: Span) -> Self {
        Self {
            text,
            span,
            binding: OnceCell::new(),
        }
    }

    /// Spelling of the name with insignificant whitespace removed (`A :: b` → `A::b`).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Span from the first to the last token of the name.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Return the binding recorded by a semantic pass, or `None` while the name is unresolved.
    ///
    /// Idempotent and side-effect free: repeated calls return the same binding and never trigger resolution.
    pub fn resolve_binding(&self) -> Option<&Binding> {
        self.binding.get()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.get().is_some()
    }

    /// Record the binding for this name.
    ///
    /// ## Errors
    /// Returns [`BindError::AlreadyBound`] if a different binding was recorded earlier. Recording the same binding
    /// again is a no-op.
    pub fn bind(&self, binding: Binding) -> Result<(), BindError> {
        let stored = self.binding.get_or_init(|| binding);
        if *stored == binding {
            Ok(())
        } else {
            Err(BindError::AlreadyBound {
                name: self.text.clone(),
                existing: stored.symbol,
                attempted: binding.symbol,
            })
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> Name {
        Name::new(text.to_string(), Span::new(0, text.len()))
    }

    #[test]
    fn unresolved_before_binding() {
        let n = name("Foo");
        assert_eq!(n.resolve_binding(), None);
        assert_eq!(n.resolve_binding(), None);
        assert!(!n.is_bound());
    }

    #[test]
    fn binding_is_stable_across_calls() {
        let n = name("Foo");
        let b = Binding::new(SymbolId(7), BindingKind::Type);
        n.bind(b).unwrap();
        assert_eq!(n.resolve_binding(), Some(&b));
        assert_eq!(n.resolve_binding(), Some(&b));
        // Same binding again is accepted.
        n.bind(b).unwrap();
    }

    #[test]
    fn rebinding_to_another_symbol_is_rejected() {
        let n = name("Foo");
        n.bind(Binding::new(SymbolId(1), BindingKind::Type)).unwrap();
        let err = n
            .bind(Binding::new(SymbolId(2), BindingKind::Type))
            .expect_err("second binding should fail");
        assert_eq!(
            err,
            BindError::AlreadyBound {
                name: "Foo".to_string(),
                existing: SymbolId(1),
                attempted: SymbolId(2),
            }
        );
        assert_eq!(n.resolve_binding().map(|b| b.symbol), Some(SymbolId(1)));
    }
}
