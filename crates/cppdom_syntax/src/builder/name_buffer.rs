//! The single-slot staging area between `name_begin`/`name_end` and the event that claims the name.

use crate::ast::{Name, Span};

use super::errors::{BuildError, BuildResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Slot {
    #[default]
    Empty,
    /// `name_begin` seen, `name_end` not yet.
    Open { first: Span },
    Complete { span: Span },
}

/// Holds at most one name in flight.
#[derive(Debug, Default)]
pub(crate) struct NameBuffer {
    slot: Slot,
}

impl NameBuffer {
    pub(crate) fn begin(&mut self, first: Span, source: &str) -> BuildResult<()> {
        if let Some(pending) = self.pending_text(source) {
            return Err(BuildError::NamePending { pending });
        }
        check_span(first, source)?;
        self.slot = Slot::Open { first };
        Ok(())
    }

    pub(crate) fn end(&mut self, last: Span, source: &str) -> BuildResult<()> {
        let Slot::Open { first } = self.slot else {
            return Err(BuildError::NoOpenName);
        };
        check_span(last, source)?;
        self.slot = Slot::Complete { span: first.merge(last) };
        Ok(())
    }

    /// Take the buffered name, leaving the slot empty.
    ///
    /// A name whose `name_end` has not arrived yet is claimed as just its first token.
    pub(crate) fn claim(&mut self, event: &'static str, source: &str) -> BuildResult<Name> {
        let span = match std::mem::take(&mut self.slot) {
            Slot::Empty => return Err(BuildError::NoPendingName { event }),
            Slot::Open { first } => first,
            Slot::Complete { span } => span,
        };
        Ok(Name::new(name_text(span, source)?, span))
    }

    /// Text of the buffered name, if any.
    pub(crate) fn pending_text(&self, source: &str) -> Option<String> {
        match self.slot {
            Slot::Empty => None,
            Slot::Open { first: span } | Slot::Complete { span } => {
                Some(name_text(span, source).unwrap_or_else(|_| format!("<{}..{}>", span.start, span.end)))
            }
        }
    }
}

fn check_span(span: Span, source: &str) -> BuildResult<()> {
    if span.start <= span.end && source.get(span.start..span.end).is_some() {
        Ok(())
    } else {
        Err(BuildError::SpanOutOfBounds {
            start: span.start,
            end: span.end,
            len: source.len(),
        })
    }
}

fn name_text(span: Span, source: &str) -> BuildResult<String> {
    check_span(span, source)?;
    Ok(normalize(&source[span.start..span.end]))
}

/// Drop whitespace between tokens, keeping one space where two words would otherwise fuse (`operator new`).
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut saw_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            saw_space = true;
            continue;
        }
        if saw_space && is_word(c) && out.chars().last().is_some_and(is_word) {
            out.push(' ');
        }
        saw_space = false;
        out.push(c);
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_name_covers_first_to_last() {
        let source = "A :: B :: c";
        let mut buffer = NameBuffer::default();
        buffer.begin(Span::new(0, 1), source).unwrap();
        buffer.end(Span::new(10, 11), source).unwrap();
        let name = buffer.claim("declarator_id", source).unwrap();
        assert_eq!(name.as_str(), "A::B::c");
        assert_eq!(name.span(), Span::new(0, 11));
        assert_eq!(buffer.pending_text(source), None);
    }

    #[test]
    fn open_name_claims_first_token() {
        let source = "Foo bar";
        let mut buffer = NameBuffer::default();
        buffer.begin(Span::new(0, 3), source).unwrap();
        let name = buffer.claim("class_specifier_name", source).unwrap();
        assert_eq!(name.as_str(), "Foo");
    }

    #[test]
    fn second_begin_is_rejected() {
        let source = "a b";
        let mut buffer = NameBuffer::default();
        buffer.begin(Span::new(0, 1), source).unwrap();
        assert_eq!(
            buffer.begin(Span::new(2, 3), source),
            Err(BuildError::NamePending { pending: "a".to_string() })
        );
    }

    #[test]
    fn end_and_claim_require_a_name() {
        let mut buffer = NameBuffer::default();
        assert_eq!(buffer.end(Span::new(0, 1), "a"), Err(BuildError::NoOpenName));
        assert_eq!(
            buffer.claim("declarator_id", "a"),
            Err(BuildError::NoPendingName { event: "declarator_id" })
        );
    }

    #[test]
    fn out_of_bounds_span_is_rejected() {
        let mut buffer = NameBuffer::default();
        assert_eq!(
            buffer.begin(Span::new(2, 9), "abc"),
            Err(BuildError::SpanOutOfBounds { start: 2, end: 9, len: 3 })
        );
    }

    #[test]
    fn normalize_keeps_word_separators_only() {
        assert_eq!(normalize("operator   new"), "operator new");
        assert_eq!(normalize("~ Foo"), "~Foo");
        assert_eq!(normalize("std ::\n string"), "std::string");
        assert_eq!(normalize("operator +"), "operator+");
    }
}
