//! Diagnostics and error reporting for the syntax frontend
//!
//! [`CompileError`] is the lexer/parser error type. It implements [`miette::Diagnostic`] so the CLI can render it
//! against the source with a labelled span; notes and hints are folded into miette's help text.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource};
use thiserror::Error;

use crate::ast::Span;
use crate::builder::BuildError;

/// A lex or parse error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Syntax,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn unsupported(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Unsupported,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    fn primary_label(&self) -> &'static str {
        match self.kind {
            ErrorKind::Error => "here",
            ErrorKind::Syntax => "unexpected here",
            ErrorKind::Unsupported => "not supported",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lexical errors.
    Error,
    Syntax,
    /// Valid C++ outside the declaration subset this frontend understands.
    Unsupported,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Error => "cppdom::lex",
            ErrorKind::Syntax => "cppdom::syntax",
            ErrorKind::Unsupported => "cppdom::unsupported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.notes.is_empty() && self.hints.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("note: {n}"))
            .chain(self.hints.iter().map(|h| format!("hint: {h}")))
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label().to_string()),
            self.span,
        )];
        Some(Box::new(labels.into_iter()))
    }
}

/// Everything that can go wrong between source text and a finished tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error("{} lexer error(s)", .0.len())]
    Lex(Vec<CompileError>),
    #[error(transparent)]
    Syntax(CompileError),
    #[error(transparent)]
    Build(BuildError),
}

impl FrontendError {
    /// The individual diagnostics, in source order for lexer errors.
    pub fn diagnostics(&self) -> Vec<&dyn Diagnostic> {
        match self {
            FrontendError::Lex(errors) => errors.iter().map(|e| e as &dyn Diagnostic).collect(),
            FrontendError::Syntax(error) => vec![error],
            FrontendError::Build(error) => vec![error],
        }
    }
}

/// Render one diagnostic against its source file with miette's report handler.
pub fn format_error<E>(file_path: &str, source: &str, error: &E) -> String
where
    E: Diagnostic + Clone + Send + Sync + 'static,
{
    let report = miette::Report::new(error.clone()).with_source_code(NamedSource::new(file_path, source.to_string()));
    format!("{report:?}\n")
}

impl FrontendError {
    /// Every diagnostic rendered against the source, in order.
    pub fn render(&self, file_path: &str, source: &str) -> String {
        match self {
            FrontendError::Lex(errors) => errors.iter().map(|e| format_error(file_path, source, e)).collect(),
            FrontendError::Syntax(error) => format_error(file_path, source, error),
            FrontendError::Build(error) => format_error(file_path, source, error),
        }
    }
}

/// Get line number, column number, and line text for a byte offset
pub fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}
