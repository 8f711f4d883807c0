/// Parser core types and entrypoint.
///
/// This chunk defines [`ParseError`], the [`Parser`] type and the translation-unit loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - Unlike a recovering parser, the first error ends the parse: the callback has already seen a prefix of the
///   event stream and there is no meaningful way to resynchronize a half-open context stack.
#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
pub enum ParseError {
    /// The tokens are not in the supported declaration subset.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] CompileError),
    /// The callback rejected an event.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),
}

type PResult<T> = Result<T, ParseError>;

/// Deepest nesting of class bodies, declarators and parameter lists the parser will follow.
const MAX_NESTING_DEPTH: u32 = 128;

/// Parser state.
///
/// ## Notes
/// - Single pass, no backtracking: ambiguities (type name or declarator name, parameter list or initializer) are
///   settled by bounded lookahead before any event is emitted.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a, C: ParserCallback> {
    tokens: &'a [Token],
    pos: usize,
    callback: &'a mut C,
    depth: u32,
}

impl<'a, C: ParserCallback> Parser<'a, C> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `cppdom_syntax::lexer`; it must end with [`TokenKind::Eof`].
    /// - `callback`: Receiver of the grammar events.
    pub fn new(tokens: &'a [Token], callback: &'a mut C) -> Self {
        Self {
            tokens,
            pos: 0,
            callback,
            depth: 0,
        }
    }

    /// Drive the callback over the entire token stream, bracketed by `translation_unit_begin` / `_end`.
    ///
    /// ## Errors
    /// Returns the first syntax error, or the first error the callback reports.
    pub fn parse(mut self) -> PResult<()> {
        if !matches!(self.tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = self.tokens.last().map_or(0, |t| t.span.end);
            return Err(CompileError::syntax("Token stream must end with Eof".to_string(), Span::new(end, end)).into());
        }

        let unit = self.callback.translation_unit_begin()?;
        let scope = ScopeRef::Unit(unit);
        while !self.is_at_end() {
            if self.check_directive() {
                self.directive()?;
                continue;
            }
            // Empty declaration.
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }
            self.declaration(scope)?;
        }
        self.callback.translation_unit_end(unit)?;
        Ok(())
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`] is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CompileError::syntax("Declaration nesting too deep".to_string(), self.current_span())
                .with_note(format!("at most {MAX_NESTING_DEPTH} nested class bodies and declarators are supported"))
                .into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
