/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_next`, `token_at`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
///
/// Token accessors return `&'a Token` (borrowed from the stream, not from the parser) so a token can be handed to
/// the callback while `self` is mutably borrowed.
impl<'a, C: ParserCallback> Parser<'a, C> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        self.token_at(self.pos)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &'a Token {
        self.token_at(self.pos + 1)
    }

    /// Token at an absolute index; indices past the end yield the trailing `Eof`.
    fn token_at(&self, index: usize) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(index).unwrap_or(&tokens[tokens.len() - 1])
    }

    /// Advance to the next token and return the token we just consumed.
    ///
    /// At `Eof` the cursor stays put and `Eof` is returned.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_directive(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Directive { .. })
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&'a Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_ident(&mut self, msg: &str) -> Result<&'a Token, CompileError> {
        if self.peek().kind.ident().is_some() {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    /// A syntax error at the current token.
    fn error_here(&self, msg: &str) -> CompileError {
        CompileError::syntax(format!("{}, found {:?}", msg, self.peek().kind), self.peek().span)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }
}
