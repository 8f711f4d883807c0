/// Small parsing utilities.
///
/// Lookahead over qualified names, name emission, and balanced skipping of the token runs this parser does not
/// model (bodies, initializers, array bounds, exception specifications).
impl<'a, C: ParserCallback> Parser<'a, C> {
    /// End index (exclusive) of `::`? ident (`::` ident)* starting at `at`, if a name starts there.
    ///
    /// A trailing `::` not followed by an identifier (`Foo::~Foo`, `Foo::operator=`) is not consumed.
    fn scan_qualified_name(&self, at: usize) -> Option<usize> {
        let mut i = at;
        if self.token_at(i).kind.is_punctuation(PunctuationId::ColonColon) {
            i += 1;
        }
        self.token_at(i).kind.ident()?;
        i += 1;
        while self.token_at(i).kind.is_punctuation(PunctuationId::ColonColon)
            && self.token_at(i + 1).kind.ident().is_some()
        {
            i += 2;
        }
        Some(i)
    }

    /// Consume a qualified name and bracket it with `name_begin` / `name_end`.
    fn qualified_name(&mut self, msg: &str) -> PResult<()> {
        let Some(end) = self.scan_qualified_name(self.pos) else {
            return Err(self.error_here(msg).into());
        };
        self.callback.name_begin(self.peek())?;
        self.callback.name_end(self.token_at(end - 1))?;
        self.pos = end;
        Ok(())
    }

    fn reject_template_arguments(&self) -> Result<(), CompileError> {
        if self.check_op(OperatorId::Lt) {
            Err(CompileError::unsupported(
                "Template arguments are not supported".to_string(),
                self.current_span(),
            ))
        } else {
            Ok(())
        }
    }

    /// Consume a bracketed group through its matching close, starting at the opening `(`, `[` or `{`.
    fn skip_balanced(&mut self) -> Result<(), CompileError> {
        let open = self.current_span();
        let mut pending: Vec<PunctuationId> = Vec::new();
        loop {
            if self.is_at_end() {
                return Err(CompileError::syntax("Unclosed bracket at end of input".to_string(), open)
                    .with_note("the group opened here was never closed"));
            }
            let token = self.advance();
            if let Some(id) = token.punctuation_id() {
                if let Some(close) = closing_bracket(id) {
                    pending.push(close);
                } else if is_closing_bracket(id) && pending.pop() != Some(id) {
                    return Err(CompileError::syntax(
                        format!("Mismatched '{}'", cppdom_core::lang::punctuation::as_str(id)),
                        token.span,
                    ));
                }
            }
            if pending.is_empty() {
                return Ok(());
            }
        }
    }

    /// Skip tokens up to (not including) one of `stops` at bracket depth zero.
    ///
    /// A closing bracket that belongs to an enclosing group also ends the run; `Eof` is left for the caller's
    /// `expect` to report.
    fn skip_until_any(&mut self, stops: &[PunctuationId]) -> Result<(), CompileError> {
        while !self.is_at_end() {
            match self.peek().punctuation_id() {
                Some(id) if stops.contains(&id) => return Ok(()),
                Some(id) if closing_bracket(id).is_some() => self.skip_balanced()?,
                Some(id) if is_closing_bracket(id) => return Ok(()),
                _ => {
                    self.advance();
                }
            }
        }
        Ok(())
    }
}

fn closing_bracket(open: PunctuationId) -> Option<PunctuationId> {
    match open {
        PunctuationId::LParen => Some(PunctuationId::RParen),
        PunctuationId::LBracket => Some(PunctuationId::RBracket),
        PunctuationId::LBrace => Some(PunctuationId::RBrace),
        _ => None,
    }
}

fn is_closing_bracket(id: PunctuationId) -> bool {
    matches!(id, PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)
}

/// Keywords the builder's specifier classifier folds into a declaration specifier.
fn is_decl_specifier_keyword(id: KeywordId) -> bool {
    keywords::category(id).is_simple_decl_specifier()
}

/// Specifier keywords that supply (part of) the type, after which an identifier is a declarator name.
fn names_a_type(id: KeywordId) -> bool {
    matches!(
        keywords::category(id),
        KeywordCategory::FundamentalType | KeywordCategory::TypeModifier
    )
}
