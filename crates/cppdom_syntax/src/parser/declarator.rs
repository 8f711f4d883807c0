/// Declarator and parameter parsing.
///
/// ```text
/// declarator := ptr-operator* ( '(' declarator ')' | declarator-id )? suffix*
/// suffix     := '(' parameters ')' function-qualifiers | '[' ... ']'
/// ```
///
/// The declarator-id is optional so the same code handles abstract declarators in parameter lists (`int*`,
/// `void (*)(int)`).
impl<'a, C: ParserCallback> Parser<'a, C> {
    // ========================================================================
    // Declarators
    // ========================================================================

    /// Parse one declarator into `container`; returns whether it declares a function.
    fn declarator(&mut self, container: ContainerRef) -> PResult<bool> {
        let declarator = self.callback.declarator_begin(container)?;
        let is_function = self.nested(|p| p.declarator_parts(declarator))?;
        self.callback.declarator_end(declarator)?;
        Ok(is_function)
    }

    fn declarator_parts(&mut self, declarator: DeclaratorId) -> PResult<bool> {
        self.pointer_operators(declarator)?;
        let mut is_function = false;
        if self.check_punct(PunctuationId::LParen) && self.peek_next().kind.is_pointer_operator() {
            self.advance();
            let nested = self.callback.nested_declarator_begin(declarator)?;
            is_function = self.nested(|p| p.declarator_parts(nested))?;
            self.callback.declarator_end(nested)?;
            self.expect_punct(PunctuationId::RParen, "Expected ')' after nested declarator")?;
        } else if self.at_declarator_id() {
            self.declarator_id(declarator)?;
        }
        Ok(self.declarator_suffixes(declarator)? || is_function)
    }

    fn pointer_operators(&mut self, declarator: DeclaratorId) -> PResult<()> {
        while self.peek().kind.is_pointer_operator() {
            let token = self.advance();
            self.callback.pointer_operator(declarator, token)?;
            while matches!(self.peek().keyword_id(), Some(KeywordId::Const | KeywordId::Volatile)) {
                let cv = self.advance();
                self.callback.pointer_operator_cv(declarator, cv)?;
            }
        }
        Ok(())
    }

    fn at_declarator_id(&self) -> bool {
        let kind = &self.peek().kind;
        kind.ident().is_some()
            || kind.is_operator(OperatorId::Tilde)
            || kind.is_keyword(KeywordId::Operator)
            || kind.is_punctuation(PunctuationId::ColonColon)
    }

    /// `x`, `A::b`, `~Foo`, `Foo::~Foo`, `operator+=`, `A::operator new[]`, `operator bool`.
    fn declarator_id(&mut self, declarator: DeclaratorId) -> PResult<()> {
        let first = self.peek();
        self.match_punct(PunctuationId::ColonColon);
        loop {
            if self.match_op(OperatorId::Tilde) {
                self.expect_ident("Expected class name after '~'")?;
                break;
            }
            if self.check_keyword(KeywordId::Operator) {
                self.operator_function_id()?;
                break;
            }
            self.expect_ident("Expected declarator name")?;
            let continues = {
                let next = &self.peek_next().kind;
                next.ident().is_some() || next.is_operator(OperatorId::Tilde) || next.is_keyword(KeywordId::Operator)
            };
            if self.check_punct(PunctuationId::ColonColon) && continues {
                self.advance();
                continue;
            }
            break;
        }
        let last = self.token_at(self.pos - 1);
        self.callback.name_begin(first)?;
        self.callback.name_end(last)?;
        self.callback.declarator_id(declarator)?;
        Ok(())
    }

    /// The tokens after `operator`: a symbol, `()`, `[]`, `new[]` / `delete[]`, or a conversion type.
    fn operator_function_id(&mut self) -> Result<(), CompileError> {
        self.advance();
        let token = self.peek();
        match &token.kind {
            TokenKind::Keyword(KeywordId::New | KeywordId::Delete) => {
                self.advance();
                if self.check_punct(PunctuationId::LBracket) && self.peek_next().kind.is_punctuation(PunctuationId::RBracket)
                {
                    self.advance();
                    self.advance();
                }
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                self.expect_punct(PunctuationId::RParen, "Expected ')' after 'operator('")?;
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after 'operator['")?;
            }
            TokenKind::Operator(_) | TokenKind::Punctuation(PunctuationId::Comma) => {
                self.advance();
            }
            _ => {
                // Conversion function: the type runs up to the parameter list.
                let start = self.pos;
                loop {
                    let kind = &self.peek().kind;
                    let in_type = matches!(kind, TokenKind::Keyword(_) | TokenKind::Ident(_))
                        || kind.is_pointer_operator()
                        || kind.is_punctuation(PunctuationId::ColonColon);
                    if !in_type {
                        break;
                    }
                    self.advance();
                }
                if self.pos == start {
                    return Err(self.error_here("Expected operator after 'operator'"));
                }
            }
        }
        Ok(())
    }

    /// Parameter clauses and array bounds; returns whether a parameter clause was parsed.
    fn declarator_suffixes(&mut self, declarator: DeclaratorId) -> PResult<bool> {
        let mut is_function = false;
        loop {
            if !is_function && self.check_punct(PunctuationId::LParen) && self.at_parameter_clause() {
                self.parameter_clause(declarator)?;
                self.function_qualifiers()?;
                is_function = true;
            } else if self.check_punct(PunctuationId::LBracket) {
                self.callback.array_declarator(declarator)?;
                let start = self.pos;
                self.skip_balanced()?;
                self.report_expression(start)?;
            } else {
                return Ok(is_function);
            }
        }
    }

    /// Tell a parameter list from a parenthesized initializer (`int x(5);`) with the cursor on `(`.
    ///
    /// An identifier followed by something that can follow a type counts as a parameter, so `T x(U);` reads as a
    /// function declaration, as C++ does when `U` names a type.
    fn at_parameter_clause(&self) -> bool {
        let next = self.peek_next();
        match &next.kind {
            TokenKind::Punctuation(
                PunctuationId::RParen | PunctuationId::Ellipsis | PunctuationId::ColonColon,
            ) => true,
            TokenKind::Keyword(id) => {
                is_decl_specifier_keyword(*id)
                    || matches!(
                        id,
                        KeywordId::Class
                            | KeywordId::Struct
                            | KeywordId::Union
                            | KeywordId::Typename
                            | KeywordId::Enum
                            | KeywordId::Decltype
                    )
            }
            TokenKind::Ident(_) => match self.scan_qualified_name(self.pos + 1) {
                Some(end) => {
                    let after = &self.token_at(end).kind;
                    matches!(after, TokenKind::Ident(_) | TokenKind::Keyword(_))
                        || after.is_pointer_operator()
                        || after.is_punctuation(PunctuationId::RParen)
                        || after.is_punctuation(PunctuationId::Comma)
                        || after.is_punctuation(PunctuationId::LBracket)
                        || after.is_punctuation(PunctuationId::LParen)
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Trailing `const`, `volatile`, ref-qualifiers, `noexcept(...)`, `throw(...)`, `override` and `final`.
    fn function_qualifiers(&mut self) -> Result<(), CompileError> {
        loop {
            let token = self.peek();
            match &token.kind {
                TokenKind::Keyword(KeywordId::Const | KeywordId::Volatile)
                | TokenKind::Operator(OperatorId::Amp | OperatorId::AmpAmp) => {
                    self.advance();
                }
                TokenKind::Keyword(KeywordId::Noexcept | KeywordId::Throw) => {
                    self.advance();
                    if self.check_punct(PunctuationId::LParen) {
                        self.skip_balanced()?;
                    }
                }
                TokenKind::Ident(word) if word == "override" || word == "final" => {
                    self.advance();
                }
                TokenKind::Operator(OperatorId::Arrow) => {
                    return Err(CompileError::unsupported(
                        "Trailing return types are not supported".to_string(),
                        token.span,
                    ));
                }
                _ => return Ok(()),
            }
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    fn parameter_clause(&mut self, declarator: DeclaratorId) -> PResult<()> {
        let clause = self.callback.arguments_begin(declarator)?;
        self.expect_punct(PunctuationId::LParen, "Expected '(' to open parameter list")?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                // C variadic `...` carries no parameter declaration.
                if self.match_punct(PunctuationId::Ellipsis) {
                    break;
                }
                self.parameter_declaration(clause)?;
                if !self.match_punct(PunctuationId::Comma) {
                    self.match_punct(PunctuationId::Ellipsis);
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' to close parameter list")?;
        self.callback.arguments_end(clause)?;
        Ok(())
    }

    fn parameter_declaration(&mut self, clause: ParameterClauseId) -> PResult<()> {
        if !self.can_start_declaration() {
            return Err(self.error_here("Expected parameter declaration").into());
        }
        let param = self.callback.parameter_declaration_begin(clause, self.peek())?;
        let container = ContainerRef::Parameter(param);
        self.decl_specifier_seq(container, true)?;
        if !self.at_parameter_end() {
            self.declarator(container)?;
        }
        // Default argument.
        if self.match_op(OperatorId::Eq) {
            let start = self.pos;
            self.skip_until_any(&[PunctuationId::Comma, PunctuationId::RParen])?;
            self.report_expression(start)?;
        }
        self.callback.parameter_declaration_end(param)?;
        Ok(())
    }

    fn at_parameter_end(&self) -> bool {
        self.check_punct(PunctuationId::Comma)
            || self.check_punct(PunctuationId::RParen)
            || self.check_punct(PunctuationId::Ellipsis)
            || self.check_op(OperatorId::Eq)
    }
}
