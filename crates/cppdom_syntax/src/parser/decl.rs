/// Declaration parsing methods.
///
/// This chunk handles simple declarations: the decl-specifier-seq, the init-declarator list and function
/// definitions. Function bodies, initializers and bit-field widths are skipped as balanced token runs.
impl<'a, C: ParserCallback> Parser<'a, C> {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self, scope: ScopeRef) -> PResult<()> {
        self.reject_unsupported_declaration()?;
        if !self.can_start_declaration() {
            return Err(self.error_here("Expected declaration").into());
        }

        let decl = self.callback.simple_declaration_begin(scope, self.peek())?;
        let container = ContainerRef::Simple(decl);
        self.decl_specifier_seq(container, false)?;

        let is_definition = if self.check_punct(PunctuationId::Semicolon) {
            false
        } else {
            self.init_declarator_list(container)?
        };
        if !is_definition {
            self.expect_punct(PunctuationId::Semicolon, "Expected ';' after declaration")?;
        }
        self.callback.simple_declaration_end(decl)?;
        Ok(())
    }

    /// Returns `true` when the list turned out to be a function definition, which takes no trailing `;`.
    fn init_declarator_list(&mut self, container: ContainerRef) -> PResult<bool> {
        let mut first = true;
        loop {
            let is_function = self.declarator(container)?;
            if first && is_function && self.at_function_body() {
                self.function_body()?;
                return Ok(true);
            }
            self.initializer()?;
            first = false;
            if !self.match_punct(PunctuationId::Comma) {
                return Ok(false);
            }
        }
    }

    fn can_start_declaration(&self) -> bool {
        let kind = &self.peek().kind;
        match kind {
            TokenKind::Keyword(id) => {
                is_decl_specifier_keyword(*id)
                    || matches!(
                        id,
                        KeywordId::Class
                            | KeywordId::Struct
                            | KeywordId::Union
                            | KeywordId::Typename
                            | KeywordId::Operator
                    )
            }
            TokenKind::Ident(_) => true,
            _ => {
                kind.is_pointer_operator()
                    || kind.is_operator(OperatorId::Tilde)
                    || kind.is_punctuation(PunctuationId::ColonColon)
                    || kind.is_punctuation(PunctuationId::LParen)
            }
        }
    }

    /// Valid C++ this frontend deliberately does not model.
    fn reject_unsupported_declaration(&self) -> Result<(), CompileError> {
        let Some(id) = self.peek().keyword_id() else {
            return Ok(());
        };
        let message = match id {
            KeywordId::Namespace
            | KeywordId::Template
            | KeywordId::Using
            | KeywordId::Enum
            | KeywordId::StaticAssert
            | KeywordId::Asm => format!("'{}' declarations are not supported", keywords::as_str(id)),
            KeywordId::Extern if matches!(self.peek_next().kind, TokenKind::String(_)) => {
                "Linkage specifications are not supported".to_string()
            }
            _ => return Ok(()),
        };
        Err(CompileError::unsupported(message, self.current_span())
            .with_hint("only simple declarations, class specifiers and function declarators are understood"))
    }

    // ========================================================================
    // Declaration specifiers
    // ========================================================================

    /// Specifier keywords, at most one class / elaborated / named type specifier, in any order.
    ///
    /// `in_parameter` relaxes the type-name test: inside a parameter list a leading identifier is always the type.
    fn decl_specifier_seq(&mut self, container: ContainerRef, in_parameter: bool) -> PResult<()> {
        let mut has_type = false;
        loop {
            let token = self.peek();
            match token.keyword_id() {
                Some(id) if is_decl_specifier_keyword(id) => {
                    self.callback.simple_decl_specifier(container, token)?;
                    has_type |= names_a_type(id);
                    self.advance();
                    continue;
                }
                Some(KeywordId::Class | KeywordId::Struct | KeywordId::Union) if !has_type => {
                    self.class_or_elaborated_specifier(container)?;
                    has_type = true;
                    continue;
                }
                Some(KeywordId::Typename) if !has_type => {
                    self.advance();
                    self.named_type_specifier(container)?;
                    has_type = true;
                    continue;
                }
                Some(id @ (KeywordId::Enum | KeywordId::Decltype)) => {
                    return Err(CompileError::unsupported(
                        format!("'{}' type specifiers are not supported", keywords::as_str(id)),
                        token.span,
                    )
                    .into());
                }
                _ => {}
            }
            if !has_type && self.at_type_name(in_parameter) {
                self.named_type_specifier(container)?;
                has_type = true;
                continue;
            }
            return Ok(());
        }
    }

    /// Whether the identifier run at the cursor names a type rather than the declarator.
    ///
    /// Outside parameter lists a name is a type only when something that can follow a type comes next
    /// (`Foo x`, `Foo *p`, `Foo const`, `Foo (*fp)`); `Foo(...)` and `Foo;` leave it to the declarator.
    fn at_type_name(&self, in_parameter: bool) -> bool {
        let Some(end) = self.scan_qualified_name(self.pos) else {
            return false;
        };
        if in_parameter {
            return true;
        }
        let next = &self.token_at(end).kind;
        matches!(next, TokenKind::Ident(_) | TokenKind::Keyword(_))
            || next.is_pointer_operator()
            || (next.is_punctuation(PunctuationId::LParen) && self.token_at(end + 1).kind.is_pointer_operator())
    }

    fn named_type_specifier(&mut self, container: ContainerRef) -> PResult<()> {
        self.qualified_name("Expected type name")?;
        self.reject_template_arguments()?;
        self.callback.simple_decl_specifier_name(container)?;
        Ok(())
    }

    // ========================================================================
    // Bodies and initializers
    // ========================================================================

    fn at_function_body(&self) -> bool {
        self.check_punct(PunctuationId::LBrace)
            || self.check_punct(PunctuationId::Colon)
            || self.check_keyword(KeywordId::Try)
    }

    /// Optional constructor initializers, then a balanced `{ ... }`.
    fn function_body(&mut self) -> PResult<()> {
        if self.check_keyword(KeywordId::Try) {
            return Err(
                CompileError::unsupported("Function try blocks are not supported".to_string(), self.current_span())
                    .into(),
            );
        }
        self.callback.function_body_begin()?;
        if self.match_punct(PunctuationId::Colon) {
            self.skip_member_initializers()?;
        }
        if !self.check_punct(PunctuationId::LBrace) {
            return Err(self.error_here("Expected function body").into());
        }
        self.skip_balanced()?;
        self.callback.function_body_end()?;
        Ok(())
    }

    /// `a(x), b{y}, Base(z)` up to the body.
    fn skip_member_initializers(&mut self) -> Result<(), CompileError> {
        loop {
            let Some(end) = self.scan_qualified_name(self.pos) else {
                return Err(self.error_here("Expected member initializer"));
            };
            self.pos = end;
            if !self.check_punct(PunctuationId::LParen) && !self.check_punct(PunctuationId::LBrace) {
                return Err(self.error_here("Expected '(' or '{' after member initializer"));
            }
            self.skip_balanced()?;
            if !self.match_punct(PunctuationId::Comma) {
                return Ok(());
            }
        }
    }

    /// Skip `= expr`, `= 0`, `(args)`, `{args}` or a bit-field `: width`, reporting the skipped operands.
    fn initializer(&mut self) -> PResult<()> {
        if self.match_op(OperatorId::Eq) || self.match_punct(PunctuationId::Colon) {
            let start = self.pos;
            self.skip_until_any(&[PunctuationId::Comma, PunctuationId::Semicolon])?;
            return self.report_expression(start);
        }
        if self.check_punct(PunctuationId::LParen) || self.check_punct(PunctuationId::LBrace) {
            let start = self.pos;
            self.skip_balanced()?;
            return self.report_expression(start);
        }
        Ok(())
    }

    /// Replay the operators and terminals of the skipped tokens `start..pos`.
    fn report_expression(&mut self, start: usize) -> PResult<()> {
        let tokens = self.tokens;
        for token in &tokens[start..self.pos] {
            match &token.kind {
                TokenKind::Operator(_) => self.callback.expression_operator(token)?,
                TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Char(_)
                | TokenKind::String(_)
                | TokenKind::Keyword(KeywordId::True | KeywordId::False | KeywordId::Nullptr | KeywordId::This) => {
                    self.callback.expression_terminal(token)?
                }
                _ => {}
            }
        }
        Ok(())
    }
}
