/// Class specifier parsing.
///
/// `class|struct|union name? final? base-clause? { member-specification }`, or the elaborated form `struct S`
/// when no body follows the name.
impl<'a, C: ParserCallback> Parser<'a, C> {
    // ========================================================================
    // Class specifiers
    // ========================================================================

    fn class_or_elaborated_specifier(&mut self, container: ContainerRef) -> PResult<()> {
        let key = self.advance();
        let name_end = self.scan_qualified_name(self.pos);
        let after = &self.token_at(name_end.unwrap_or(self.pos)).kind;
        let has_body = after.is_punctuation(PunctuationId::LBrace)
            || after.is_punctuation(PunctuationId::Colon)
            || after.ident() == Some("final");

        if !has_body {
            if name_end.is_none() {
                return Err(self.error_here("Expected class name or '{'").into());
            }
            self.qualified_name("Expected class name")?;
            self.reject_template_arguments()?;
            self.callback.elaborated_type_specifier(container, key)?;
            return Ok(());
        }

        let class = self.callback.class_specifier_begin(container, key)?;
        if name_end.is_some() {
            self.qualified_name("Expected class name")?;
            self.callback.class_specifier_name(class)?;
        }
        if self.peek().kind.ident() == Some("final") {
            self.advance();
        }
        if self.match_punct(PunctuationId::Colon) {
            self.base_clause(class)?;
        }
        self.expect_punct(PunctuationId::LBrace, "Expected '{' to open class body")?;
        self.nested(|p| p.member_specification(class))?;
        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close class body")?;
        self.callback.class_specifier_end(class)?;
        Ok(())
    }

    fn base_clause(&mut self, class: ClassSpecifierId) -> PResult<()> {
        loop {
            self.base_specifier(class)?;
            if !self.match_punct(PunctuationId::Comma) {
                return Ok(());
            }
        }
    }

    /// `virtual` and an access keyword may appear in either order before the name.
    fn base_specifier(&mut self, class: ClassSpecifierId) -> PResult<()> {
        let base = self.callback.base_specifier_begin(class)?;
        loop {
            let token = self.peek();
            match token.keyword_id() {
                Some(KeywordId::Virtual) => self.callback.base_specifier_virtual(base, true)?,
                Some(KeywordId::Public | KeywordId::Protected | KeywordId::Private) => {
                    self.callback.base_specifier_visibility(base, token)?
                }
                _ => break,
            }
            self.advance();
        }
        self.qualified_name("Expected base class name")?;
        self.reject_template_arguments()?;
        self.callback.base_specifier_name(base)?;
        self.callback.base_specifier_end(base)?;
        Ok(())
    }

    /// Members, access labels and directives up to the closing `}`.
    fn member_specification(&mut self, class: ClassSpecifierId) -> PResult<()> {
        let scope = ScopeRef::Class(class);
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let token = self.peek();
            let is_access = matches!(
                token.keyword_id(),
                Some(KeywordId::Public | KeywordId::Protected | KeywordId::Private)
            );
            if is_access && self.peek_next().kind.is_punctuation(PunctuationId::Colon) {
                self.callback.class_member_visibility(class, token)?;
                self.advance();
                self.advance();
                continue;
            }
            if self.check_directive() {
                self.directive()?;
                continue;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }
            self.declaration(scope)?;
        }
        Ok(())
    }
}
