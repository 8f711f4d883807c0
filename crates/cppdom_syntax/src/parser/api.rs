impl From<ParseError> for FrontendError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Syntax(error) => FrontendError::Syntax(error),
            ParseError::Build(error) => FrontendError::Build(error),
        }
    }
}

/// Parse a token stream, driving `callback` with grammar events.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `cppdom_syntax::lexer`.
/// - `callback`: Receiver of the events, usually a [`DomBuilder`] or an [`crate::events::EventLog`].
///
/// ## Errors
/// Returns the first syntax error or callback error; the callback has seen every event up to that point.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse<C: ParserCallback>(tokens: &[Token], callback: &mut C) -> Result<(), ParseError> {
    Parser::new(tokens, callback).parse()
}

/// Lex, parse and build `source` into a [`TranslationUnit`].
///
/// ## Errors
/// - [`FrontendError::Lex`] with every lexer error;
/// - [`FrontendError::Syntax`] with the first syntax error;
/// - [`FrontendError::Build`] if the builder rejected the event stream.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn build_translation_unit(source: &str) -> Result<TranslationUnit, FrontendError> {
    let tokens = lexer::lex(source).map_err(FrontendError::Lex)?;
    let mut builder = DomBuilder::new(source);
    parse(&tokens, &mut builder)?;
    builder.finish().map_err(FrontendError::Build)
}
