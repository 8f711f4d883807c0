//! Lexer for C and C++ source
//!
//! Handles tokenization including:
//! - Keywords (registry lookup, including GNU aliases such as `__inline__`)
//! - Identifiers and literals (integer, floating, character, string; with encoding prefixes)
//! - Operators and punctuation, longest match first (`->*`, `<<=`, `...`, `::`)
//! - Line and block comments
//! - Preprocessor directives, one token per logical line
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use cppdom_core::lang::operators;
use cppdom_core::lang::punctuation;

/// Longest operator or punctuator spelling (`->*`, `<<=`, `...`).
const MAX_SYMBOL_LEN: usize = 3;

/// Lexer for C/C++ source code.
///
/// Converts source text into a stream of tokens. Whitespace and comments are dropped; a `#` that is the first
/// non-blank character of a line starts a directive which swallows the rest of the logical line.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// No token has been produced on the current line yet.
    at_line_start: bool,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
        self.at_line_start = false;
    }

    fn error(&mut self, message: String, start: usize) {
        self.errors
            .push(CompileError::new(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '\n' => self.at_line_start = true,
            ' ' | '\t' | '\r' | '\x0b' | '\x0c' => {}

            // Line splice outside a directive.
            '\\' if matches!(self.peek(), Some('\n' | '\r')) => {
                self.match_char('\r');
                self.match_char('\n');
            }

            '/' if self.peek() == Some('/') => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.skip_block_comment(start);
            }

            '#' if self.at_line_start => self.scan_directive(start),

            '"' => self.scan_quoted(start, '"'),
            '\'' => self.scan_quoted(start, '\''),

            '0'..='9' => self.scan_number(start),
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.scan_symbol(start, c),
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.error("Unterminated block comment".to_string(), start);
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Preprocessor
    // ========================================================================

    /// Scan `# name body...` up to the end of the logical line.
    fn scan_directive(&mut self, start: usize) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }

        let name_start = self.current_pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let name = self.source[name_start..self.current_pos].to_string();

        let mut body = String::new();
        let mut quote: Option<char> = None;
        while let Some(c) = self.peek() {
            match c {
                '\n' => break,
                '\\' if matches!(self.peek_next(), Some('\n' | '\r')) => {
                    self.advance();
                    self.match_char('\r');
                    self.match_char('\n');
                    body.push(' ');
                    continue;
                }
                '/' if quote.is_none() && self.peek_next() == Some('/') => {
                    self.skip_line_comment();
                    break;
                }
                '/' if quote.is_none() && self.peek_next() == Some('*') => {
                    let comment_start = self.current_pos;
                    self.advance();
                    self.advance();
                    self.skip_block_comment(comment_start);
                    body.push(' ');
                    continue;
                }
                '"' | '\'' => match quote {
                    Some(q) if q == c => quote = None,
                    None => quote = Some(c),
                    Some(_) => {}
                },
                _ => {}
            }
            body.push(c);
            self.advance();
        }

        self.add_token(
            TokenKind::Directive {
                name,
                body: body.trim().to_string(),
            },
            start,
        );
        // The directive consumed the line; the newline itself is scanned next.
        self.at_line_start = true;
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Scan a character or string literal whose opening quote (and any prefix) has been consumed.
    fn scan_quoted(&mut self, start: usize, quote: char) {
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('\n') | None => {
                    let what = if quote == '"' { "string" } else { "character" };
                    self.error(format!("Unterminated {what} literal"), start);
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let spelling = self.source[start..self.current_pos].to_string();
        let kind = if quote == '"' {
            TokenKind::String(spelling)
        } else {
            TokenKind::Char(spelling)
        };
        self.add_token(kind, start);
    }

    /// Scan a pp-number: digits, letters, `.`, `'` separators, and signed exponents.
    fn scan_number(&mut self, start: usize) {
        let rest = &self.source[start..];
        let is_hex = rest.starts_with("0x") || rest.starts_with("0X");
        let mut is_float = rest.starts_with('.');

        while let Some(c) = self.peek() {
            let exponent = if is_hex { matches!(c, 'p' | 'P') } else { matches!(c, 'e' | 'E') };
            if exponent {
                is_float = true;
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
            } else if c == '.' {
                is_float = true;
                self.advance();
            } else if c.is_ascii_alphanumeric() || c == '_' || c == '\'' {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = self.source[start..self.current_pos].to_string();
        let kind = if is_float {
            TokenKind::Float(spelling)
        } else {
            TokenKind::Int(spelling)
        };
        self.add_token(kind, start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = &self.source[start..self.current_pos];

        // Encoding prefixes glue onto the literal that follows.
        if matches!(spelling, "L" | "u" | "U" | "u8") {
            if let Some(quote @ ('"' | '\'')) = self.peek() {
                self.advance();
                self.scan_quoted(start, quote);
                return;
            }
        }

        // Look up identifier spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    // ========================================================================
    // Operators and punctuation
    // ========================================================================

    /// Longest registry match starting at `start`; the first character is already consumed.
    fn scan_symbol(&mut self, start: usize, first: char) {
        let rest = &self.source[start..];
        for len in (1..=MAX_SYMBOL_LEN.min(rest.len())).rev() {
            let Some(candidate) = rest.get(..len) else {
                continue;
            };
            let kind = if let Some(id) = punctuation::from_str(candidate) {
                TokenKind::Punctuation(id)
            } else if let Some(id) = operators::from_str(candidate) {
                TokenKind::Operator(id)
            } else {
                continue;
            };
            for _ in 1..candidate.chars().count() {
                self.advance();
            }
            self.add_token(kind, start);
            return;
        }

        self.error(format!("Unexpected character '{}'", first), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cppdom_core::lang::keywords::KeywordId;
    use cppdom_core::lang::operators::OperatorId;
    use cppdom_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for p in punctuation::PUNCTUATION {
            let tokens = lex(p.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", p.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for {:?}, got {:?}", p.id, tokens);
            assert!(tokens[0].kind.is_punctuation(p.id), "{:?} lexed as {:?}", p.id, tokens[0].kind);
        }
    }

    #[test]
    fn test_keyword_registry_parity() {
        use cppdom_core::lang::keywords;

        for k in keywords::KEYWORDS {
            for spelling in std::iter::once(&k.canonical).chain(k.aliases.iter()) {
                let tokens = lex(spelling).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", spelling, errs));
                assert_eq!(tokens.len(), 2, "expected token + EOF for {:?}, got {:?}", spelling, tokens);
                assert!(tokens[0].kind.is_keyword(k.id));
            }
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for o in operators::OPERATORS {
            let tokens = lex(o.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", o.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for {:?}, got {:?}", o.id, tokens);
            assert!(tokens[0].kind.is_operator(o.id), "{:?} lexed as {:?}", o.id, tokens[0].kind);
        }
    }

    #[test]
    fn test_declaration_tokens() {
        let tokens = kinds("unsigned long int x;");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Keyword(KeywordId::Unsigned),
                TokenKind::Keyword(KeywordId::Long),
                TokenKind::Keyword(KeywordId::Int),
                TokenKind::Ident("x".to_string()),
                TokenKind::Punctuation(PunctuationId::Semicolon),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match() {
        let tokens = kinds("a->*b <<= c ... ::d");
        assert!(tokens[1].is_operator(OperatorId::ArrowStar));
        assert!(tokens[3].is_operator(OperatorId::LtLtEq));
        assert!(tokens[5].is_punctuation(PunctuationId::Ellipsis));
        assert!(tokens[6].is_punctuation(PunctuationId::ColonColon));
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("int  foo;").unwrap();
        assert_eq!(tokens[1].span, Span::new(5, 8));
        assert_eq!(tokens[3].span, Span::new(9, 9));
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = kinds("int /* block\n comment */ x; // trailing\nchar y;");
        assert_eq!(tokens.len(), 7);
        assert!(tokens[3].is_keyword(KeywordId::Char));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("42 0x1Fu 3.14 1e10 .5f 1'000 0x1p-3");
        assert_eq!(tokens[0], TokenKind::Int("42".to_string()));
        assert_eq!(tokens[1], TokenKind::Int("0x1Fu".to_string()));
        assert_eq!(tokens[2], TokenKind::Float("3.14".to_string()));
        assert_eq!(tokens[3], TokenKind::Float("1e10".to_string()));
        assert_eq!(tokens[4], TokenKind::Float(".5f".to_string()));
        assert_eq!(tokens[5], TokenKind::Int("1'000".to_string()));
        assert_eq!(tokens[6], TokenKind::Float("0x1p-3".to_string()));
    }

    #[test]
    fn test_strings_and_chars() {
        let tokens = kinds(r#""a\"b" 'c' L"wide" u8"utf" '\n'"#);
        assert_eq!(tokens[0], TokenKind::String(r#""a\"b""#.to_string()));
        assert_eq!(tokens[1], TokenKind::Char("'c'".to_string()));
        assert_eq!(tokens[2], TokenKind::String("L\"wide\"".to_string()));
        assert_eq!(tokens[3], TokenKind::String("u8\"utf\"".to_string()));
        assert_eq!(tokens[4], TokenKind::Char(r"'\n'".to_string()));
    }

    #[test]
    fn test_directives() {
        let tokens = kinds("#include <stdio.h>\n  # define MAX \\\n  10 // limit\nint x;");
        assert_eq!(
            tokens[0],
            TokenKind::Directive {
                name: "include".to_string(),
                body: "<stdio.h>".to_string()
            }
        );
        assert_eq!(
            tokens[1],
            TokenKind::Directive {
                name: "define".to_string(),
                body: "MAX    10".to_string()
            }
        );
        assert!(tokens[2].is_keyword(KeywordId::Int));
    }

    #[test]
    fn test_hash_mid_line_is_not_a_directive() {
        let result = lex("int x; #define Y");
        assert!(result.is_err());
    }

    #[test]
    fn test_unterminated_literals_and_comments() {
        let errors = lex("\"abc\n'x").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("Unterminated string literal"));
        assert!(errors[1].message.contains("Unterminated character literal"));

        let errors = lex("int /* never closed").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unterminated block comment"));
    }

    #[test]
    fn test_unicode_identifier_rejected() {
        let errors = lex("int π;").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unexpected character"));
    }
}
