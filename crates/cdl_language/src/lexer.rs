//! Lexer for CDL statements.
//!
//! Statements are single lines. Runs of horizontal whitespace separate
//! tokens; everything else is either a quoted string literal or a bare run
//! of `[A-Za-z0-9_.]` that is classified by its shape.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for CDL source text.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Once the input is exhausted every call returns [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_column = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('\'') => self.scan_string(),
            Some(c) if is_bare_char(c) => self.scan_bare(),
            Some(c) => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c:?}"))
            }
        };

        Token::new(kind, Span::new(start, self.position, start_column))
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            self.column += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a `'...'` literal. Only word characters, horizontal whitespace,
    /// and `( ) , . *` may appear between the quotes.
    fn scan_string(&mut self) -> TokenKind {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => return TokenKind::Error("unterminated string literal".to_string()),
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some(c) if is_string_char(c) => {
                    value.push(c);
                    self.advance();
                }
                Some(c) => {
                    self.skip_to_quote();
                    return TokenKind::Error(format!("character {c:?} not allowed in string literal"));
                }
            }
        }
        if value.is_empty() {
            TokenKind::Error("empty string literal".to_string())
        } else {
            TokenKind::Str(value)
        }
    }

    /// Recovers from a bad string literal by consuming through the closing quote.
    fn skip_to_quote(&mut self) {
        while let Some(c) = self.peek_char() {
            self.advance();
            if c == '\'' {
                break;
            }
        }
    }

    fn scan_bare(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_bare_char) {
            self.advance();
        }
        classify(&self.source[start..self.position])
    }
}

fn classify(text: &str) -> TokenKind {
    if text.bytes().all(|b| b.is_ascii_uppercase()) {
        return TokenKind::Word(text.to_string());
    }
    if is_name(text) {
        return TokenKind::Name(text.to_string());
    }
    if let Some((name, field)) = text.split_once('.') {
        if is_name(name) && is_name(field) {
            return TokenKind::Reference {
                name: name.to_string(),
                field: field.to_string(),
            };
        }
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return match text.parse() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => TokenKind::Error(format!("integer out of range: {text}")),
        };
    }
    TokenKind::Error(format!("malformed word: {text}"))
}

fn is_name(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_lowercase())
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_string_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '\t' | '(' | ')' | ',' | '.' | '*')
}
