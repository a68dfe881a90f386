//! Token types for CDL statements.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token can stand as a clause operand.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Str(_) | TokenKind::Int(_) | TokenKind::Reference { .. }
        )
    }

    /// Returns the keyword if this token is an uppercase word.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token types for CDL statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Uppercase keyword such as `ACTION`, `IS`, `AND` or `OVERLAPS`.
    Word(String),
    /// Lowercase context name such as `a`.
    Name(String),
    /// Dotted action reference such as `a.dest`.
    ///
    /// The field is not checked against the field table here.
    Reference {
        /// Context name before the dot.
        name: String,
        /// Field name after the dot.
        field: String,
    },
    /// Unsigned integer literal.
    Int(i64),
    /// Single-quoted string literal, without the quotes.
    Str(String),
    /// Text that is not a valid token.
    Error(String),
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "keyword {w}"),
            Self::Name(n) => write!(f, "name {n}"),
            Self::Reference { name, field } => write!(f, "reference {name}.{field}"),
            Self::Int(n) => write!(f, "integer {n}"),
            Self::Str(s) => write!(f, "string '{s}'"),
            Self::Error(msg) => write!(f, "invalid token ({msg})"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}
