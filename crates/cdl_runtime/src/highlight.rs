//! Syntax highlighting for the REPL.
//!
//! Rule text is colored by running it through the CDL lexer, so the colors
//! always agree with what the parser will see. REPL commands (`:rules`, ...)
//! are colored as a whole word.

use std::borrow::Cow;

use cdl_language::{Lexer, TokenKind};

const RESET: &str = "\x1b[0m";

/// Highlighter for CDL statements and REPL commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct CdlHighlighter;

impl CdlHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }
        if line.trim_start().starts_with(':') {
            return Cow::Owned(Self::highlight_command(line));
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut copied = 0;
        let mut lexer = Lexer::new(line);

        loop {
            let token = lexer.next_token();
            if token.is_eof() {
                break;
            }
            result.push_str(line.get(copied..token.span.start).unwrap_or_default());
            let text = token.text(line);
            match Self::color(&token.kind, text) {
                Some(color) => {
                    result.push_str(color);
                    result.push_str(text);
                    result.push_str(RESET);
                }
                None => result.push_str(text),
            }
            copied = token.span.end;
        }
        result.push_str(line.get(copied..).unwrap_or_default());

        Cow::Owned(result)
    }

    fn color(kind: &TokenKind, text: &str) -> Option<&'static str> {
        match kind {
            // Statement skeleton - bold green
            TokenKind::Word(_) if matches!(text, "ACTION" | "IF") => Some("\x1b[1;32m"),
            // Connectors - bold
            TokenKind::Word(_) if matches!(text, "AND" | "OR" | "NOT") => Some("\x1b[1m"),
            TokenKind::Word(_) => Some("\x1b[32m"),
            TokenKind::Reference { .. } => Some("\x1b[36m"),
            TokenKind::Str(_) => Some("\x1b[33m"),
            TokenKind::Int(_) => Some("\x1b[35m"),
            TokenKind::Error(_) => Some("\x1b[31m"),
            TokenKind::Name(_) | TokenKind::Eof => None,
        }
    }

    fn highlight_command(line: &str) -> String {
        let start = line.len() - line.trim_start().len();
        let end = line[start..]
            .find(char::is_whitespace)
            .map_or(line.len(), |i| start + i);
        format!(
            "{}\x1b[36m{}{RESET}{}",
            &line[..start],
            &line[start..end],
            &line[end..]
        )
    }
}
