//! Statement parser for CDL.
//!
//! Parsing happens in three steps:
//!
//! 1. Split the statement once on `" IF "` into context and predicate.
//! 2. Match the context against `ACTION <name> IS BLOCKED [BY ACTION <name>]`
//!    and declare the names on the builder.
//! 3. Check that the whole predicate is a connector-joined sequence of
//!    `<operand> <operator> <operand>` clauses, then feed the clause tokens
//!    to the builder in order.
//!
//! The grammar check in step 3 runs to completion before any token reaches
//! the builder, so a malformed predicate is always reported as a parse error
//! rather than as whatever the builder would have tripped over first.

use tracing::debug;

use cdl_foundation::{Error, ErrorKind, Result};

use crate::builder::ConstraintBuilder;
use crate::connector::Connector;
use crate::constraint::ConstraintTemplate;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Top-level statement grammar.
pub const STATEMENT_PATTERN: &str = "<context> IF <predicate>";

/// Context clause grammar.
pub const CONTEXT_PATTERN: &str = "ACTION <name> IS BLOCKED [BY ACTION <name>]";

/// Predicate grammar.
pub const PREDICATE_PATTERN: &str =
    "<operand> <operator> <operand> [(AND|OR)[ NOT] <operand> <operator> <operand>]...";

const SEPARATOR: &str = " IF ";

/// The tokens of one clause, as written.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ClauseTokens<'src> {
    connector: Option<String>,
    operand1: &'src str,
    operator: String,
    operand2: &'src str,
}

/// A one-token-lookahead cursor over a lexer.
struct Cursor<'src> {
    source: &'src str,
    lexer: Lexer<'src>,
    current: Token,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            source,
            lexer,
            current,
        }
    }

    fn bump(&mut self) -> Token {
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    fn at_eof(&self) -> bool {
        self.current.is_eof()
    }

    /// Consumes a run of uppercase words and joins them with single spaces.
    fn words(&mut self) -> Option<String> {
        let mut words: Vec<String> = Vec::new();
        while let Some(word) = self.current.word() {
            words.push(word.to_string());
            self.bump();
        }
        (!words.is_empty()).then(|| words.join(" "))
    }

    fn operand(&mut self) -> Option<&'src str> {
        if self.current.is_operand() {
            let token = self.bump();
            Some(token.text(self.source))
        } else {
            None
        }
    }

    fn describe_current(&self) -> String {
        format!("{} at column {}", self.current.kind, self.current.span.column)
    }
}

/// Parses single CDL statements into builders.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstraintParser;

impl ConstraintParser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a statement into a builder with its context names declared and
    /// its predicate fed.
    ///
    /// # Errors
    /// Returns a parse error (`MalformedStatement`, `MalformedContext`,
    /// `MalformedPredicate`) if the text does not match the grammar, and the
    /// builder's operand or type errors if it matches but is ill-typed.
    pub fn parse(&self, statement: &str) -> Result<ConstraintBuilder> {
        let (context, predicate) = Self::split(statement)?;
        let mut builder = ConstraintBuilder::new();
        Self::parse_context(context, &mut builder)?;
        Self::parse_predicate(predicate, &mut builder)?;
        Ok(builder)
    }

    /// Splits a statement into its context and predicate parts.
    ///
    /// # Errors
    /// Returns `MalformedStatement` if the separator is missing or either
    /// side is empty.
    pub fn split(statement: &str) -> Result<(&str, &str)> {
        let malformed = || {
            Error::new(ErrorKind::MalformedStatement {
                statement: statement.to_string(),
                pattern: STATEMENT_PATTERN,
            })
        };
        let (context, predicate) = statement.trim().split_once(SEPARATOR).ok_or_else(malformed)?;
        let (context, predicate) = (context.trim(), predicate.trim());
        if context.is_empty() || predicate.is_empty() {
            return Err(malformed());
        }
        Ok((context, predicate))
    }

    fn parse_context(context: &str, builder: &mut ConstraintBuilder) -> Result<()> {
        let (requesting, restricting) = Self::context_names(context).ok_or_else(|| {
            Error::new(ErrorKind::MalformedContext {
                context: context.to_string(),
                pattern: CONTEXT_PATTERN,
            })
        })?;
        builder.with_requesting_context_name(&requesting)?;
        if let Some(restricting) = restricting {
            builder.with_restricting_context_name(&restricting)?;
        }
        Ok(())
    }

    fn context_names(context: &str) -> Option<(String, Option<String>)> {
        let mut cursor = Cursor::new(context);
        let keyword = |cursor: &mut Cursor<'_>, expected: &str| {
            (cursor.current.word() == Some(expected)).then(|| cursor.bump())
        };
        let name = |cursor: &mut Cursor<'_>| match cursor.bump().kind {
            TokenKind::Name(name) => Some(name),
            _ => None,
        };

        keyword(&mut cursor, "ACTION")?;
        let requesting = name(&mut cursor)?;
        keyword(&mut cursor, "IS")?;
        keyword(&mut cursor, "BLOCKED")?;
        if cursor.at_eof() {
            return Some((requesting, None));
        }
        keyword(&mut cursor, "BY")?;
        keyword(&mut cursor, "ACTION")?;
        let restricting = name(&mut cursor)?;
        cursor.at_eof().then_some((requesting, Some(restricting)))
    }

    /// Checks the whole predicate against the grammar and groups its tokens
    /// into clauses.
    fn clauses(predicate: &str) -> Result<Vec<ClauseTokens<'_>>> {
        let malformed = |message: String| {
            Error::new(ErrorKind::MalformedPredicate {
                predicate: predicate.to_string(),
                pattern: PREDICATE_PATTERN,
                message,
            })
        };

        let mut cursor = Cursor::new(predicate);
        let mut clauses = Vec::new();
        loop {
            let connector = if clauses.is_empty() {
                None
            } else {
                let text = cursor
                    .words()
                    .ok_or_else(|| malformed(format!("expected connector, found {}", cursor.describe_current())))?;
                Connector::parse(&text)
                    .map_err(|_| malformed(format!("invalid connector {text:?}")))?;
                Some(text)
            };
            let operand1 = cursor
                .operand()
                .ok_or_else(|| malformed(format!("expected operand, found {}", cursor.describe_current())))?;
            let operator = cursor
                .words()
                .ok_or_else(|| malformed(format!("expected operator, found {}", cursor.describe_current())))?;
            let operand2 = cursor
                .operand()
                .ok_or_else(|| malformed(format!("expected operand, found {}", cursor.describe_current())))?;
            clauses.push(ClauseTokens {
                connector,
                operand1,
                operator,
                operand2,
            });
            if cursor.at_eof() {
                return Ok(clauses);
            }
        }
    }

    fn parse_predicate(predicate: &str, builder: &mut ConstraintBuilder) -> Result<()> {
        for clause in Self::clauses(predicate)? {
            if let Some(connector) = &clause.connector {
                builder.with_predicate_token(connector)?;
            }
            builder
                .with_predicate_token(clause.operand1)?
                .with_predicate_token(&clause.operator)?
                .with_predicate_token(clause.operand2)?;
        }
        Ok(())
    }
}

/// Parses one statement into an unbound template.
///
/// # Errors
/// Returns the first parse, operand, type, or binding error found.
pub fn parse_constraint(line: &str) -> Result<ConstraintTemplate> {
    let template = ConstraintParser::new().parse(line)?.into_template()?;
    debug!(
        rule = %template,
        single = template.is_single_context(),
        clauses = template.predicate().len(),
        "parsed constraint"
    );
    Ok(template)
}
