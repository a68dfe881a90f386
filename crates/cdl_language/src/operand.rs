//! Clause operands: literals and action field references.

use std::fmt;

use cdl_foundation::{ActionContext, Error, Field, Result, Value, ValueType};

use crate::lexer::Lexer;
use crate::token::TokenKind;

/// One side of a comparison.
///
/// The value type is fixed when the operand is parsed: literals carry the
/// type of their lexical form, references the type of their field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A constant value.
    ///
    /// Only strings and numbers can be written in rule text; vertex and edge
    /// literals exist only when built programmatically.
    Literal(Value),
    /// A field of a bound action, written `<name>.<field>`.
    Reference {
        /// Declared context name, e.g. `a`.
        name: String,
        /// The field read from the bound action.
        field: Field,
    },
}

impl Operand {
    /// Parses a single operand token.
    ///
    /// Accepts `'...'` string literals, unsigned integers, and
    /// `<name>.<field>` references whose field is in the field table.
    ///
    /// # Errors
    /// Returns `InvalidOperand` for anything else, including surrounding
    /// tokens.
    pub fn parse(token: &str) -> Result<Self> {
        let mut lexer = Lexer::new(token);
        let first = lexer.next_token();
        if !lexer.next_token().is_eof() {
            return Err(Error::invalid_operand(token));
        }
        match first.kind {
            TokenKind::Str(s) => Ok(Self::Literal(Value::String(s))),
            TokenKind::Int(n) => Ok(Self::Literal(Value::Number(n))),
            TokenKind::Reference { name, field } => Field::parse(&field)
                .map(|field| Self::Reference { name, field })
                .ok_or_else(|| Error::invalid_operand(token)),
            _ => Err(Error::invalid_operand(token)),
        }
    }

    /// Creates a reference operand.
    #[must_use]
    pub fn reference(name: impl Into<String>, field: Field) -> Self {
        Self::Reference {
            name: name.into(),
            field,
        }
    }

    /// Returns the kind of value this operand produces.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Literal(value) => value.value_type(),
            Self::Reference { field, .. } => field.value_type(),
        }
    }

    /// Returns the context name this operand reads from, if it is a reference.
    #[must_use]
    pub fn context_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Reference { name, .. } => Some(name),
        }
    }

    /// Returns true if both operands produce the same kind of value.
    #[must_use]
    pub fn compatible_with(&self, other: &Operand) -> bool {
        self.value_type() == other.value_type()
    }

    /// Resolves this operand against a binding context.
    ///
    /// # Errors
    /// Returns `UnknownContextKey` if a referenced name is not bound.
    pub fn get_value(&self, context: &ActionContext<'_>) -> Result<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Reference { name, field } => context.resolve(name, *field),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Reference { name, field } => write!(f, "{name}.{field}"),
        }
    }
}
