//! Comparison operators and their per-type dispatch.
//!
//! Each operator is resolved once, at parse time, against the value type of
//! its left operand. The resolution is an exhaustive match over
//! `(OperatorKind, ValueType)`, so every supported pair has a comparison
//! function and every other pair is rejected before a rule is ever built.

use std::fmt;

use cdl_foundation::{Error, ErrorKind, Result, Value, ValueType};

/// Comparison between two values of the operator's value type.
///
/// Returns `None` if either value has a different kind.
type Comparison = fn(&Value, &Value) -> Option<bool>;

/// The base comparison, without negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Equality. Supports numbers, strings, and vertices.
    Is,
    /// `<`. Supports numbers.
    LessThan,
    /// `>`. Supports numbers.
    MoreThan,
    /// Shared endpoint. Supports edges.
    OverlapsWith,
}

impl OperatorKind {
    /// All kinds, in declaration order.
    pub const ALL: [OperatorKind; 4] = [
        Self::Is,
        Self::LessThan,
        Self::MoreThan,
        Self::OverlapsWith,
    ];

    /// Returns true if this kind can compare values of `value_type`.
    #[must_use]
    pub fn supports(self, value_type: ValueType) -> bool {
        comparison(self, value_type).is_some()
    }

    /// Returns the canonical phrase, e.g. `IS NOT LESS THAN`.
    #[must_use]
    pub const fn phrase(self, negated: bool) -> &'static str {
        match (self, negated) {
            (Self::Is, false) => "IS",
            (Self::Is, true) => "IS NOT",
            (Self::LessThan, false) => "IS LESS THAN",
            (Self::LessThan, true) => "IS NOT LESS THAN",
            (Self::MoreThan, false) => "IS MORE THAN",
            (Self::MoreThan, true) => "IS NOT MORE THAN",
            (Self::OverlapsWith, false) => "OVERLAPS WITH",
            (Self::OverlapsWith, true) => "NOT OVERLAPS WITH",
        }
    }
}

fn comparison(kind: OperatorKind, value_type: ValueType) -> Option<Comparison> {
    use OperatorKind::{Is, LessThan, MoreThan, OverlapsWith};

    let compare: Comparison = match (kind, value_type) {
        (Is, ValueType::Number) => number_eq,
        (Is, ValueType::String) => string_eq,
        (Is, ValueType::Vertex) => vertex_eq,
        (LessThan, ValueType::Number) => number_lt,
        (MoreThan, ValueType::Number) => number_gt,
        (OverlapsWith, ValueType::Edge) => edge_overlaps,
        (Is, ValueType::Edge)
        | (LessThan | MoreThan, ValueType::String | ValueType::Vertex | ValueType::Edge)
        | (OverlapsWith, ValueType::Number | ValueType::String | ValueType::Vertex) => {
            return None;
        }
    };
    Some(compare)
}

fn number_eq(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_number()? == b.as_number()?)
}

fn string_eq(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_str()? == b.as_str()?)
}

fn vertex_eq(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_vertex()? == b.as_vertex()?)
}

fn number_lt(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_number()? < b.as_number()?)
}

fn number_gt(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_number()? > b.as_number()?)
}

fn edge_overlaps(a: &Value, b: &Value) -> Option<bool> {
    Some(a.as_edge()?.overlaps(&b.as_edge()?))
}

/// A comparison bound to one value type.
///
/// The operator phrase is one or more uppercase words: `[IS] [NOT] <base>`
/// where the base is empty (plain `IS`), `LESS THAN`, `MORE THAN`, or
/// `OVERLAPS WITH`. Any phrase containing `NOT` negates its base comparison.
#[derive(Clone, Copy)]
pub struct Operator {
    kind: OperatorKind,
    negated: bool,
    value_type: ValueType,
    compare: Comparison,
}

impl Operator {
    /// Creates an operator for `kind` over `value_type`.
    ///
    /// # Errors
    /// Returns `UnsupportedOperandType` if the kind cannot compare this type.
    pub fn new(kind: OperatorKind, negated: bool, value_type: ValueType) -> Result<Self> {
        let compare = comparison(kind, value_type).ok_or_else(|| {
            Error::unsupported_operand_type(kind.phrase(negated), value_type)
        })?;
        Ok(Self {
            kind,
            negated,
            value_type,
            compare,
        })
    }

    /// Parses an operator phrase for operands of `value_type`.
    ///
    /// # Errors
    /// Returns `UnknownOperator` if the phrase is not in the vocabulary, or
    /// `UnsupportedOperandType` if the operator cannot compare this type.
    pub fn parse(token: &str, value_type: ValueType) -> Result<Self> {
        let words: Vec<&str> = token.split_whitespace().collect();
        let mut rest = words.as_slice();

        let is = matches!(rest.first(), Some(&"IS"));
        if is {
            rest = &rest[1..];
        }
        let negated = matches!(rest.first(), Some(&"NOT"));
        if negated {
            rest = &rest[1..];
        }

        let kind = match (is, rest) {
            (true, []) => OperatorKind::Is,
            (_, ["LESS", "THAN"]) => OperatorKind::LessThan,
            (_, ["MORE", "THAN"]) => OperatorKind::MoreThan,
            (false, ["OVERLAPS", "WITH"]) => OperatorKind::OverlapsWith,
            _ => return Err(Error::new(ErrorKind::UnknownOperator(token.to_string()))),
        };
        Self::new(kind, negated, value_type)
    }

    /// Returns the base comparison.
    #[must_use]
    pub const fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Returns true if the base comparison is inverted.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the value type this operator was built for.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Compares two values.
    ///
    /// # Errors
    /// Returns `ValueKindMismatch` if either value is not of the operator's
    /// value type.
    pub fn apply(&self, left: &Value, right: &Value) -> Result<bool> {
        for value in [left, right] {
            if value.value_type() != self.value_type {
                return Err(self.mismatch(value));
            }
        }
        (self.compare)(left, right)
            .map(|result| result != self.negated)
            .ok_or_else(|| self.mismatch(left))
    }

    fn mismatch(&self, value: &Value) -> Error {
        Error::new(ErrorKind::ValueKindMismatch {
            expected: self.value_type,
            actual: value.value_type(),
        })
    }

    /// Returns the canonical phrase, e.g. `IS NOT LESS THAN`.
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        self.kind.phrase(self.negated)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.negated == other.negated
            && self.value_type == other.value_type
    }
}

impl Eq for Operator {}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("kind", &self.kind)
            .field("negated", &self.negated)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}
