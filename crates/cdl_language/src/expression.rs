//! Clause chains and their composition into a predicate.
//!
//! A parsed predicate is an ordered list of [`Expression`]s. The first has no
//! connector; every later one carries the connector that joined it to the
//! clauses before it. Evaluation is a strict left fold with no precedence
//! and no short-circuit: `a AND b OR c` is `(a AND b) OR c`, and every
//! clause is evaluated.

use std::fmt;
use std::sync::Arc;

use cdl_foundation::{ActionContext, Error, ErrorKind, Result};

use crate::connector::Connector;
use crate::operand::Operand;
use crate::operator::Operator;

/// One `<operand> <operator> <operand>` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    /// Left-hand side.
    pub operand1: Operand,
    /// Comparison, bound to the operands' value type.
    pub operator: Operator,
    /// Right-hand side.
    pub operand2: Operand,
    /// Join to the previous clause. `None` only for the first clause.
    pub connector: Option<Connector>,
}

impl Expression {
    /// Creates a clause, checking that it is well-typed.
    ///
    /// # Errors
    /// Returns `IncompatibleOperandTypes` if the operands differ in type, or
    /// `UnsupportedOperandType` if the operator was built for another type.
    pub fn new(
        operand1: Operand,
        operator: Operator,
        operand2: Operand,
        connector: Option<Connector>,
    ) -> Result<Self> {
        if !operand1.compatible_with(&operand2) {
            return Err(Error::incompatible_operands(
                operand1.value_type(),
                operand2.value_type(),
            ));
        }
        if operator.value_type() != operand1.value_type() {
            return Err(Error::unsupported_operand_type(
                operator.phrase(),
                operand1.value_type(),
            ));
        }
        Ok(Self {
            operand1,
            operator,
            operand2,
            connector,
        })
    }

    /// Evaluates this clause alone, ignoring its connector.
    ///
    /// # Errors
    /// Returns `UnknownContextKey` if an operand references an unbound name.
    pub fn evaluate(&self, context: &ActionContext<'_>) -> Result<bool> {
        let left = self.operand1.get_value(context)?;
        let right = self.operand2.get_value(context)?;
        self.operator.apply(&left, &right)
    }

    /// Returns the context names this clause reads from.
    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.operand1
            .context_name()
            .into_iter()
            .chain(self.operand2.context_name())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(connector) = self.connector {
            write!(f, "{connector} ")?;
        }
        write!(f, "{} {} {}", self.operand1, self.operator, self.operand2)
    }
}

/// An immutable, shareable clause chain.
///
/// Cloning is cheap; every bound constraint produced from one template
/// shares the same clauses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    clauses: Arc<[Expression]>,
}

impl Predicate {
    /// Creates a predicate from an ordered clause chain.
    ///
    /// # Errors
    /// Returns `IncompletePredicate` if the chain is empty, or
    /// `PreconditionViolation` if the first clause has a connector or a later
    /// one lacks one.
    pub fn new(clauses: Vec<Expression>) -> Result<Self> {
        if clauses.is_empty() {
            return Err(Error::new(ErrorKind::IncompletePredicate));
        }
        for (index, clause) in clauses.iter().enumerate() {
            if clause.connector.is_some() != (index > 0) {
                return Err(Error::new(ErrorKind::PreconditionViolation(format!(
                    "clause {index} has a misplaced connector: {clause}"
                ))));
            }
        }
        Ok(Self {
            clauses: clauses.into(),
        })
    }

    /// Returns the clauses in source order.
    #[must_use]
    pub fn clauses(&self) -> &[Expression] {
        &self.clauses
    }

    /// Returns the number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Always false; a predicate has at least one clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates every clause and folds the results left to right.
    ///
    /// # Errors
    /// Propagates the first operand resolution error.
    pub fn test(&self, context: &ActionContext<'_>) -> Result<bool> {
        let mut result = false;
        for (index, clause) in self.clauses.iter().enumerate() {
            let value = clause.evaluate(context)?;
            result = match clause.connector {
                Some(connector) => connector.apply(result, value),
                None if index == 0 => value,
                None => {
                    return Err(Error::new(ErrorKind::PreconditionViolation(format!(
                        "clause {index} has no connector"
                    ))));
                }
            };
        }
        Ok(result)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
