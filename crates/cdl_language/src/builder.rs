//! Token-driven construction of constraints.
//!
//! [`ConstraintBuilder`] is fed, in order, the context names declared by a
//! statement and the tokens of its predicate. It type-checks each clause as
//! it closes, so an ill-typed or incomplete rule is rejected before any
//! action is ever bound. The finished builder either becomes a reusable
//! [`ConstraintTemplate`] or, once actions are bound, a [`Constraint`].

use std::fmt;

use tracing::trace;

use cdl_foundation::{Action, ActionContext, Error, ErrorKind, Result};

use crate::connector::Connector;
use crate::constraint::{Constraint, ConstraintTemplate};
use crate::expression::{Expression, Predicate};
use crate::operand::Operand;
use crate::operator::Operator;
use crate::state::PredicateState;

/// One of the two context slots a rule can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextSlot {
    /// `entry1`: the action being checked.
    Requesting,
    /// `entry2`: the other action in a conflict rule.
    Restricting,
}

impl ContextSlot {
    /// Returns the slot for a mapping key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "entry1" => Some(Self::Requesting),
            "entry2" => Some(Self::Restricting),
            _ => None,
        }
    }

    /// Returns the mapping key, `entry1` or `entry2`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Requesting => "entry1",
            Self::Restricting => "entry2",
        }
    }

    /// Returns the role name used in binding errors.
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::Requesting => "requesting",
            Self::Restricting => "restricting",
        }
    }
}

impl fmt::Display for ContextSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Builds a constraint from context declarations and predicate tokens.
///
/// A builder belongs to one statement. Feed it with
/// [`with_context_mapping`](Self::with_context_mapping) and
/// [`with_predicate_token`](Self::with_predicate_token), then either turn it
/// into a template or bind actions and call [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct ConstraintBuilder {
    state: PredicateState,
    expressions: Vec<Expression>,
    operand1: Option<Operand>,
    operator: Option<Operator>,
    connector: Option<Connector>,
    requesting_name: Option<String>,
    restricting_name: Option<String>,
    requesting: Option<Action>,
    restricting: Option<Action>,
}

impl ConstraintBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state of the predicate machine.
    #[must_use]
    pub const fn state(&self) -> PredicateState {
        self.state
    }

    /// Returns the clauses closed so far.
    #[must_use]
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Returns the name declared for `slot`, if any.
    #[must_use]
    pub fn context_name(&self, slot: ContextSlot) -> Option<&str> {
        match slot {
            ContextSlot::Requesting => self.requesting_name.as_deref(),
            ContextSlot::Restricting => self.restricting_name.as_deref(),
        }
    }

    /// Associates a declared context name with a slot key.
    ///
    /// # Errors
    /// Returns `InvalidContextMapping` if the key is not `entry1`/`entry2`,
    /// the key is already mapped, the name is blank, or the name is already
    /// mapped to the other slot.
    pub fn with_context_mapping(&mut self, key: &str, name: &str) -> Result<&mut Self> {
        let invalid = |reason| {
            Error::new(ErrorKind::InvalidContextMapping {
                key: key.to_string(),
                name: name.to_string(),
                reason,
            })
        };

        let slot = ContextSlot::from_key(key).ok_or_else(|| invalid("unknown key"))?;
        if self.context_name(slot).is_some() {
            return Err(invalid("key already mapped"));
        }
        if name.trim().is_empty() {
            return Err(invalid("blank name"));
        }
        if self.requesting_name.as_deref() == Some(name)
            || self.restricting_name.as_deref() == Some(name)
        {
            return Err(invalid("name already mapped"));
        }

        trace!(slot = key, name, "context mapped");
        let name = Some(name.to_string());
        match slot {
            ContextSlot::Requesting => self.requesting_name = name,
            ContextSlot::Restricting => self.restricting_name = name,
        }
        Ok(self)
    }

    /// Declares the requesting (`entry1`) context name.
    ///
    /// # Errors
    /// See [`with_context_mapping`](Self::with_context_mapping).
    pub fn with_requesting_context_name(&mut self, name: &str) -> Result<&mut Self> {
        self.with_context_mapping(ContextSlot::Requesting.key(), name)
    }

    /// Declares the restricting (`entry2`) context name.
    ///
    /// # Errors
    /// See [`with_context_mapping`](Self::with_context_mapping).
    pub fn with_restricting_context_name(&mut self, name: &str) -> Result<&mut Self> {
        self.with_context_mapping(ContextSlot::Restricting.key(), name)
    }

    /// Binds the action checked by the rule.
    pub fn with_requesting_context(&mut self, action: Action) -> &mut Self {
        self.requesting = Some(action);
        self
    }

    /// Binds the other action of a conflict rule.
    pub fn with_restricting_context(&mut self, action: Action) -> &mut Self {
        self.restricting = Some(action);
        self
    }

    /// Feeds the next predicate token and advances the state machine.
    ///
    /// # Errors
    /// Returns `EmptyToken` for a blank token, `InvalidOperand` or
    /// `InvalidConnector` if the token does not parse for the current state,
    /// `UnknownOperator`/`UnsupportedOperandType` for an operator that does
    /// not exist or cannot compare the left operand's type, and
    /// `IncompatibleOperandTypes` when the right operand's type differs from
    /// the left's.
    pub fn with_predicate_token(&mut self, token: &str) -> Result<&mut Self> {
        if token.trim().is_empty() {
            return Err(Error::new(ErrorKind::EmptyToken));
        }

        match self.state {
            PredicateState::Operand1 => {
                self.operand1 = Some(Operand::parse(token)?);
            }
            PredicateState::Operator => {
                let operand1 = self.operand1.as_ref().ok_or_else(|| self.unexpected(token))?;
                self.operator = Some(Operator::parse(token, operand1.value_type())?);
            }
            PredicateState::Operand2 => {
                let operand2 = Operand::parse(token)?;
                let (Some(operand1), Some(operator)) = (&self.operand1, &self.operator) else {
                    return Err(self.unexpected(token));
                };
                // A rejected right operand leaves the clause open for a retry.
                let expression =
                    Expression::new(operand1.clone(), *operator, operand2, self.connector)?;
                self.operand1 = None;
                self.operator = None;
                self.connector = None;
                self.expressions.push(expression);
            }
            PredicateState::Connector => {
                self.connector = Some(Connector::parse(token)?);
            }
        }

        let next = self.state.next();
        trace!(token, from = %self.state, to = %next, "predicate token");
        self.state = next;
        Ok(self)
    }

    fn unexpected(&self, token: &str) -> Error {
        Error::new(ErrorKind::UnexpectedToken {
            state: self.state.name(),
            token: token.to_string(),
        })
    }

    /// Returns true if only the requesting context was declared.
    ///
    /// Classification looks at the declared context names, not the bound
    /// actions, so it works on a builder that has parsed a rule but has no
    /// actions yet.
    ///
    /// # Errors
    /// Returns `PreconditionViolation` if no requesting context name has been
    /// declared yet.
    pub fn is_single_context_constraint(&self) -> Result<bool> {
        if self.requesting_name.is_none() {
            return Err(Error::new(ErrorKind::PreconditionViolation(
                "requesting context must be declared before classifying a constraint".to_string(),
            )));
        }
        Ok(self.restricting_name.is_none())
    }

    /// Checks everything except the action bindings: the predicate is
    /// complete, a requesting name is declared, and every reference names a
    /// declared context.
    fn validate_declarations(&self) -> Result<()> {
        if !self.state.is_terminal() || self.expressions.is_empty() || self.connector.is_some() {
            return Err(Error::new(ErrorKind::IncompletePredicate));
        }
        if self.requesting_name.is_none() {
            return Err(Error::missing_binding(ContextSlot::Requesting.role()));
        }
        for expression in &self.expressions {
            for name in expression.context_names() {
                let declared = self.requesting_name.as_deref() == Some(name)
                    || self.restricting_name.as_deref() == Some(name);
                if !declared {
                    return Err(Error::missing_context_entry(name));
                }
            }
        }
        Ok(())
    }

    /// Checks that the builder can produce a constraint.
    ///
    /// # Errors
    /// Returns `IncompletePredicate` if the predicate is empty or stopped
    /// mid-clause, `MissingBinding` if a declared context has no action bound,
    /// and `MissingContextEntry` if a clause references an undeclared name.
    pub fn validate(&self) -> Result<()> {
        self.validate_declarations()?;
        if self.requesting.is_none() {
            return Err(Error::missing_binding(ContextSlot::Requesting.role()));
        }
        if self.restricting_name.is_some() && self.restricting.is_none() {
            return Err(Error::missing_binding(ContextSlot::Restricting.role()));
        }
        Ok(())
    }

    /// Returns the predicate composed from the closed clauses.
    ///
    /// # Errors
    /// Returns `IncompletePredicate` if no clause has been closed.
    pub fn predicate(&self) -> Result<Predicate> {
        Predicate::new(self.expressions.clone())
    }

    /// Validates and produces a constraint over the bound actions.
    ///
    /// # Errors
    /// See [`validate`](Self::validate).
    pub fn build(&self) -> Result<Constraint<'_>> {
        self.validate()?;
        let mut context = ActionContext::new();
        if let (Some(name), Some(action)) = (&self.requesting_name, &self.requesting) {
            context.bind(name.as_str(), action);
        }
        if let (Some(name), Some(action)) = (&self.restricting_name, &self.restricting) {
            context.bind(name.as_str(), action);
        }
        Ok(Constraint::new(context, self.predicate()?))
    }

    /// Validates the declarations and produces an unbound, reusable template.
    ///
    /// Bound actions, if any, are discarded.
    ///
    /// # Errors
    /// Returns `IncompletePredicate`, `MissingBinding` (no requesting name),
    /// or `MissingContextEntry` as for [`validate`](Self::validate).
    pub fn into_template(self) -> Result<ConstraintTemplate> {
        self.validate_declarations()?;
        let predicate = self.predicate()?;
        let requesting = self
            .requesting_name
            .ok_or_else(|| Error::missing_binding(ContextSlot::Requesting.role()))?;
        Ok(ConstraintTemplate::new(
            requesting,
            self.restricting_name,
            predicate,
        ))
    }
}
