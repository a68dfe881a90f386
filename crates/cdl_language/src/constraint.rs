//! Compiled rules: unbound templates and bound constraints.

use std::fmt;

use cdl_foundation::{Action, ActionContext, Error, Result};

use crate::builder::ContextSlot;
use crate::expression::Predicate;

/// A predicate paired with the actions it reads.
///
/// Created per evaluation and discarded afterwards; the predicate itself is
/// shared with the template it came from.
#[derive(Clone, Debug)]
pub struct Constraint<'a> {
    context: ActionContext<'a>,
    predicate: Predicate,
}

impl<'a> Constraint<'a> {
    /// Pairs a binding context with a predicate.
    #[must_use]
    pub fn new(context: ActionContext<'a>, predicate: Predicate) -> Self {
        Self { context, predicate }
    }

    /// Returns the binding context.
    #[must_use]
    pub fn context(&self) -> &ActionContext<'a> {
        &self.context
    }

    /// Returns the predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns true if the rule fires for the bound actions.
    ///
    /// Every call re-walks the whole clause chain.
    ///
    /// # Errors
    /// Returns `UnknownContextKey` if a clause reads an unbound name. This
    /// cannot happen for constraints produced by a validated builder or a
    /// template.
    pub fn evaluate(&self) -> Result<bool> {
        self.predicate.test(&self.context)
    }
}

/// A parsed rule not yet bound to any action.
///
/// Templates are immutable and cheap to clone, so one parsed rule set can be
/// shared by any number of concurrent evaluations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintTemplate {
    requesting: String,
    restricting: Option<String>,
    predicate: Predicate,
}

impl ConstraintTemplate {
    /// Creates a template from parts without checking that the predicate
    /// only references `requesting` and `restricting`.
    ///
    /// Prefer [`parse_constraint`](crate::parse_constraint) or
    /// [`ConstraintBuilder::into_template`](crate::ConstraintBuilder::into_template),
    /// which reject undeclared references up front. An unchecked template
    /// that reads an unbound name fails with `UnknownContextKey` when
    /// evaluated.
    #[must_use]
    pub fn new(requesting: String, restricting: Option<String>, predicate: Predicate) -> Self {
        Self {
            requesting,
            restricting,
            predicate,
        }
    }

    /// Returns the declared name of the requesting action.
    #[must_use]
    pub fn requesting_name(&self) -> &str {
        &self.requesting
    }

    /// Returns the declared name of the restricting action, if any.
    #[must_use]
    pub fn restricting_name(&self) -> Option<&str> {
        self.restricting.as_deref()
    }

    /// Returns the compiled predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns true for an applicability rule (`ACTION a IS BLOCKED IF ...`),
    /// false for a conflict rule (`... BY ACTION b IF ...`).
    #[must_use]
    pub fn is_single_context(&self) -> bool {
        self.restricting.is_none()
    }

    /// Binds the template to concrete actions.
    ///
    /// A `secondary` action passed to a single-context rule is ignored.
    ///
    /// # Errors
    /// Returns `MissingBinding` if this is a conflict rule and `secondary` is
    /// `None`.
    pub fn bind<'a>(
        &self,
        primary: &'a Action,
        secondary: Option<&'a Action>,
    ) -> Result<Constraint<'a>> {
        let mut context = ActionContext::new();
        context.bind(self.requesting.as_str(), primary);
        if let Some(name) = &self.restricting {
            let secondary =
                secondary.ok_or_else(|| Error::missing_binding(ContextSlot::Restricting.role()))?;
            context.bind(name.as_str(), secondary);
        }
        Ok(Constraint::new(context, self.predicate.clone()))
    }

    /// Binds and evaluates in one step.
    ///
    /// # Errors
    /// See [`bind`](Self::bind) and [`Constraint::evaluate`].
    pub fn bind_and_evaluate(&self, primary: &Action, secondary: Option<&Action>) -> Result<bool> {
        self.bind(primary, secondary)?.evaluate()
    }
}

impl fmt::Display for ConstraintTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACTION {} IS BLOCKED", self.requesting)?;
        if let Some(restricting) = &self.restricting {
            write!(f, " BY ACTION {restricting}")?;
        }
        write!(f, " IF {}", self.predicate)
    }
}
