//! Parsed rules, partitioned by how many actions they read.

use tracing::{debug, trace};

use cdl_foundation::{Action, Result};
use cdl_language::ConstraintTemplate;

/// An ordered rule set split into applicability and conflict rules.
///
/// Applicability rules (`ACTION a IS BLOCKED IF ...`) judge one action in
/// isolation. Conflict rules (`ACTION a IS BLOCKED BY ACTION b IF ...`) judge
/// an ordered pair of simultaneous actions. Both lists keep source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    applicability: Vec<ConstraintTemplate>,
    conflict: Vec<ConstraintTemplate>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set from templates in source order.
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = ConstraintTemplate>) -> Self {
        let mut rules = Self::new();
        rules.extend(templates);
        debug!(
            applicability = rules.applicability.len(),
            conflict = rules.conflict.len(),
            "partitioned rule set"
        );
        rules
    }

    /// Adds one rule to the matching partition.
    pub fn push(&mut self, template: ConstraintTemplate) {
        if template.is_single_context() {
            self.applicability.push(template);
        } else {
            self.conflict.push(template);
        }
    }

    /// Returns the single-context rules.
    #[must_use]
    pub fn applicability_rules(&self) -> &[ConstraintTemplate] {
        &self.applicability
    }

    /// Returns the double-context rules.
    #[must_use]
    pub fn conflict_rules(&self) -> &[ConstraintTemplate] {
        &self.conflict
    }

    /// Returns the total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applicability.len() + self.conflict.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all rules, applicability rules first.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintTemplate> {
        self.applicability.iter().chain(&self.conflict)
    }

    /// Returns the first applicability rule that fires for `action`.
    ///
    /// # Errors
    /// Propagates the first rule evaluation error.
    pub fn blocking_rule(&self, action: &Action) -> Result<Option<&ConstraintTemplate>> {
        for rule in &self.applicability {
            if rule.bind_and_evaluate(action, None)? {
                trace!(rule = %rule, action = %action, "applicability rule fired");
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Returns true if any applicability rule fires for `action`.
    ///
    /// # Errors
    /// Propagates the first rule evaluation error.
    pub fn blocks(&self, action: &Action) -> Result<bool> {
        Ok(self.blocking_rule(action)?.is_some())
    }

    /// Returns the first conflict rule that fires with `requesting` bound to
    /// the rule's first name and `restricting` to its second.
    ///
    /// # Errors
    /// Propagates the first rule evaluation error.
    pub fn conflicting_rule(
        &self,
        requesting: &Action,
        restricting: &Action,
    ) -> Result<Option<&ConstraintTemplate>> {
        for rule in &self.conflict {
            if rule.bind_and_evaluate(requesting, Some(restricting))? {
                trace!(rule = %rule, requesting = %requesting, restricting = %restricting, "conflict rule fired");
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Returns true if any conflict rule fires for the ordered pair.
    ///
    /// # Errors
    /// Propagates the first rule evaluation error.
    pub fn conflicts(&self, requesting: &Action, restricting: &Action) -> Result<bool> {
        Ok(self.conflicting_rule(requesting, restricting)?.is_some())
    }
}

impl Extend<ConstraintTemplate> for RuleSet {
    fn extend<I: IntoIterator<Item = ConstraintTemplate>>(&mut self, iter: I) {
        for template in iter {
            self.push(template);
        }
    }
}

impl FromIterator<ConstraintTemplate> for RuleSet {
    fn from_iter<I: IntoIterator<Item = ConstraintTemplate>>(iter: I) -> Self {
        Self::from_templates(iter)
    }
}
