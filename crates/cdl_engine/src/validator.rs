//! Per-step validation of joint actions.
//!
//! An action in a joint action is applicable iff
//! - it stays put, or occupancy checking is off, or its destination is free;
//! - no applicability rule blocks it;
//! - no conflict rule fires between it and another action of the step.
//!
//! Each unordered pair is checked once, with the later action requesting and
//! the earlier one restricting. A conflict marks both actions.

use tracing::{debug, trace, warn};

use cdl_foundation::{Action, Result};
use cdl_language::ConstraintTemplate;

use crate::config::{RebindFailurePolicy, ValidatorConfig};
use crate::occupancy::Occupancy;
use crate::rule_set::RuleSet;

/// Per-action outcome of validating one joint action.
///
/// All vectors are indexed by position in the joint action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Final verdict per action.
    pub applicable: Vec<bool>,
    /// An applicability rule fired.
    pub blocked: Vec<bool>,
    /// A conflict rule fired with another action.
    pub conflicting: Vec<bool>,
    /// The action moves into an occupied cell.
    pub occupied: Vec<bool>,
}

impl ValidationReport {
    fn with_len(len: usize) -> Self {
        Self {
            applicable: vec![false; len],
            blocked: vec![false; len],
            conflicting: vec![false; len],
            occupied: vec![false; len],
        }
    }

    /// Returns the number of actions validated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applicable.len()
    }

    /// Returns true if the joint action was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applicable.is_empty()
    }

    /// Returns true if every action is applicable.
    #[must_use]
    pub fn all_applicable(&self) -> bool {
        self.applicable.iter().all(|&ok| ok)
    }
}

/// Validates joint actions against a rule set.
#[derive(Clone, Debug, Default)]
pub struct JointActionValidator {
    rules: RuleSet,
    config: ValidatorConfig,
}

impl JointActionValidator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self::with_config(rules, ValidatorConfig::default())
    }

    /// Creates a validator with an explicit configuration.
    #[must_use]
    pub fn with_config(rules: RuleSet, config: ValidatorConfig) -> Self {
        Self { rules, config }
    }

    /// Returns the rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns, per action, whether it may be executed this step.
    ///
    /// # Errors
    /// Under [`RebindFailurePolicy::Abort`], returns the first rule that
    /// fails to bind or evaluate.
    pub fn applicable(&self, actions: &[Action], occupancy: &impl Occupancy) -> Result<Vec<bool>> {
        Ok(self.validate(actions, occupancy)?.applicable)
    }

    /// Validates a joint action and reports why each action was rejected.
    ///
    /// # Errors
    /// See [`applicable`](Self::applicable).
    pub fn validate(&self, actions: &[Action], occupancy: &impl Occupancy) -> Result<ValidationReport> {
        let mut report = ValidationReport::with_len(actions.len());

        for (i, action) in actions.iter().enumerate() {
            report.occupied[i] = self.config.check_occupancy
                && action.is_moving()
                && !occupancy.is_free(action.destination);
            report.blocked[i] = self.is_blocked(action)?;

            for (j, other) in actions.iter().enumerate().take(i) {
                if self.is_conflicting(action, other)? {
                    report.conflicting[i] = true;
                    report.conflicting[j] = true;
                }
            }
        }

        for i in 0..actions.len() {
            report.applicable[i] = !(report.occupied[i] || report.blocked[i] || report.conflicting[i]);
        }

        debug!(
            actions = actions.len(),
            applicable = report.applicable.iter().filter(|&&ok| ok).count(),
            "validated joint action"
        );
        Ok(report)
    }

    fn is_blocked(&self, action: &Action) -> Result<bool> {
        for rule in self.rules.applicability_rules() {
            if self.fires(rule, action, None)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn is_conflicting(&self, requesting: &Action, restricting: &Action) -> Result<bool> {
        for rule in self.rules.conflict_rules() {
            if self.fires(rule, requesting, Some(restricting))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn fires(
        &self,
        rule: &ConstraintTemplate,
        primary: &Action,
        secondary: Option<&Action>,
    ) -> Result<bool> {
        match rule.bind_and_evaluate(primary, secondary) {
            Ok(fired) => {
                if fired {
                    trace!(rule = %rule, action = %primary, "rule fired");
                }
                Ok(fired)
            }
            Err(error) => match self.config.on_rebind_failure {
                RebindFailurePolicy::Abort => Err(error),
                RebindFailurePolicy::TreatAsNonBlocking => {
                    warn!(rule = %rule, action = %primary, %error, "rule failed; treating as non-blocking");
                    Ok(false)
                }
            },
        }
    }
}
