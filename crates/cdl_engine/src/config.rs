//! Configuration for joint-action validation.

/// What to do when a rule cannot be bound or evaluated for an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RebindFailurePolicy {
    /// Propagate the error and abort the step.
    #[default]
    Abort,
    /// Log a warning and treat the rule as not firing.
    TreatAsNonBlocking,
}

/// Configuration for [`JointActionValidator`](crate::JointActionValidator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Policy for rules that fail to bind or evaluate.
    pub on_rebind_failure: RebindFailurePolicy,

    /// Whether a moving action also needs a free destination.
    pub check_occupancy: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            on_rebind_failure: RebindFailurePolicy::Abort,
            check_occupancy: true,
        }
    }
}

impl ValidatorConfig {
    /// Creates a configuration that evaluates rules only, ignoring the grid.
    #[must_use]
    pub fn rules_only() -> Self {
        Self {
            check_occupancy: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that never aborts on a failing rule.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            on_rebind_failure: RebindFailurePolicy::TreatAsNonBlocking,
            ..Self::default()
        }
    }

    /// Builder method to set the rebind failure policy.
    #[must_use]
    pub fn with_rebind_failure_policy(mut self, policy: RebindFailurePolicy) -> Self {
        self.on_rebind_failure = policy;
        self
    }

    /// Builder method to enable/disable occupancy checking.
    #[must_use]
    pub fn with_check_occupancy(mut self, check: bool) -> Self {
        self.check_occupancy = check;
        self
    }
}
