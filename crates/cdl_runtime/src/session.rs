//! Session state for the REPL.
//!
//! The session owns the loaded rules, in load order, and the configuration
//! used to read new rule files and validate joint actions against them.

use std::path::{Path, PathBuf};

use tracing::info;

use cdl_engine::{JointActionValidator, NoObstacles, RuleSet, ValidationReport, ValidatorConfig};
use cdl_foundation::{Action, Result};
use cdl_language::{ConstraintTemplate, parse_constraint};

use crate::config::ReaderConfig;
use crate::reader::ConstraintReader;

/// Loaded rules plus the settings that govern loading and validation.
#[derive(Clone, Debug)]
pub struct Session {
    /// Rules in the order they were added.
    rules: Vec<ConstraintTemplate>,

    /// Configuration for `:load` and startup files.
    reader_config: ReaderConfig,

    /// Configuration for `:check`.
    validator_config: ValidatorConfig,

    /// Directory relative rule paths are resolved against.
    load_path: PathBuf,
}

impl Session {
    /// Creates a session with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            reader_config: ReaderConfig::default(),
            validator_config: ValidatorConfig::default(),
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a session preloaded with the bundled default rules.
    ///
    /// # Errors
    /// Only if the bundled rules fail to parse.
    pub fn with_default_rules() -> Result<Self> {
        let mut session = Self::new();
        session.rules = ConstraintReader::default_rules()?;
        Ok(session)
    }

    /// Builder method to set the reader configuration.
    #[must_use]
    pub fn with_reader_config(mut self, config: ReaderConfig) -> Self {
        self.reader_config = config;
        self
    }

    /// Builder method to set the validator configuration.
    #[must_use]
    pub fn with_validator_config(mut self, config: ValidatorConfig) -> Self {
        self.validator_config = config;
        self
    }

    /// Returns the loaded rules, in load order.
    #[must_use]
    pub fn rules(&self) -> &[ConstraintTemplate] {
        &self.rules
    }

    /// Returns the rule at `index`, if any.
    #[must_use]
    pub fn rule(&self, index: usize) -> Option<&ConstraintTemplate> {
        self.rules.get(index)
    }

    /// Returns the number of loaded rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Removes every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Returns the directory relative paths are resolved against.
    #[must_use]
    pub fn load_path(&self) -> &Path {
        &self.load_path
    }

    /// Sets the directory relative paths are resolved against.
    pub fn set_load_path(&mut self, path: impl Into<PathBuf>) {
        self.load_path = path.into();
    }

    /// Returns the validator configuration.
    #[must_use]
    pub fn validator_config(&self) -> &ValidatorConfig {
        &self.validator_config
    }

    /// Parses one statement and appends it. Returns the new rule's index.
    ///
    /// # Errors
    /// Returns the parse error; the session is unchanged.
    pub fn add_rule(&mut self, statement: &str) -> Result<usize> {
        let template = parse_constraint(statement)?;
        self.rules.push(template);
        Ok(self.rules.len() - 1)
    }

    /// Loads a rule file and appends its rules. Returns how many were added.
    ///
    /// Relative paths are resolved against the load path. A file that fails
    /// to parse adds nothing.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, or the first parse error.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = self.resolve(path.as_ref());
        let templates = ConstraintReader::with_config(self.reader_config.clone()).read_path(&path)?;
        let count = templates.len();
        self.rules.extend(templates);
        info!(path = %path.display(), count, "loaded rule file");
        Ok(count)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.load_path.join(path)
        }
    }

    /// Partitions the loaded rules.
    #[must_use]
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_templates(self.rules.iter().cloned())
    }

    /// Builds a validator over the loaded rules.
    #[must_use]
    pub fn validator(&self) -> JointActionValidator {
        JointActionValidator::with_config(self.rule_set(), self.validator_config.clone())
    }

    /// Validates one joint action on an obstacle-free grid.
    ///
    /// # Errors
    /// Propagates rule evaluation errors per the validator configuration.
    pub fn check(&self, actions: &[Action]) -> Result<ValidationReport> {
        self.validator().validate(actions, &NoObstacles)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
