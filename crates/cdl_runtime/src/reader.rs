//! Line-oriented rule loading.
//!
//! A rule source is an ordered sequence of lines, one statement per line.
//! Blank and comment lines are skipped per [`ReaderConfig`]; the first line
//! that fails to parse aborts the load with its line number attached.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use cdl_engine::RuleSet;
use cdl_foundation::{Error, ErrorContext, ErrorKind, Result};
use cdl_language::{ConstraintTemplate, parse_constraint};

use crate::config::ReaderConfig;

/// The bundled default rules: vertex, following, and swapping conflicts.
pub const DEFAULT_RULES: &str = include_str!("../rules/hospital.cdl");

/// Source name used for [`DEFAULT_RULES`] in diagnostics.
pub const DEFAULT_RULES_NAME: &str = "<default rules>";

/// Reads rule sources into parsed templates.
#[derive(Clone, Debug, Default)]
pub struct ConstraintReader {
    config: ReaderConfig,
}

impl ConstraintReader {
    /// Creates a reader with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parses every statement in `source`, in order.
    ///
    /// # Errors
    /// Returns the first failing line's error, with the configured source
    /// name and the 1-based line number as context.
    pub fn read_str(&self, source: &str) -> Result<Vec<ConstraintTemplate>> {
        let source_name = self.config.source_name.as_deref();
        let mut templates = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let number = index + 1;
            if self.config.skip_blank_lines && line.trim().is_empty() {
                debug!(line = number, "skipped blank line");
                continue;
            }
            if self.config.is_comment(line) {
                debug!(line = number, "skipped comment");
                continue;
            }
            let template = parse_constraint(line).map_err(|err| {
                let mut context = ErrorContext::new().with_line(number);
                if let Some(name) = source_name {
                    context = context.with_source(name);
                }
                err.with_context(context)
            })?;
            templates.push(template);
        }

        info!(
            source = source_name.unwrap_or("<string>"),
            rules = templates.len(),
            "loaded rules"
        );
        Ok(templates)
    }

    /// Reads and parses a rule file.
    ///
    /// The path is used as the source name unless one is configured.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`read_str`](Self::read_str).
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<ConstraintTemplate>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        if self.config.source_name.is_some() {
            self.read_str(&source)
        } else {
            let config = self
                .config
                .clone()
                .with_source_name(path.display().to_string());
            Self::with_config(config).read_str(&source)
        }
    }

    /// Parses `source` and partitions it into a rule set.
    ///
    /// # Errors
    /// See [`read_str`](Self::read_str).
    pub fn read_rule_set(&self, source: &str) -> Result<RuleSet> {
        Ok(RuleSet::from_templates(self.read_str(source)?))
    }

    /// Parses the bundled default rules.
    ///
    /// # Errors
    /// Only if the bundled rules fail to parse.
    pub fn default_rules() -> Result<Vec<ConstraintTemplate>> {
        let config = ReaderConfig::default().with_source_name(DEFAULT_RULES_NAME);
        Self::with_config(config).read_str(DEFAULT_RULES)
    }
}
