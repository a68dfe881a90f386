//! Configuration for rule loading.

/// Configuration for [`ConstraintReader`](crate::ConstraintReader).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Whether blank lines are skipped rather than rejected.
    pub skip_blank_lines: bool,

    /// Lines starting with this prefix (after leading whitespace) are skipped.
    pub comment_prefix: Option<String>,

    /// Name reported in error context, e.g. a file path.
    pub source_name: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
            comment_prefix: Some("#".to_string()),
            source_name: None,
        }
    }
}

impl ReaderConfig {
    /// Creates a configuration that accepts statements only: no comments.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            comment_prefix: None,
            ..Self::default()
        }
    }

    /// Builder method to skip or reject blank lines.
    #[must_use]
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Builder method to set the comment prefix.
    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.comment_prefix = prefix.map(Into::into);
        self
    }

    /// Builder method to set the source name.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Returns true if `line` is a comment under this configuration.
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        self.comment_prefix
            .as_deref()
            .is_some_and(|prefix| !prefix.is_empty() && line.trim_start().starts_with(prefix))
    }
}
