//! Binding of rule variables to concrete actions.
//!
//! An [`ActionContext`] is created fresh for each evaluation, borrows the
//! actions it binds, and is discarded afterwards. It exposes every bound
//! action's fields both through direct `(name, Field)` lookup and through
//! the dotted `"<name>.<field>"` key form used by rule text.

use crate::action::{Action, Field};
use crate::error::Error;
use crate::value::Value;
use crate::Result;

/// A short-lived mapping from variable names to actions.
///
/// Rules bind at most two names, so bindings live in a small vector and are
/// looked up linearly.
#[derive(Clone, Debug, Default)]
pub struct ActionContext<'a> {
    bindings: Vec<(String, &'a Action)>,
}

impl<'a> ActionContext<'a> {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from `(name, action)` pairs.
    #[must_use]
    pub fn with_bindings<N: Into<String>>(entries: impl IntoIterator<Item = (N, &'a Action)>) -> Self {
        let mut context = Self::new();
        for (name, action) in entries {
            context.bind(name, action);
        }
        context
    }

    /// Binds `name` to `action`, replacing any earlier binding of `name`.
    pub fn bind(&mut self, name: impl Into<String>, action: &'a Action) -> &mut Self {
        let name = name.into();
        if let Some(slot) = self.bindings.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = action;
        } else {
            self.bindings.push((name, action));
        }
        self
    }

    /// Returns the action bound to `name`, if any.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&'a Action> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, action)| *action)
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.action(name).is_some()
    }

    /// Returns the bound names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Reads `field` of the action bound to `name`.
    ///
    /// # Errors
    /// Returns `UnknownContextKey` if `name` is not bound.
    pub fn resolve(&self, name: &str, field: Field) -> Result<Value> {
        self.action(name)
            .map(|action| action.field(field))
            .ok_or_else(|| Error::unknown_context_key(format!("{name}.{field}")))
    }

    /// Looks up a dotted key such as `"a.dest"` or `"b.edge"`.
    ///
    /// # Errors
    /// Returns `UnknownContextKey` if the key is malformed, the field is not
    /// an action field, or the name is not bound.
    pub fn get(&self, key: &str) -> Result<Value> {
        let (name, field) = key
            .split_once('.')
            .and_then(|(name, field)| Field::parse(field).map(|f| (name, f)))
            .ok_or_else(|| Error::unknown_context_key(key))?;
        self.resolve(name, field)
    }
}
