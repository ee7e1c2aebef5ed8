//! LastValue channel: overwrite merge rule.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::{Channel, MergeRule};

/// Keeps only the last written value.
///
/// Default rule for plain state fields. An update of `Some(v)` replaces the value; `None`
/// means "this step did not touch the field".
///
/// ```rust
/// use weft::channels::{Channel, LastValue};
///
/// let mut channel = LastValue::new();
/// channel.merge(Some(1));
/// channel.merge(None);
/// channel.merge(Some(3));
/// assert_eq!(channel.get(), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastValue<T> {
    value: Option<T>,
}

impl<T> LastValue<T> {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Creates a channel holding `value`.
    pub fn with_value(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Current value, if any step (or the caller) has set one.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for LastValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for LastValue<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T> Channel for LastValue<T>
where
    T: Send + Sync + Debug,
{
    type Update = Option<T>;

    fn merge(&mut self, update: Option<T>) {
        if let Some(v) = update {
            self.value = Some(v);
        }
    }

    fn rule(&self) -> MergeRule {
        MergeRule::Overwrite
    }
}
