//! Topic channel: append-only sequence (message history).
//!
//! Values are only ever pushed at the end. Once a value sits at position `i` it is never
//! rewritten or reordered, so the read side is a plain slice (`Deref<Target = [T]>`) and
//! there is no mutable access.

use std::fmt::Debug;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::{Channel, MergeRule};

/// Append-only list channel.
///
/// ```rust
/// use weft::channels::{Channel, Topic};
///
/// let mut topic: Topic<String> = Topic::new();
/// topic.merge(vec!["message1".to_string()]);
/// topic.merge(vec!["message2".to_string(), "message3".to_string()]);
/// assert_eq!(topic.len(), 3);
/// assert_eq!(topic.last().map(String::as_str), Some("message3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic<T> {
    values: Vec<T>,
}

impl<T> Topic<T> {
    /// Creates an empty topic.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Values appended after position `from` (empty when `from >= len`).
    pub fn since(&self, from: usize) -> &[T] {
        self.values.get(from..).unwrap_or(&[])
    }
}

impl<T: Clone> Topic<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }
}

impl<T> Default for Topic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Topic<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T> FromIterator<T> for Topic<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for Topic<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> Channel for Topic<T>
where
    T: Send + Sync + Debug,
{
    type Update = Vec<T>;

    fn merge(&mut self, update: Vec<T>) {
        self.values.extend(update);
    }

    fn rule(&self) -> MergeRule {
        MergeRule::Append
    }
}
