//! Channels: per-field merge rules for graph state.
//!
//! A step returns a delta (`GraphState::Update`), not a whole state. The runner folds the
//! delta into the current state with [`GraphState::merge`]; each field declares how it
//! merges by its channel type:
//!
//! - [`LastValue`]: overwrite. Update is `Option<T>`; `None` leaves the field alone.
//! - [`Topic`]: append. Update is `Vec<T>`; values are pushed after the existing ones and
//!   never rewritten (message history).
//!
//! The field type carries the rule, so merging needs no schema or introspection:
//!
//! ```rust
//! use weft::channels::{Channel, GraphState, LastValue, Topic};
//!
//! #[derive(Clone, Debug, Default)]
//! struct MyState {
//!     messages: Topic<String>,
//!     label: LastValue<String>,
//! }
//!
//! #[derive(Debug, Default)]
//! struct MyUpdate {
//!     messages: Vec<String>,
//!     label: Option<String>,
//! }
//!
//! impl GraphState for MyState {
//!     type Update = MyUpdate;
//!     fn merge(&mut self, update: MyUpdate) {
//!         self.messages.merge(update.messages);
//!         self.label.merge(update.label);
//!     }
//! }
//!
//! let mut state = MyState::default();
//! state.merge(MyUpdate { messages: vec!["hi".into()], label: Some("a".into()) });
//! state.merge(MyUpdate { messages: vec!["there".into()], label: None });
//! assert_eq!(state.messages.as_slice(), ["hi".to_string(), "there".to_string()]);
//! assert_eq!(state.label.get().map(String::as_str), Some("a"));
//! ```

mod last_value;
mod topic;
mod updater;

pub use last_value::LastValue;
pub use topic::Topic;
pub use updater::GraphState;

use std::fmt::Debug;

/// How a field combines an update with its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// The update replaces the current value.
    Overwrite,
    /// The update is appended after the current values.
    Append,
}

/// A state field with a declared merge rule.
pub trait Channel: Send + Sync + Debug {
    /// Delta type accepted by [`Channel::merge`].
    type Update;

    /// Folds one update into the field.
    fn merge(&mut self, update: Self::Update);

    /// The rule this channel applies.
    fn rule(&self) -> MergeRule;
}
