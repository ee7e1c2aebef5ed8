//! Graph state trait: how a step's delta is merged into the running state.

use std::fmt::Debug;

/// State that flows through a [`StateGraph`](crate::graph::StateGraph).
///
/// Steps return `Self::Update` (a partial delta); the runner calls [`GraphState::merge`]
/// after every step. Implementations merge field by field, usually by delegating to the
/// field's [`Channel`](super::Channel) (`LastValue` overwrites, `Topic` appends).
///
/// States that cross a persistence boundary (see
/// [`ConversationRunner`](crate::memory::ConversationRunner)) also derive serde traits.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Partial update produced by one step.
    type Update: Send + Debug + 'static;

    /// Folds `update` into `self`.
    fn merge(&mut self, update: Self::Update);
}
