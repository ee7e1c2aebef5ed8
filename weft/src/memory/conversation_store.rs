//! Conversation store: message history keyed by conversation id.
//!
//! Histories are strictly isolated per id and append-only. Nothing is ever evicted;
//! an entry lives as long as the store.

use std::fmt::Debug;

use async_trait::async_trait;
use dashmap::DashMap;

/// Message history keyed by conversation id.
///
/// Operations are infallible: an unseen id simply has an empty history.
///
/// **Interaction**: Used as `Arc<dyn ConversationStore<M>>` by `ConversationRunner`.
#[async_trait]
pub trait ConversationStore<M>: Send + Sync
where
    M: Clone + Send + Sync + 'static,
{
    /// Full history for `id` in append order; empty if `id` was never written.
    async fn load(&self, id: &str) -> Vec<M>;

    /// Appends `messages` after the existing history of `id`, creating it on first write.
    async fn append(&self, id: &str, messages: Vec<M>);

    /// Read-only view of the history. Same result as [`load`](Self::load).
    async fn snapshot(&self, id: &str) -> Vec<M> {
        self.load(id).await
    }

    /// Ids with at least one stored message, sorted.
    async fn conversation_ids(&self) -> Vec<String>;
}

/// In-memory store backed by a `DashMap`. Not persistent; for dev, tests and demos.
///
/// Each `append` holds the write lock of its id's shard for the whole extend, so two
/// concurrent appends to one id never interleave or lose messages.
pub struct InMemoryConversationStore<M> {
    entries: DashMap<String, Vec<M>>,
}

impl<M> InMemoryConversationStore<M> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of conversations with stored messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for InMemoryConversationStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Debug for InMemoryConversationStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryConversationStore")
            .field("conversations", &self.entries.len())
            .finish()
    }
}

#[async_trait]
impl<M> ConversationStore<M> for InMemoryConversationStore<M>
where
    M: Clone + Send + Sync + 'static,
{
    async fn load(&self, id: &str) -> Vec<M> {
        self.entries
            .get(id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Appending nothing is a no-op and does not create an entry.
    async fn append(&self, id: &str, messages: Vec<M>) {
        if messages.is_empty() {
            return;
        }
        let count = messages.len();
        let mut entry = self.entries.entry(id.to_string()).or_default();
        entry.extend(messages);
        tracing::debug!(
            conversation_id = id,
            appended = count,
            total = entry.len(),
            "conversation appended"
        );
    }

    async fn conversation_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_unseen_id_is_empty() {
        let store = InMemoryConversationStore::<String>::new();
        assert!(store.load("nobody").await.is_empty());
        assert!(store.is_empty());
    }

    /// **Scenario**: append concatenates in order; snapshot matches load.
    #[tokio::test]
    async fn append_preserves_order() {
        let store = InMemoryConversationStore::new();
        store.append("u1", vec![1, 2]).await;
        store.append("u1", vec![3]).await;
        assert_eq!(store.load("u1").await, vec![1, 2, 3]);
        assert_eq!(store.snapshot("u1").await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_append_creates_nothing() {
        let store = InMemoryConversationStore::<i32>::new();
        store.append("u1", vec![]).await;
        assert!(store.conversation_ids().await.is_empty());
    }

    #[tokio::test]
    async fn conversation_ids_sorted() {
        let store = InMemoryConversationStore::new();
        store.append("b", vec![1]).await;
        store.append("a", vec![1]).await;
        assert_eq!(store.conversation_ids().await, vec!["a", "b"]);
        assert_eq!(store.len(), 2);
    }
}
