use async_trait::async_trait;

use crate::chat_store::error::Result;
use crate::models::{Message, ThreadSummary};

/// Result of deleting a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Persistence for conversation threads keyed by thread id
///
/// Messages within a thread are kept in insertion order and are never
/// modified once stored.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Ordered history of a thread; empty for an unknown id
    async fn get_history(&self, thread_id: &str) -> Result<Vec<Message>>;

    /// Every thread holding at least one message, in creation order
    async fn list_threads(&self) -> Result<Vec<ThreadSummary>>;

    /// Remove a thread and all of its messages
    async fn delete_thread(&self, thread_id: &str) -> Result<DeleteOutcome>;

    /// Append messages to the end of a thread, creating it if needed
    ///
    /// The whole batch lands contiguously even when other appends to the same
    /// thread run concurrently.
    async fn append(&self, thread_id: &str, messages: &[Message]) -> Result<()>;
}
