use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::chat_store::{
    error::Result,
    store::{DeleteOutcome, ThreadStore},
};
use crate::models::{Message, ThreadSummary};

#[derive(Default)]
struct Threads {
    messages: HashMap<String, Vec<Message>>,
    /// Thread ids in creation order
    order: Vec<String>,
}

/// Process-local thread store; contents are lost on restart
#[derive(Default)]
pub struct InMemoryThreadStore {
    threads: RwLock<Threads>,
}

impl InMemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadStore for InMemoryThreadStore {
    async fn get_history(&self, thread_id: &str) -> Result<Vec<Message>> {
        let threads = self.threads.read().await;
        Ok(threads.messages.get(thread_id).cloned().unwrap_or_default())
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        let threads = self.threads.read().await;
        Ok(threads
            .order
            .iter()
            .filter_map(|id| {
                threads.messages.get(id).map(|messages| ThreadSummary {
                    thread_id: id.clone(),
                    message_count: messages.len(),
                })
            })
            .collect())
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<DeleteOutcome> {
        let mut threads = self.threads.write().await;
        if threads.messages.remove(thread_id).is_none() {
            return Ok(DeleteOutcome::NotFound);
        }
        threads.order.retain(|id| id != thread_id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn append(&self, thread_id: &str, messages: &[Message]) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let mut threads = self.threads.write().await;
        if !threads.messages.contains_key(thread_id) {
            threads.order.push(thread_id.to_string());
        }
        threads
            .messages
            .entry(thread_id.to_string())
            .or_default()
            .extend_from_slice(messages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_thread_is_empty() {
        let store = InMemoryThreadStore::new();
        assert!(store.get_history("missing").await.unwrap().is_empty());
        assert!(store.list_threads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemoryThreadStore::new();
        store
            .append("t1", &[Message::user("one"), Message::assistant("two")])
            .await
            .unwrap();
        store.append("t1", &[Message::user("three")]).await.unwrap();

        let history = store.get_history("t1").await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_empty_append_creates_nothing() {
        let store = InMemoryThreadStore::new();
        store.append("t1", &[]).await.unwrap();
        assert!(store.list_threads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_threads_in_creation_order() {
        let store = InMemoryThreadStore::new();
        store.append("b", &[Message::user("x")]).await.unwrap();
        store.append("a", &[Message::user("y")]).await.unwrap();
        store.append("b", &[Message::assistant("z")]).await.unwrap();

        let threads = store.list_threads().await.unwrap();
        assert_eq!(
            threads,
            vec![
                ThreadSummary {
                    thread_id: "b".to_string(),
                    message_count: 2
                },
                ThreadSummary {
                    thread_id: "a".to_string(),
                    message_count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_thread() {
        let store = InMemoryThreadStore::new();
        store.append("t1", &[Message::user("hi")]).await.unwrap();

        assert_eq!(store.delete_thread("t1").await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.delete_thread("t1").await.unwrap(), DeleteOutcome::NotFound);
        assert!(store.get_history("t1").await.unwrap().is_empty());
        assert!(store.list_threads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_stay_contiguous() {
        let store = Arc::new(InMemoryThreadStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let turn = [
                    Message::user(format!("q{i}")),
                    Message::assistant(format!("a{i}")),
                ];
                store.append("shared", &turn).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = store.get_history("shared").await.unwrap();
        assert_eq!(history.len(), 32);
        for pair in history.chunks(2) {
            assert_eq!(&pair[0].content[1..], &pair[1].content[1..]);
        }
    }
}
