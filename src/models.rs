// Data structures (Message, Thread, request and response bodies)

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

// Message Role Enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// Message Struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub thread_id: String,
    pub message: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    /// The system prompt to send upstream: the default when absent, none when blank.
    pub fn effective_system_prompt(&self) -> Option<String> {
        match &self.system_prompt {
            None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            Some(prompt) if prompt.trim().is_empty() => None,
            Some(prompt) => Some(prompt.clone()),
        }
    }
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub thread_id: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub thread_id: String,
    pub message_count: usize,
    pub messages: Vec<Message>,
}

impl ThreadResponse {
    pub fn new(thread_id: String, messages: Vec<Message>) -> Self {
        Self {
            thread_id,
            message_count: messages.len(),
            messages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub message_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadListResponse {
    pub thread_count: usize,
    pub threads: Vec<ThreadSummary>,
}

impl From<Vec<ThreadSummary>> for ThreadListResponse {
    fn from(threads: Vec<ThreadSummary>) -> Self {
        Self {
            thread_count: threads.len(),
            threads,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "running".to_string(),
            service: "AI Agent API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// Error body, matching the `detail` envelope clients already parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
