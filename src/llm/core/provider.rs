//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a single completion for the conversation in `request`
    ///
    /// The call suspends on network I/O and is not retried.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
