//! LLM Abstraction Layer
//!
//! This module provides a provider-neutral interface for single-shot chat
//! completions, with an Azure OpenAI implementation.

pub mod azure;
pub mod core;

// Re-export commonly used types
pub use azure::{AzureOpenAiClient, AzureOpenAiSettings};
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata},
};
