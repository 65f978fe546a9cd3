//! Azure OpenAI provider implementation
//!
//! This module provides a client for chat-completions deployments hosted on
//! Azure OpenAI.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export commonly used types
pub use client::{AzureOpenAiClient, AzureOpenAiSettings};
