//! Mapping between abstraction types and Azure-specific types

use crate::llm::core::{
    error::LlmError,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata},
};

use super::types::{AzureMessage, ChatCompletionRequest, ChatCompletionResponse};

/// Convert our abstraction request to Azure's request format
pub fn to_azure_request(request: GenerateRequest) -> ChatCompletionRequest {
    let system = request.system.map(|content| AzureMessage {
        role: "system".to_string(),
        content,
    });

    ChatCompletionRequest {
        messages: system
            .into_iter()
            .chain(request.messages.into_iter().map(to_azure_message))
            .collect(),
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop: request.config.stop_sequences,
    }
}

fn to_azure_message(message: Message) -> AzureMessage {
    let role = match message.role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };
    AzureMessage {
        role: role.to_string(),
        content: message.content,
    }
}

/// Convert Azure's response to our abstraction's response
///
/// Only the first choice is used. A missing or blank content is an error.
pub fn from_azure_response(response: ChatCompletionResponse) -> Result<GenerateResponse, LlmError> {
    let usage = response
        .usage
        .map(|u| UsageMetadata::new(u.prompt_tokens, u.completion_tokens).with_total(u.total_tokens));

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    let finish_reason = FinishReason::from_provider(choice.finish_reason.as_deref());

    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(GenerateResponse {
            text,
            finish_reason,
            usage,
        }),
        _ => Err(LlmError::EmptyResponse),
    }
}
