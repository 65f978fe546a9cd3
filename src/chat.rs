// Chat-turn workflow: load history, call the model, record the turn

use std::sync::Arc;

use crate::chat_store::ThreadStore;
use crate::context::{self, CharRatioEstimator, TokenEstimator};
use crate::error::ApiError;
use crate::llm::{self, GenerateRequest, GenerationConfig, LlmProvider};
use crate::models::{ChatRequest, ChatResponse, Message, Role};

pub struct ChatService {
    store: Arc<dyn ThreadStore>,
    provider: Arc<dyn LlmProvider>,
    generation: GenerationConfig,
    token_budget: usize,
    estimator: Arc<dyn TokenEstimator>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ThreadStore>, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            store,
            provider,
            generation: GenerationConfig::default(),
            token_budget: context::DEFAULT_TOKEN_BUDGET,
            estimator: Arc::new(CharRatioEstimator::default()),
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_token_budget(mut self, token_budget: usize) -> Self {
        self.token_budget = token_budget;
        self
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn store(&self) -> &Arc<dyn ThreadStore> {
        &self.store
    }

    /// Run one turn on a thread
    ///
    /// Nothing is written unless the model answers. The user and assistant
    /// messages are then appended together, in that order.
    #[tracing::instrument(
        name = "chat_turn",
        skip(self, request),
        fields(thread_id = %request.thread_id, message_len = request.message.len())
    )]
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        validate(&request)?;

        let mut history = self.store.get_history(&request.thread_id).await?;
        let prior = history.len();
        history.push(Message::user(request.message.clone()));

        let window = context::trim(&history, self.token_budget, self.estimator.as_ref());
        tracing::debug!(prior, sent = window.len(), "built model context");

        let generate = GenerateRequest::new(
            window.iter().map(to_llm_message).collect(),
            self.generation.clone(),
        )
        .with_system(request.effective_system_prompt());

        let completion = match self.provider.generate(generate).await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::warn!(error = %err, "model call failed, user message was not persisted");
                return Err(ApiError::Upstream(err));
            }
        };

        if let Some(usage) = completion.usage {
            tracing::info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                finish_reason = ?completion.finish_reason,
                "model replied"
            );
        }

        let turn = [
            Message::user(request.message),
            Message::assistant(completion.text.clone()),
        ];
        if let Err(err) = self.store.append(&request.thread_id, &turn).await {
            tracing::error!(error = %err, "reply generated but the turn was not recorded");
            return Err(ApiError::Storage(err));
        }

        Ok(ChatResponse {
            thread_id: request.thread_id,
            response: completion.text,
        })
    }
}

fn validate(request: &ChatRequest) -> Result<(), ApiError> {
    if request.thread_id.trim().is_empty() {
        return Err(ApiError::Validation("thread_id must not be empty".to_string()));
    }
    if request.message.trim().is_empty() {
        return Err(ApiError::Validation("message must not be empty".to_string()));
    }
    reject_nul("thread_id", &request.thread_id)?;
    reject_nul("message", &request.message)?;
    if let Some(prompt) = &request.system_prompt {
        reject_nul("system_prompt", prompt)?;
    }
    Ok(())
}

/// Postgres text and JSONB cannot hold U+0000
pub(crate) fn reject_nul(field: &str, value: &str) -> Result<(), ApiError> {
    if value.contains('\0') {
        return Err(ApiError::Validation(format!(
            "{} must not contain NUL characters",
            field
        )));
    }
    Ok(())
}

fn to_llm_message(message: &Message) -> llm::Message {
    match message.role {
        Role::User => llm::Message::user(message.content.clone()),
        Role::Assistant => llm::Message::assistant(message.content.clone()),
    }
}
