//! Azure OpenAI client implementation

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use std::fmt;
use std::time::Duration;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{from_azure_response, to_azure_request};
use super::types::{AzureErrorResponse, ChatCompletionResponse};

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Connection details for one Azure OpenAI deployment
#[derive(Clone, PartialEq, Eq)]
pub struct AzureOpenAiSettings {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiSettings {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

impl fmt::Debug for AzureOpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureOpenAiSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Client for a chat-completions deployment on Azure OpenAI
pub struct AzureOpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    settings: AzureOpenAiSettings,
}

impl AzureOpenAiClient {
    /// Create a new Azure OpenAI client
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are incomplete or the HTTP client
    /// cannot be built.
    pub fn new(settings: AzureOpenAiSettings) -> Result<Self, LlmError> {
        if settings.endpoint.trim().is_empty() {
            return Err(LlmError::InvalidRequest("endpoint must not be empty".to_string()));
        }
        if settings.deployment.trim().is_empty() {
            return Err(LlmError::InvalidRequest("deployment must not be empty".to_string()));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    /// Build the chat-completions URL, without the `api-version` query
    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment
        )
    }

    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let azure_request = to_azure_request(request);

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header("api-key", &self.settings.api_key)
            .json(&azure_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %err,
                        "failed to read error response body"
                    );
                    String::new()
                }
            };
            return Err(error_from_status(status, retry_after, &body));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        tracing::debug!(
            completion_id = completion.id.as_deref().unwrap_or(""),
            choices = completion.choices.len(),
            "received completion"
        );
        from_azure_response(completion)
    }
}

/// Classify a non-success response
fn error_from_status(status: StatusCode, retry_after: Option<Duration>, body: &str) -> LlmError {
    let envelope = serde_json::from_str::<AzureErrorResponse>(body).ok();

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded { retry_after },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthenticationError(
            envelope
                .map(|e| e.error.message)
                .unwrap_or_else(|| body.to_string()),
        ),
        _ => match envelope {
            Some(e) => LlmError::ProviderError {
                code: e.error.code_string(),
                message: e.error.message,
            },
            None => LlmError::HttpError {
                status: status.as_u16(),
                body: body.to_string(),
            },
        },
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }
}
