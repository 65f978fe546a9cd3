#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use agent_api::chat::ChatService;
use agent_api::chat_store::InMemoryThreadStore;
use agent_api::llm::{FinishReason, GenerateRequest, GenerateResponse, LlmError, LlmProvider};
use agent_api::routes::{configure_routes, AppState};
use async_trait::async_trait;
use testcontainers::{core::WaitFor, GenericImage, RunnableImage};
use warp::Filter;

pub const API_KEY: &str = "test-api-key";

/// Stand-in for the hosted model
pub struct ScriptedProvider {
    calls: AtomicUsize,
    fail: bool,
}

impl ScriptedProvider {
    pub fn replying() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(LlmError::HttpError {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        let last = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(GenerateResponse {
            text: format!("Reply #{} to: {}", n, last),
            finish_reason: FinishReason::Stop,
            usage: None,
        })
    }
}

/// Full router over an in-memory store
pub fn test_routes(
    provider: Arc<ScriptedProvider>,
) -> (
    impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone,
    Arc<InMemoryThreadStore>,
) {
    let store = Arc::new(InMemoryThreadStore::new());
    let chat = ChatService::new(store.clone(), provider);
    (configure_routes(AppState::new(chat, API_KEY)), store)
}

/// Postgres image used by the chat store tests
pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";

/// Default PostgreSQL port
pub const POSTGRES_PORT: u16 = 5432;

pub const POSTGRES_USER: &str = "postgres";
pub const POSTGRES_PASSWORD: &str = "chat_store_password";
pub const POSTGRES_DB: &str = "postgres";

/// Create a runnable Postgres container
pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

/// Build a connection string for the running container
pub fn build_connection_string(host: &str, port: u16) -> String {
    format!(
        "postgresql://{}:{}@{}:{}/{}",
        POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
    )
}
