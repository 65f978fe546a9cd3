use std::process::ExitCode;
use std::sync::Arc;

use agent_api::chat::ChatService;
use agent_api::chat_store::{ChatStoreConfig, InMemoryThreadStore, PostgresThreadStore, ThreadStore};
use agent_api::config::AppConfig;
use agent_api::llm::AzureOpenAiClient;
use agent_api::routes::{configure_routes, AppState};
use agent_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(err) = init_subscriber(get_subscriber("info")) {
        eprintln!("failed to install tracing subscriber: {}", err);
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let store: Arc<dyn ThreadStore> = match &config.database_url {
        Some(url) => {
            let store_config = ChatStoreConfig::from_connection_string(url)?
                .with_table_name(config.table_name.clone())?
                .with_max_pool_size(config.max_pool_size);
            Arc::new(PostgresThreadStore::connect(store_config).await?)
        }
        None => {
            tracing::warn!("POSTGRES_CONNECTION_STRING not set, threads are kept in memory only");
            Arc::new(InMemoryThreadStore::new())
        }
    };

    let provider = Arc::new(AzureOpenAiClient::new(config.azure.clone())?);

    let chat = ChatService::new(store, provider)
        .with_generation(config.generation.clone())
        .with_token_budget(config.token_budget);

    let routes = configure_routes(AppState::new(chat, config.api_key.as_str()));

    tracing::info!(
        address = %config.bind_address,
        deployment = %config.azure.deployment,
        "Starting AI Agent API"
    );
    warp::serve(routes).run(config.bind_address).await;

    Ok(())
}
