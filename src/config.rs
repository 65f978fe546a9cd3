// Process-wide configuration, read once at startup

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::chat_store::connection::{validate_table_name, DEFAULT_TABLE_NAME};
use crate::context::DEFAULT_TOKEN_BUDGET;
use crate::llm::azure::client::{DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};
use crate::llm::core::config::DEFAULT_MAX_TOKENS;
use crate::llm::{AzureOpenAiSettings, GenerationConfig};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_MAX_POOL_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable snapshot of everything the service needs
#[derive(Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    /// Shared secret expected in `X-API-Key`
    pub api_key: String,
    pub azure: AzureOpenAiSettings,
    /// `None` selects the in-memory store
    pub database_url: Option<String>,
    pub table_name: String,
    pub max_pool_size: usize,
    pub token_budget: usize,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as absent
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let endpoint = require("AZURE_OPENAI_ENDPOINT")?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                var: "AZURE_OPENAI_ENDPOINT",
                value: endpoint,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let azure = AzureOpenAiSettings::new(endpoint, require("AZURE_OPENAI_API_KEY")?)
            .with_deployment(
                get("AZURE_OPENAI_DEPLOYMENT").unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            )
            .with_api_version(
                get("AZURE_OPENAI_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            );

        let table_name = get("CHAT_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        if let Err(err) = validate_table_name(&table_name) {
            return Err(ConfigError::Invalid {
                var: "CHAT_TABLE_NAME",
                value: table_name,
                reason: err.to_string(),
            });
        }

        let mut generation = GenerationConfig::new(parse_or(
            "MODEL_MAX_TOKENS",
            get("MODEL_MAX_TOKENS"),
            DEFAULT_MAX_TOKENS,
        )?);
        if let Some(raw) = get("MODEL_TEMPERATURE") {
            generation = generation.with_temperature(parse("MODEL_TEMPERATURE", raw)?);
        }
        if let Some(raw) = get("MODEL_TOP_P") {
            generation = generation.with_top_p(parse("MODEL_TOP_P", raw)?);
        }
        if let Some(raw) = get("MODEL_STOP_SEQUENCES") {
            generation = generation.with_stop_sequences(
                raw.split(',').map(str::trim).filter(|s| !s.is_empty()),
            );
        }
        if let Err(reason) = generation.check() {
            return Err(ConfigError::Invalid {
                var: "MODEL_*",
                value: format!("{:?}", generation),
                reason,
            });
        }

        Ok(Self {
            bind_address: parse(
                "BIND_ADDRESS",
                get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            )?,
            api_key: require("API_KEY")?,
            azure,
            database_url: get("POSTGRES_CONNECTION_STRING"),
            table_name,
            max_pool_size: parse_or("DB_MAX_POOL_SIZE", get("DB_MAX_POOL_SIZE"), DEFAULT_MAX_POOL_SIZE)?,
            token_budget: parse_or("TOKEN_BUDGET", get("TOKEN_BUDGET"), DEFAULT_TOKEN_BUDGET)?,
            generation,
        })
    }
}

fn parse<T>(var: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value: raw,
    })
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map(|raw| parse(var, raw)).unwrap_or(Ok(default))
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_address", &self.bind_address)
            .field("api_key", &"<redacted>")
            .field("azure", &self.azure)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("table_name", &self.table_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("token_budget", &self.token_budget)
            .field("generation", &self.generation)
            .finish()
    }
}
