// API error taxonomy and its HTTP mapping

use thiserror::Error;
use warp::http::StatusCode;

use crate::chat_store::StoreError;
use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// `X-API-Key` missing or wrong
    #[error("Invalid API Key")]
    Unauthorized,

    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// The model call failed
    #[error("Model request failed: {0}")]
    Upstream(#[from] LlmError),

    /// The thread store failed
    #[error("Storage request failed: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl warp::reject::Reject for ApiError {}
