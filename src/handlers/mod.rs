// Handlers module

pub mod chat;
pub mod delete_thread;
pub mod get_thread;
pub mod health;
pub mod list_threads;

pub use chat::chat_handler;
pub use delete_thread::delete_thread_handler;
pub use get_thread::get_thread_handler;
pub use health::health_handler;
pub use list_threads::list_threads_handler;

use crate::chat::reject_nul;
use crate::error::ApiError;

/// Path segments arrive percent-encoded
pub(crate) fn decode_thread_id(raw: &str) -> Result<String, ApiError> {
    let decoded = urlencoding::decode(raw)
        .map_err(|_| ApiError::Validation("thread_id is not valid UTF-8".to_string()))?;
    if decoded.trim().is_empty() {
        return Err(ApiError::Validation("thread_id must not be empty".to_string()));
    }
    reject_nul("thread_id", &decoded)?;
    Ok(decoded.into_owned())
}
