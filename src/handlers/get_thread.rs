// GET /threads/{thread_id} handler

use crate::error::ApiError;
use crate::handlers::decode_thread_id;
use crate::models::ThreadResponse;
use crate::routes::AppState;

#[tracing::instrument(name = "GET /threads/{id}", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn get_thread_handler(
    raw_thread_id: String,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    let thread_id = decode_thread_id(&raw_thread_id)?;
    let messages = state
        .chat
        .store()
        .get_history(&thread_id)
        .await
        .map_err(ApiError::from)?;

    tracing::debug!(thread_id = %thread_id, message_count = messages.len(), "loaded thread");

    Ok(warp::reply::json(&ThreadResponse::new(thread_id, messages)))
}
