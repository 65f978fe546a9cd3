// DELETE /threads/{thread_id} handler

use crate::chat_store::DeleteOutcome;
use crate::error::ApiError;
use crate::handlers::decode_thread_id;
use crate::models::DeleteResponse;
use crate::routes::AppState;

/// Deleting an unknown thread answers the same as deleting a real one
#[tracing::instrument(name = "DELETE /threads/{id}", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn delete_thread_handler(
    raw_thread_id: String,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    let thread_id = decode_thread_id(&raw_thread_id)?;
    let outcome = state
        .chat
        .store()
        .delete_thread(&thread_id)
        .await
        .map_err(ApiError::from)?;

    match outcome {
        DeleteOutcome::Deleted => tracing::info!(thread_id = %thread_id, "thread deleted"),
        DeleteOutcome::NotFound => tracing::info!(thread_id = %thread_id, "thread did not exist"),
    }

    Ok(warp::reply::json(&DeleteResponse {
        message: format!("Thread {} deleted successfully", thread_id),
    }))
}
