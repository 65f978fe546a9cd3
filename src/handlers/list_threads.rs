// GET /threads handler

use crate::error::ApiError;
use crate::models::ThreadListResponse;
use crate::routes::AppState;

#[tracing::instrument(name = "GET /threads", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_threads_handler(state: AppState) -> Result<impl warp::Reply, warp::Rejection> {
    let threads = state
        .chat
        .store()
        .list_threads()
        .await
        .map_err(ApiError::from)?;

    Ok(warp::reply::json(&ThreadListResponse::from(threads)))
}
