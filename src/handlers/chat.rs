// POST /chat handler

use crate::models::ChatRequest;
use crate::routes::AppState;

#[tracing::instrument(name = "POST /chat", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn chat_handler(
    request: ChatRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    let response = state.chat.chat(request).await?;
    Ok(warp::reply::json(&response))
}
