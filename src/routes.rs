// Route definitions and rejection handling

use std::convert::Infallible;
use std::sync::Arc;

use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Filter, Rejection};

use crate::auth::{with_api_key, API_KEY_HEADER};
use crate::chat::ChatService;
use crate::error::ApiError;
use crate::handlers;
use crate::models::ErrorBody;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(chat: ChatService, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            chat: Arc::new(chat),
            api_key: api_key.into(),
        }
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let auth = with_api_key(state.api_key.clone());

    // GET /
    let health = warp::path::end()
        .and(warp::get())
        .and_then(handlers::health_handler);

    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(auth.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::chat_handler);

    // GET /threads
    let list_threads = warp::path("threads")
        .and(warp::path::end())
        .and(warp::get())
        .and(auth.clone())
        .and(with_state(state.clone()))
        .and_then(handlers::list_threads_handler);

    // GET /threads/{thread_id}
    let get_thread = warp::path("threads")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(auth.clone())
        .and(with_state(state.clone()))
        .and_then(handlers::get_thread_handler);

    // DELETE /threads/{thread_id}
    let delete_thread = warp::path("threads")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(auth)
        .and(with_state(state))
        .and_then(handlers::delete_thread_handler);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type", API_KEY_HEADER]);

    health
        .or(chat)
        .or(list_threads)
        .or(get_thread)
        .or(delete_thread)
        .with(cors)
        .recover(handle_rejection)
}

/// Render any rejection as `{"detail": ...}` with a matching status
pub async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, detail) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status_code(), api_error.to_string())
    } else if let Some(body_error) = err.find::<BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", body_error),
        )
    } else if let Some(header_error) = err.find::<warp::reject::InvalidHeader>() {
        (StatusCode::BAD_REQUEST, header_error.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected an application/json body".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), detail = %detail, "request failed");
    } else {
        tracing::debug!(status = status.as_u16(), detail = %detail, "request rejected");
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { detail }),
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::HeaderValue;
    use warp::Reply;

    #[tokio::test]
    async fn test_invalid_header_is_bad_request() {
        let rejection = warp::test::request()
            .header("x-trace", HeaderValue::from_bytes(b"\xfftrace").unwrap())
            .filter(&warp::header::<String>("x-trace"))
            .await
            .unwrap_err();

        let response = handle_rejection(rejection).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_error_keeps_its_status() {
        let rejection = warp::reject::custom(ApiError::Unauthorized);
        let response = handle_rejection(rejection).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
