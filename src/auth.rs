// Shared-secret guard for protected routes

use std::sync::Arc;

use warp::http::HeaderMap;
use warp::{Filter, Rejection};

use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Passes only when `X-API-Key` equals `expected`, rejecting with
/// [`ApiError::Unauthorized`] otherwise
///
/// The raw header bytes are compared, so a value that is not valid UTF-8 is
/// just another wrong key.
pub fn with_api_key(expected: Arc<str>) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::headers_cloned()
        .and_then(move |headers: HeaderMap| {
            let expected = expected.clone();
            async move {
                match headers.get(API_KEY_HEADER) {
                    Some(key) if keys_match(key.as_bytes(), expected.as_bytes()) => Ok(()),
                    _ => {
                        tracing::warn!("rejected request with missing or invalid API key");
                        Err(warp::reject::custom(ApiError::Unauthorized))
                    }
                }
            }
        })
        .untuple_one()
}

/// Comparison time depends only on the lengths, not on where the keys differ
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
