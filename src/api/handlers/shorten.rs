//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "expiration": "2030-01-01T00:00:00Z",  // optional
///   "password": "s3cret"                    // optional, write-only
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_code": "zZ73Xa",
///   "short_url": "https://s.example.com/zZ73Xa",
///   "clicks": 0,
///   "unique_clicks": 0,
///   "expiration": "2030-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or not an absolute HTTP(S) URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(
            &payload.original_url,
            payload.expiration,
            payload.password.as_deref(),
        )
        .await?;

    let short_code = state.link_service.short_code(&link);
    let short_url = state.short_url(&headers, &short_code)?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            original_url: link.original_url,
            short_code,
            short_url,
            clicks: link.clicks,
            unique_clicks: 0,
            expiration: link.expiration,
        }),
    ))
}
