//! Handler for link details endpoint.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::dto::links::LinkDetailsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link with its total and unique click counters.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found with message `Invalid URL` for undecodable and
/// unknown codes alike.
pub async fn link_details_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let link = state.link_service.find_by_code(&code).await?;
    let unique_clicks = state.link_service.unique_clicks(&link).await?;

    let short_code = state.link_service.short_code(&link);
    let short_url = state.short_url(&headers, &short_code)?;

    Ok(Json(LinkDetailsResponse {
        protected: link.is_protected(),
        original_url: link.original_url,
        short_code,
        short_url,
        clicks: link.clicks,
        unique_clicks,
        expiration: link.expiration,
        created_at: link.created_at,
        last_clicked: link.last_clicked,
    }))
}
