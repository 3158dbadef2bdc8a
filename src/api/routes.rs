//! API route configuration.

use crate::api::handlers::{link_details_handler, report_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short link
/// - `GET  /links/{code}`  - Link details with total and unique clicks
/// - `GET  /report`        - Links clicked today / during the last week
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links/{code}", get(link_details_handler))
        .route("/report", get(report_handler))
}
