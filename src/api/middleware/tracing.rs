//! Request spans for the HTTP surface.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

type RequestSpan = fn(&Request<Body>) -> Span;

/// Wraps every request in an `INFO` span named `request`.
///
/// The span carries the method and path only. Query strings are left out so
/// that nothing a client appends to a short URL ends up in the logs. Responses
/// are logged with their status and latency in milliseconds, and 5xx answers
/// are additionally reported at `ERROR`.
///
/// ```text
/// INFO request{method=POST path=/api/shorten}: finished processing request latency=12 ms status=201
/// INFO request{method=GET path=/zZ73Xa}: finished processing request latency=3 ms status=302
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(request_span as RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = request.uri().path(),
    )
}

