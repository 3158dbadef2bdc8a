//! Handlers for short URL redirects.

use axum::{
    Form, Json,
    extract::{ConnectInfo, FromRequest, Path, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use url::Url;

use crate::api::dto::unlock::UnlockRequest;
use crate::application::services::link_service::INVALID_LINK_MESSAGE;
use crate::domain::redirect::{Credential, RedirectOutcome, RedirectRequest, Rejection};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Decode the code and load the link
/// 2. Reject expired links
/// 3. Reject password-protected links (a password can only be sent with POST)
/// 4. Record the click (best effort)
/// 5. Return 302 Found
///
/// # Errors
///
/// - 404 Not Found for undecodable or unknown codes
/// - 410 Gone for expired links
/// - 401 Unauthorized for password-protected links
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let request = redirect_request(code, Credential::None, &headers, addr);
    resolve(&state, request).await
}

/// Redirects a password-protected short code after checking the password.
///
/// # Endpoint
///
/// `POST /{code}`
///
/// # Request Body
///
/// JSON (`{"password": "..."}`) or an HTML form (`password=...`). Any other
/// body is treated as an empty password.
///
/// # Errors
///
/// - 404 Not Found for undecodable or unknown codes
/// - 410 Gone for expired links
/// - 403 Forbidden for a wrong password
/// - 429 Too Many Requests beyond 5 attempts per minute per IP
pub async fn unlock_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    UnlockBody(body): UnlockBody,
) -> Result<Response, AppError> {
    let request = redirect_request(code, Credential::Password(body.password), &headers, addr);
    resolve(&state, request).await
}

fn redirect_request(
    code: String,
    credential: Credential,
    headers: &HeaderMap,
    addr: SocketAddr,
) -> RedirectRequest {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    RedirectRequest::new(
        code,
        credential,
        resolve_client_ip(headers, addr),
        user_agent,
    )
}

async fn resolve(state: &AppState, request: RedirectRequest) -> Result<Response, AppError> {
    match state.redirect_service.resolve(&request, Utc::now()).await? {
        RedirectOutcome::Success { original_url } => found(&original_url),
        RedirectOutcome::Rejected(rejection) => Err(rejection_error(rejection, &request.code)),
    }
}

/// `302 Found` pointing at `target`.
///
/// The stored URL is re-serialized so non-ASCII input becomes a valid header value.
fn found(target: &str) -> Result<Response, AppError> {
    let location = Url::parse(target)
        .map(String::from)
        .unwrap_or_else(|_| target.to_string());

    let location = HeaderValue::try_from(location).map_err(|e| {
        AppError::internal("Stored URL is not a valid Location", json!({ "reason": e.to_string() }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn rejection_error(rejection: Rejection, code: &str) -> AppError {
    match rejection {
        Rejection::Invalid => AppError::not_found(INVALID_LINK_MESSAGE, json!({ "code": code })),
        Rejection::Expired => AppError::gone("This link has expired", json!({ "code": code })),
        Rejection::PasswordRequired => {
            AppError::unauthorized("Password required", json!({ "code": code }))
        }
        Rejection::Forbidden => AppError::forbidden("Invalid password", json!({ "code": code })),
    }
}

/// Password submission accepted as JSON or form data.
pub struct UnlockBody(pub UnlockRequest);

impl<S: Send + Sync> FromRequest<S> for UnlockBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<UnlockRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
                })?;
            return Ok(Self(body));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<UnlockRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
                })?;
            return Ok(Self(body));
        }

        Ok(Self(UnlockRequest::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_sets_location() {
        let response = found("https://example.com/path?q=1").unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_found_encodes_non_ascii() {
        let response = found("https://example.com/straße").unwrap();

        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/stra%C3%9Fe"
        );
    }

    #[test]
    fn test_rejection_status_codes() {
        let cases = [
            (Rejection::Invalid, StatusCode::NOT_FOUND),
            (Rejection::Expired, StatusCode::GONE),
            (Rejection::PasswordRequired, StatusCode::UNAUTHORIZED),
            (Rejection::Forbidden, StatusCode::FORBIDDEN),
        ];

        for (rejection, status) in cases {
            assert_eq!(rejection_error(rejection, "abc").status_code(), status);
        }
    }
}
