mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use short_links::routes;
use tower::{Layer, ServiceExt};

#[tokio::test]
async fn test_redirect_success() {
    let server = common::test_server(common::memory_state());
    let code =
        common::shorten_code(&server, json!({ "original_url": "https://example.com/target" }))
            .await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_garbage_code() {
    let server = common::test_server(common::memory_state());

    let response = server.get("/not-a-real-code").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Invalid URL");
}

#[tokio::test]
async fn test_redirect_unknown_id_looks_like_garbage() {
    let server = common::test_server(common::memory_state());
    let unknown = common::test_codec().encode(999);

    let garbage = server.get("/l0O1l0").await;
    let missing = server.get(&format!("/{unknown}")).await;

    garbage.assert_status_not_found();
    missing.assert_status_not_found();
    assert_eq!(
        garbage.json::<serde_json::Value>()["error"]["message"],
        missing.json::<serde_json::Value>()["error"]["message"]
    );
}

#[tokio::test]
async fn test_redirect_foreign_salt_code() {
    let server = common::test_server(common::memory_state());
    common::shorten_code(&server, json!({ "original_url": "https://example.com" })).await;

    let foreign = short_links::utils::short_code::ShortCodeCodec::new("other salt", 6)
        .unwrap()
        .encode(1);
    let response = server.get(&format!("/{foreign}")).await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_expired_link() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({
            "original_url": "https://example.com",
            "expiration": "2000-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::GONE);

    let details = common::link_details(&server, &code).await;
    assert_eq!(details["clicks"], 0);
    assert_eq!(details["unique_clicks"], 0);
}

#[tokio::test]
async fn test_redirect_future_expiration_still_works() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({
            "original_url": "https://example.com",
            "expiration": "2099-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_protected_link_flow() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({
            "original_url": "https://example.com/private",
            "password": "s3cret"
        }),
    )
    .await;

    let get = server.get(&format!("/{code}")).await;
    assert_eq!(get.status_code(), StatusCode::UNAUTHORIZED);

    let wrong = server
        .post(&format!("/{code}"))
        .json(&json!({ "password": "guess" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::FORBIDDEN);

    let right = server
        .post(&format!("/{code}"))
        .json(&json!({ "password": "s3cret" }))
        .await;
    assert_eq!(right.status_code(), StatusCode::FOUND);
    assert_eq!(right.header("location"), "https://example.com/private");

    let details = common::link_details(&server, &code).await;
    assert_eq!(details["clicks"], 1);
    assert_eq!(details["protected"], true);
}

#[tokio::test]
async fn test_protected_link_accepts_form_body() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({ "original_url": "https://example.com", "password": "s3cret" }),
    )
    .await;

    let response = server
        .post(&format!("/{code}"))
        .form(&[("password", "s3cret")])
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_protected_link_without_body_is_forbidden() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({ "original_url": "https://example.com", "password": "s3cret" }),
    )
    .await;

    let response = server.post(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_open_link_accepts_post() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(&server, json!({ "original_url": "https://example.com" })).await;

    let response = server.post(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_repeat_clicks_count_total_and_unique() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(&server, json!({ "original_url": "https://example.com" })).await;

    for _ in 0..3 {
        server
            .get(&format!("/{code}"))
            .add_header("X-Forwarded-For", "203.0.113.9")
            .await;
    }
    server
        .get(&format!("/{code}"))
        .add_header("X-Forwarded-For", "198.51.100.4, 10.0.0.1")
        .await;
    server.get(&format!("/{code}")).await;

    let details = common::link_details(&server, &code).await;
    assert_eq!(details["clicks"], 5);
    assert_eq!(details["unique_clicks"], 3);
    assert!(details["last_clicked"].is_string());
}

#[tokio::test]
async fn test_password_attempts_are_rate_limited() {
    let server = common::test_server(common::memory_state());
    let code = common::shorten_code(
        &server,
        json!({ "original_url": "https://example.com", "password": "s3cret" }),
    )
    .await;

    for _ in 0..5 {
        let response = server
            .post(&format!("/{code}"))
            .json(&json!({ "password": "guess" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    let limited = server
        .post(&format!("/{code}"))
        .json(&json!({ "password": "s3cret" }))
        .await;
    assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);

    // Nothing is regained within the same minute.
    let retried = server
        .post(&format!("/{code}"))
        .form(&[("password", "s3cret")])
        .await;
    assert_eq!(retried.status_code(), StatusCode::TOO_MANY_REQUESTS);

    let navigation = server.get(&format!("/{code}")).await;
    assert_eq!(navigation.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let state = common::memory_state();
    let link = state
        .link_service
        .create_short_link("https://example.com/slash", None, None)
        .await
        .unwrap();
    let code = state.link_service.short_code(&link);

    let app = common::MockConnectInfoLayer.layer(routes::app_router(state, false));
    let response = app
        .oneshot(
            Request::get(format!("/{code}/"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/slash"
    );
}
