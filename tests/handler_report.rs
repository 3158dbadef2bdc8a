mod common;

use serde_json::json;

#[tokio::test]
async fn test_report_empty() {
    let server = common::test_server(common::memory_state());

    let response = server.get("/api/report").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["clicks_today"], 0);
    assert_eq!(json["clicks_week"], 0);
}

#[tokio::test]
async fn test_report_counts_links_not_clicks() {
    let server = common::test_server(common::memory_state());
    let first = common::shorten_code(&server, json!({ "original_url": "https://a.example" })).await;
    let second = common::shorten_code(&server, json!({ "original_url": "https://b.example" })).await;
    common::shorten_code(&server, json!({ "original_url": "https://never.example" })).await;

    for _ in 0..3 {
        server.get(&format!("/{first}")).await;
    }
    server.get(&format!("/{second}")).await;

    let json = server.get("/api/report").await.json::<serde_json::Value>();
    assert_eq!(json["clicks_today"], 2);
    assert_eq!(json["clicks_week"], 2);
}

#[tokio::test]
async fn test_health_in_memory() {
    let server = common::test_server(common::memory_state());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert!(json["version"].is_string());
}
