#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::Value;
use short_links::infrastructure::persistence::{PgClickLogRepository, PgLinkRepository};
use short_links::infrastructure::security::Argon2PasswordHasher;
use short_links::routes;
use short_links::state::AppState;
use short_links::utils::short_code::ShortCodeCodec;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const TEST_SALT: &str = "integration salt";
pub const BASE_URL: &str = "https://s.example.com";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub fn test_codec() -> ShortCodeCodec {
    ShortCodeCodec::new(TEST_SALT, 6).unwrap()
}

pub fn memory_state() -> AppState {
    AppState::in_memory(test_codec(), Some(BASE_URL.to_string()))
}

pub fn pg_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickLogRepository::new(pool)),
        test_codec(),
        Arc::new(Argon2PasswordHasher::new()),
        Some(BASE_URL.to_string()),
    )
}

/// Full router over `state`, with a fixed peer address injected.
pub fn test_server(state: AppState) -> TestServer {
    let app = routes::router(state, false).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn shorten(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/shorten").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn shorten_code(server: &TestServer, body: Value) -> String {
    shorten(server, body).await["short_code"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn link_details(server: &TestServer, code: &str) -> Value {
    let response = server.get(&format!("/api/links/{code}")).await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
