#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::cache::NullCache;
use snaplink::infrastructure::persistence::InMemoryLinkRepository;
use snaplink::routes::router;
use snaplink::state::AppState;

pub const BASE_URL: &str = "https://sl.test";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(
        repository.clone() as Arc<dyn LinkRepository>,
        Arc::new(NullCache::new()),
        BASE_URL,
        Duration::from_secs(5),
    );

    (state, repository)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, repository)
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, target_url: &str, custom_code: Option<&str>) -> Value {
    let mut body = json!({ "targetUrl": target_url });
    if let Some(code) = custom_code {
        body["customCode"] = json!(code);
    }

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
