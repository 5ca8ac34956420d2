mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_with_generated_code() {
    let (server, repository) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "targetUrl": "https://example.com/docs" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["targetUrl"], "https://example.com/docs");
    assert_eq!(body["totalClicks"], 0);
    assert!(body["lastClickedAt"].is_null());
    assert_eq!(body["shortUrl"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_create_link_with_custom_code() {
    let (server, _) = common::create_test_server();

    let body = common::create_link(&server, "https://example.com/docs", Some("docs2024")).await;

    assert_eq!(body["code"], "docs2024");
    assert_eq!(body["shortUrl"], "https://sl.test/docs2024");
}

#[tokio::test]
async fn test_create_link_empty_custom_code_generates_one() {
    let (server, _) = common::create_test_server();

    let body = common::create_link(&server, "https://example.com", Some("")).await;

    assert_eq!(body["code"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_create_link_duplicate_code_conflicts() {
    let (server, repository) = common::create_test_server();
    common::create_link(&server, "https://example.com/a", Some("taken123")).await;

    let response = server
        .post("/api/links")
        .json(&json!({ "targetUrl": "https://example.com/b", "customCode": "taken123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "code_already_exists");
    assert_eq!(repository.len(), 1);

    let original: Value = server.get("/api/links/taken123").await.json();
    assert_eq!(original["targetUrl"], "https://example.com/a");
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (server, repository) = common::create_test_server();

    for target in ["not-a-url", "ftp://files.example.com/x", "", "/relative/path"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "targetUrl": target }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_url", "target: {target:?}");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_create_link_missing_target_url() {
    let (server, _) = common::create_test_server();

    let response = server.post("/api/links").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_create_link_malformed_body_uses_error_envelope() {
    let (server, repository) = common::create_test_server();

    let wrong_type = server
        .post("/api/links")
        .json(&json!({ "targetUrl": 5 }))
        .await;
    wrong_type.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = wrong_type.json();
    assert_eq!(body["error"]["code"], "invalid_url");

    let not_json = server.post("/api/links").text("targetUrl=x").await;
    not_json.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = not_json.json();
    assert_eq!(body["error"]["code"], "invalid_url");

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_create_link_invalid_custom_code() {
    let (server, repository) = common::create_test_server();

    for code in ["abc", "abcdefghi", "ab-cd_12", "abc 123"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "targetUrl": "https://example.com", "customCode": code }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_code_format", "code: {code:?}");
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_invalid_url_reported_before_invalid_code() {
    let (server, _) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "targetUrl": "nope", "customCode": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, _) = common::create_test_server();
    common::create_link(&server, "https://example.com/1", Some("first111")).await;
    common::create_link(&server, "https://example.com/2", Some("second22")).await;

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["code"], "second22");
    assert_eq!(body[1]["code"], "first111");
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _) = common::create_test_server();

    let body: Vec<Value> = server.get("/api/links").await.json();

    assert!(body.is_empty());
}

#[tokio::test]
async fn test_stats_does_not_count_as_click() {
    let (server, _) = common::create_test_server();
    common::create_link(&server, "https://example.com", Some("stats123")).await;

    for _ in 0..3 {
        let response = server.get("/api/links/stats123").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["totalClicks"], 0);
        assert!(body["lastClickedAt"].is_null());
    }
}

#[tokio::test]
async fn test_stats_not_found() {
    let (server, _) = common::create_test_server();

    let response = server.get("/api/links/missing1").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_link() {
    let (server, repository) = common::create_test_server();
    common::create_link(&server, "https://example.com", Some("delete12")).await;

    let response = server.delete("/api/links/delete12").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Link deleted successfully");
    assert!(repository.is_empty());

    server
        .get("/api/links/delete12")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/delete12")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (server, _) = common::create_test_server();

    let response = server.delete("/api/links/missing1").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (server, _) = common::create_test_server();
    common::create_link(&server, "https://example.com/old", Some("reuse123")).await;
    server.delete("/api/links/reuse123").await.assert_status_ok();

    let body = common::create_link(&server, "https://example.com/new", Some("reuse123")).await;

    assert_eq!(body["targetUrl"], "https://example.com/new");
    assert_eq!(body["totalClicks"], 0);
}
