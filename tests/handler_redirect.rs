mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use linkgate::domain::repositories::LinkRepository;
use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::create_test_app();
    app.repo
        .put(common::link("Ab12Cd", "https://example.com/target"));

    let response = app.server.get("/Ab12Cd").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(
        response.header("cache-control"),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(response.header("pragma"), "no-cache");
    assert_eq!(response.header("expires"), "0");

    let stored = app.repo.find_by_code("Ab12Cd").await.unwrap().unwrap();
    assert_eq!(stored.click_count, 1);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/Zz99Zz").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Link not found"));
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let app = common::create_test_app();

    for path in ["/abc", "/abc_12", "/Ab12Cd7"] {
        app.server.get(path).await.assert_status_not_found();
    }
}

#[tokio::test]
async fn test_redirect_expired() {
    let app = common::create_test_app();
    let expired_at = Utc::now() - Duration::hours(1);
    app.repo
        .put(common::expired_link("Old123", "https://example.com", expired_at));

    let response = app.server.get("/Old123").await;

    response.assert_status(StatusCode::GONE);
    assert!(
        response
            .text()
            .contains(&expired_at.format("%Y-%m-%d %H:%M UTC").to_string())
    );

    let stored = app.repo.find_by_code("Old123").await.unwrap().unwrap();
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_redirect_quota_exceeded() {
    let app = common::create_test_app();
    app.repo
        .put(common::limited_link("Used01", "https://example.com", 5, 5));

    let response = app.server.get("/Used01").await;

    response.assert_status(StatusCode::GONE);
    assert!(response.text().contains("5 / 5"));

    let stored = app.repo.find_by_code("Used01").await.unwrap().unwrap();
    assert_eq!(stored.click_count, 5);
}

#[tokio::test]
async fn test_redirect_consumes_quota() {
    let app = common::create_test_app();
    app.repo
        .put(common::limited_link("Once01", "https://example.com", 0, 2));

    app.server
        .get("/Once01")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    app.server
        .get("/Once01")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    app.server.get("/Once01").await.assert_status(StatusCode::GONE);

    let stored = app.repo.find_by_code("Once01").await.unwrap().unwrap();
    assert_eq!(stored.click_count, 2);
}

#[tokio::test]
async fn test_redirect_interleaved_clicks_respect_quota() {
    let app = common::create_test_app();
    app.repo
        .put(common::limited_link("Race01", "https://example.com", 0, 3));

    let get = || async { app.server.get("/Race01").await.status_code() };
    let (a, b, c, d, e, f) = tokio::join!(get(), get(), get(), get(), get(), get());
    let statuses = [a, b, c, d, e, f];

    let redirects = statuses
        .iter()
        .filter(|s| **s == StatusCode::TEMPORARY_REDIRECT)
        .count();
    assert_eq!(redirects, 3);
    assert!(
        statuses
            .iter()
            .all(|s| *s == StatusCode::TEMPORARY_REDIRECT || *s == StatusCode::GONE)
    );

    let stored = app.repo.find_by_code("Race01").await.unwrap().unwrap();
    assert_eq!(stored.click_count, 3);
}

#[tokio::test]
async fn test_redirect_does_not_require_password() {
    let app = common::create_test_app();
    app.repo.put(common::protected_link(
        "Lock01",
        "https://example.com/secret",
        "correct horse",
    ));

    let response = app.server.get("/Lock01").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/secret");
}

#[tokio::test]
async fn test_redirect_after_create() {
    let app = common::create_test_app();

    app.server
        .post("/api/shorten")
        .json(&json!({ "code": "Fresh1", "destination": "https://example.com/fresh" }))
        .await
        .assert_status_ok();

    let response = app.server.get("/Fresh1").await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/fresh");
}
