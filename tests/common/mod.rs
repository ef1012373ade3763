#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use linkgate::application::services::{AuthService, LinkService, LinkSettings};
use linkgate::domain::entities::{SafetyVerdict, ShortLink};
use linkgate::infrastructure::password::{Argon2PasswordHasher, PasswordHasher};
use linkgate::infrastructure::persistence::MemoryLinkRepository;
use linkgate::infrastructure::rate_limit::{MemoryRateLimiter, RateLimitPolicy};
use linkgate::infrastructure::safety::{NullSafetyVerifier, SafetyError, SafetyVerifier};
use linkgate::routes::router;
use linkgate::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Safety oracle returning a fixed verdict.
pub struct FixedVerifier(pub SafetyVerdict);

#[async_trait]
impl SafetyVerifier for FixedVerifier {
    async fn verify(&self, _url: &str) -> Result<SafetyVerdict, SafetyError> {
        Ok(self.0)
    }
}

/// Safety oracle that is always down.
pub struct UnreachableVerifier;

#[async_trait]
impl SafetyVerifier for UnreachableVerifier {
    async fn verify(&self, _url: &str) -> Result<SafetyVerdict, SafetyError> {
        Err(SafetyError::Status(503))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<MemoryLinkRepository>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(Arc::new(NullSafetyVerifier::new()), RateLimitPolicy::default())
}

pub fn create_test_app_with(safety: Arc<dyn SafetyVerifier>, policy: RateLimitPolicy) -> TestApp {
    let repo = Arc::new(MemoryLinkRepository::new());

    let link_service = Arc::new(LinkService::new(
        repo.clone() as Arc<dyn linkgate::domain::repositories::LinkRepository>,
        safety,
        Arc::new(Argon2PasswordHasher::new()),
        LinkSettings {
            base_url: BASE_URL.to_string(),
            safety_timeout: StdDuration::from_secs(1),
            ..LinkSettings::default()
        },
    ));

    let state = AppState::new(
        link_service,
        Arc::new(AuthService::new(Some(ADMIN_TOKEN))),
        Arc::new(MemoryRateLimiter::new(policy)),
        "/",
    );

    TestApp {
        server: TestServer::new(router(state)).unwrap(),
        repo,
    }
}

pub fn link(code: &str, destination: &str) -> ShortLink {
    ShortLink {
        code: code.to_string(),
        destination: destination.to_string(),
        created_at: Utc::now() - Duration::hours(1),
        expires_at: None,
        max_clicks: None,
        click_count: 0,
        password_hash: None,
        safety_verdict: Some(SafetyVerdict::clean()),
    }
}

pub fn expired_link(code: &str, destination: &str, expired_at: DateTime<Utc>) -> ShortLink {
    ShortLink {
        created_at: expired_at - Duration::days(1),
        expires_at: Some(expired_at),
        ..link(code, destination)
    }
}

pub fn limited_link(code: &str, destination: &str, clicks: i64, max_clicks: i64) -> ShortLink {
    ShortLink {
        click_count: clicks,
        max_clicks: Some(max_clicks),
        ..link(code, destination)
    }
}

pub fn protected_link(code: &str, destination: &str, password: &str) -> ShortLink {
    ShortLink {
        password_hash: Some(Argon2PasswordHasher::new().hash(password).unwrap()),
        ..link(code, destination)
    }
}
