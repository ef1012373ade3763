//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::rate_limit::RateLimiter;

/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Target of the "back to home" link on terminal pages.
    pub home_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        auth_service: Arc<AuthService>,
        rate_limiter: Arc<dyn RateLimiter>,
        home_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            rate_limiter,
            home_url: home_url.into(),
        }
    }
}
