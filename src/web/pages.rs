//! Terminal pages shown on the redirect path.
//!
//! Each resolution state that does not redirect gets its own page and status.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::entities::ShortLink;

/// `templates/link_not_found.html`, served with 404.
#[derive(Template, WebTemplate)]
#[template(path = "link_not_found.html")]
pub struct NotFoundPage {
    pub home_url: String,
}

/// `templates/link_expired.html`, served with 410.
#[derive(Template, WebTemplate)]
#[template(path = "link_expired.html")]
pub struct ExpiredPage {
    pub home_url: String,
    /// Expiry instant formatted for display.
    pub expired_at: Option<String>,
}

/// `templates/link_exhausted.html`, served with 410.
#[derive(Template, WebTemplate)]
#[template(path = "link_exhausted.html")]
pub struct ExhaustedPage {
    pub home_url: String,
    pub click_count: i64,
    pub max_clicks: i64,
}

/// `templates/link_error.html`, served with 500.
#[derive(Template, WebTemplate)]
#[template(path = "link_error.html")]
pub struct ErrorPage {
    pub home_url: String,
}

pub fn not_found(home_url: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundPage {
            home_url: home_url.to_string(),
        },
    )
        .into_response()
}

pub fn expired(home_url: &str, link: &ShortLink) -> Response {
    (
        StatusCode::GONE,
        ExpiredPage {
            home_url: home_url.to_string(),
            expired_at: link
                .expires_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
        },
    )
        .into_response()
}

pub fn exhausted(home_url: &str, link: &ShortLink) -> Response {
    (
        StatusCode::GONE,
        ExhaustedPage {
            home_url: home_url.to_string(),
            click_count: link.click_count,
            max_clicks: link.max_clicks.unwrap_or(link.click_count),
        },
    )
        .into_response()
}

pub fn error(home_url: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorPage {
            home_url: home_url.to_string(),
        },
    )
        .into_response()
}
