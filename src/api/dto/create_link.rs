//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::empty_string_as_none;
use crate::application::services::CreateLinkInput;

/// Request to create one short link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Requested code. Generated when absent.
    #[serde(default, alias = "shortCode", deserialize_with = "empty_string_as_none")]
    pub code: Option<String>,

    #[serde(alias = "longUrl")]
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,

    /// Relative lifetime such as `1h`, `24h`, `7d` or `30d`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub expires_in: Option<String>,

    #[validate(range(min = 1, message = "maxClicks must be at least 1"))]
    pub max_clicks: Option<i64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub password: Option<String>,
}

impl From<CreateLinkRequest> for CreateLinkInput {
    fn from(request: CreateLinkRequest) -> Self {
        Self {
            code: request.code,
            destination: request.destination,
            expires_in: request.expires_in,
            max_clicks: request.max_clicks,
            password: request.password,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub short_url: String,
    pub code: String,
}
