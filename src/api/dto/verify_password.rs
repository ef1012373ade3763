//! DTOs for the password challenge endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct VerifyPasswordRequest {
    #[serde(alias = "shortCode")]
    pub code: String,
    pub password: String,
}

/// Only sent when the password matched.
#[derive(Debug, Serialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
    pub destination: String,
}
