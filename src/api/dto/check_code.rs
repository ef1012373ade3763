//! DTOs for the code availability endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CheckCodeRequest {
    #[serde(alias = "shortCode")]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CheckCodeResponse {
    pub exists: bool,
}
