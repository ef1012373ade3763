//! Safety oracle stand-in that reports every URL clean.

use async_trait::async_trait;
use tracing::debug;

use super::service::{SafetyError, SafetyVerifier};
use crate::domain::entities::SafetyVerdict;

/// Used when no VirusTotal API key is configured.
pub struct NullSafetyVerifier;

impl NullSafetyVerifier {
    pub fn new() -> Self {
        debug!("Using NullSafetyVerifier (safety checks disabled)");
        Self
    }
}

impl Default for NullSafetyVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SafetyVerifier for NullSafetyVerifier {
    async fn verify(&self, _url: &str) -> Result<SafetyVerdict, SafetyError> {
        Ok(SafetyVerdict::clean())
    }
}
