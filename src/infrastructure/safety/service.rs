//! Safety oracle trait and error types.

use async_trait::async_trait;

use crate::domain::entities::SafetyVerdict;

/// Errors returned by a safety oracle.
///
/// Callers treat every variant the same way: the destination is assumed clean.
#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    #[error("Safety oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Safety oracle returned status {0}")]
    Status(u16),

    #[error("Safety oracle returned an unexpected body: {0}")]
    Decode(String),
}

/// Reputation check for destination URLs.
///
/// # Implementations
///
/// - [`crate::infrastructure::safety::VirusTotalVerifier`] - VirusTotal v3 URL reports
/// - [`crate::infrastructure::safety::NullSafetyVerifier`] - Always clean, used without an API key
#[async_trait]
pub trait SafetyVerifier: Send + Sync {
    /// Returns the engine counts for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError`] when the oracle cannot be reached or answers
    /// with something other than a report.
    async fn verify(&self, url: &str) -> Result<SafetyVerdict, SafetyError>;
}
