//! Destination reputation checks.
//!
//! Provides a [`SafetyVerifier`] trait with two implementations:
//! - [`VirusTotalVerifier`] - VirusTotal v3 URL reports
//! - [`NullSafetyVerifier`] - Reports everything clean

mod null_verifier;
mod service;
mod virustotal;

pub use null_verifier::NullSafetyVerifier;
pub use service::{SafetyError, SafetyVerifier};
pub use virustotal::{DEFAULT_VIRUSTOTAL_API_URL, VirusTotalVerifier};
