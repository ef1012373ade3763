//! VirusTotal v3 URL reputation client.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::service::{SafetyError, SafetyVerifier};
use crate::domain::entities::SafetyVerdict;

pub const DEFAULT_VIRUSTOTAL_API_URL: &str = "https://www.virustotal.com/api/v3";

#[derive(Debug, Deserialize)]
struct UrlReport {
    data: UrlReportData,
}

#[derive(Debug, Deserialize)]
struct UrlReportData {
    attributes: UrlReportAttributes,
}

#[derive(Debug, Deserialize)]
struct UrlReportAttributes {
    last_analysis_stats: AnalysisStats,
}

#[derive(Debug, Deserialize)]
struct AnalysisStats {
    #[serde(default)]
    malicious: u32,
    #[serde(default)]
    suspicious: u32,
}

/// Looks up the last analysis of a URL on VirusTotal.
///
/// A URL VirusTotal has never seen is submitted for scanning and reported
/// clean for now.
pub struct VirusTotalVerifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl VirusTotalVerifier {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// VirusTotal URL identifier: unpadded URL-safe base64 of the URL.
    pub fn url_id(url: &str) -> String {
        URL_SAFE_NO_PAD.encode(url)
    }

    async fn submit_for_scanning(&self, url: &str) {
        let result = self
            .client
            .post(format!("{}/urls", self.api_url))
            .header("x-apikey", &self.api_key)
            .form(&[("url", url)])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Submitted {} for scanning", url);
            }
            Ok(response) => warn!("VirusTotal submission returned {}", response.status()),
            Err(e) => warn!("VirusTotal submission failed: {}", e),
        }
    }
}

#[async_trait]
impl SafetyVerifier for VirusTotalVerifier {
    async fn verify(&self, url: &str) -> Result<SafetyVerdict, SafetyError> {
        let response = self
            .client
            .get(format!("{}/urls/{}", self.api_url, Self::url_id(url)))
            .header("x-apikey", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            self.submit_for_scanning(url).await;
            return Ok(SafetyVerdict::clean());
        }

        if !response.status().is_success() {
            return Err(SafetyError::Status(response.status().as_u16()));
        }

        let report: UrlReport = response
            .json()
            .await
            .map_err(|e| SafetyError::Decode(e.to_string()))?;
        let stats = report.data.attributes.last_analysis_stats;

        Ok(SafetyVerdict::new(stats.malicious, stats.suspicious))
    }
}
