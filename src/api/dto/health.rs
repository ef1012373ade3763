//! Body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Error,
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct Probe {
    pub status: ProbeStatus,
    pub message: String,
}

impl Probe {
    pub fn passed(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Ok,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Probes {
    pub storage: Probe,
    pub rate_limiter: Probe,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: Probes,
}

impl HealthResponse {
    /// Degraded as soon as any probe failed.
    pub fn from_probes(checks: Probes) -> Self {
        let status = if [&checks.storage, &checks.rate_limiter]
            .iter()
            .all(|probe| probe.status == ProbeStatus::Ok)
        {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}
