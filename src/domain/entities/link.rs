//! Short link entity and its creation-time counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of suspicious engine flags at which a destination stops being safe.
pub const SUSPICIOUS_THRESHOLD: u32 = 3;

/// Safety oracle verdict snapshot taken when the link was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub malicious: u32,
    pub suspicious: u32,
}

impl SafetyVerdict {
    pub fn new(malicious: u32, suspicious: u32) -> Self {
        Self {
            malicious,
            suspicious,
        }
    }

    /// Verdict used when no answer could be obtained from the oracle.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Safe unless any engine flagged the URL as malicious or at least
    /// [`SUSPICIOUS_THRESHOLD`] engines flagged it as suspicious.
    pub fn is_safe(&self) -> bool {
        self.malicious == 0 && self.suspicious < SUSPICIOUS_THRESHOLD
    }
}

/// A stored short link.
///
/// Everything except `click_count` is immutable after creation. The password
/// hash never leaves the service layer; callers only see [`ShortLink::has_password`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub code: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i64>,
    pub click_count: i64,
    pub password_hash: Option<String>,
    pub safety_verdict: Option<SafetyVerdict>,
}

impl ShortLink {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Returns true if `expires_at` is set and lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Returns true if the link is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if a click quota is set and has been reached.
    pub fn is_maxed_out(&self) -> bool {
        self.max_clicks
            .is_some_and(|max_clicks| self.click_count >= max_clicks)
    }

    /// A stale link is expired or quota-exhausted but still stored.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.is_expired_at(now) || self.is_maxed_out()
    }
}

/// Input data for persisting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub code: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i64>,
    pub password_hash: Option<String>,
    pub safety_verdict: SafetyVerdict,
}

impl NewShortLink {
    /// Materializes the stored record with a zero click count.
    pub fn into_link(self) -> ShortLink {
        ShortLink {
            code: self.code,
            destination: self.destination,
            created_at: self.created_at,
            expires_at: self.expires_at,
            max_clicks: self.max_clicks,
            click_count: 0,
            password_hash: self.password_hash,
            safety_verdict: Some(self.safety_verdict),
        }
    }
}
