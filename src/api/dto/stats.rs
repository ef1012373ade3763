//! DTOs for the link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(alias = "shortCode")]
    pub code: String,
}

/// Public view of one link. The password hash is reduced to a flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub code: String,
    pub destination: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i64>,
    pub has_password: bool,
    pub is_expired: bool,
    pub is_maxed_out: bool,
}

impl From<ShortLink> for StatsResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            is_expired: link.is_expired(),
            is_maxed_out: link.is_maxed_out(),
            has_password: link.has_password(),
            code: link.code,
            destination: link.destination,
            click_count: link.click_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            max_clicks: link.max_clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_hides_password_hash() {
        let link = ShortLink {
            code: "Ab12Cd".to_string(),
            destination: "https://example.com".to_string(),
            created_at: Utc::now() - Duration::days(2),
            expires_at: Some(Utc::now() - Duration::days(1)),
            max_clicks: Some(3),
            click_count: 3,
            password_hash: Some("$argon2id$secret".to_string()),
            safety_verdict: None,
        };

        let body = serde_json::to_value(StatsResponse::from(link)).unwrap();

        assert_eq!(body["hasPassword"], true);
        assert_eq!(body["isExpired"], true);
        assert_eq!(body["isMaxedOut"], true);
        assert_eq!(body["clickCount"], 3);
        assert!(!body.to_string().contains("argon2"));
    }
}
