//! Resolution state machine for stored links.
//!
//! The state is never persisted: it is re-derived from the record on every
//! lookup, so a link becomes `Expired` or `QuotaExceeded` without any write.

use chrono::{DateTime, Utc};

use crate::domain::entities::ShortLink;

/// Accessibility of a short code at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    NotFound,
    Expired,
    QuotaExceeded,
    Active,
}

impl LinkState {
    /// Classifies a fetched record.
    ///
    /// Precedence is fixed: missing record, then expiry, then quota. Password
    /// protection is metadata and does not take part in the classification.
    pub fn classify(link: Option<&ShortLink>, now: DateTime<Utc>) -> Self {
        match link {
            None => Self::NotFound,
            Some(link) if link.is_expired_at(now) => Self::Expired,
            Some(link) if link.is_maxed_out() => Self::QuotaExceeded,
            Some(_) => Self::Active,
        }
    }

    /// Terminal states end the resolution without counting a click.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Active => "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(
        expires_at: Option<DateTime<Utc>>,
        max_clicks: Option<i64>,
        clicks: i64,
        password: bool,
    ) -> ShortLink {
        ShortLink {
            code: "Ab12Cd".to_string(),
            destination: "https://example.com/a".to_string(),
            created_at: Utc::now() - Duration::days(2),
            expires_at,
            max_clicks,
            click_count: clicks,
            password_hash: password.then(|| "hash".to_string()),
            safety_verdict: None,
        }
    }

    #[test]
    fn test_missing_record_is_not_found() {
        assert_eq!(LinkState::classify(None, Utc::now()), LinkState::NotFound);
    }

    #[test]
    fn test_past_expiry_wins_over_everything_else() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(1));

        for (max_clicks, clicks) in [(None, 0), (Some(10), 0), (Some(10), 10), (Some(1), 99)] {
            let link = link(past, max_clicks, clicks, false);
            assert_eq!(LinkState::classify(Some(&link), now), LinkState::Expired);
        }
    }

    #[test]
    fn test_quota_reached_is_quota_exceeded() {
        let now = Utc::now();
        let future = Some(now + Duration::hours(1));

        let no_expiry = link(None, Some(3), 3, false);
        let later_expiry = link(future, Some(3), 4, false);

        assert_eq!(
            LinkState::classify(Some(&no_expiry), now),
            LinkState::QuotaExceeded
        );
        assert_eq!(
            LinkState::classify(Some(&later_expiry), now),
            LinkState::QuotaExceeded
        );
    }

    #[test]
    fn test_password_does_not_gate_active() {
        let link = link(None, None, 0, true);
        assert_eq!(LinkState::classify(Some(&link), Utc::now()), LinkState::Active);
    }

    #[test]
    fn test_below_quota_and_before_expiry_is_active() {
        let now = Utc::now();
        let link = link(Some(now + Duration::minutes(5)), Some(3), 2, false);

        let state = LinkState::classify(Some(&link), now);
        assert_eq!(state, LinkState::Active);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_classification_follows_the_clock() {
        let now = Utc::now();
        let link = link(Some(now + Duration::hours(24)), None, 0, false);

        assert_eq!(LinkState::classify(Some(&link), now), LinkState::Active);
        assert_eq!(
            LinkState::classify(Some(&link), now + Duration::hours(25)),
            LinkState::Expired
        );
    }
}
