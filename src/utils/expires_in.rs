//! Parsing of relative expiry durations such as `24h` or `7d`.

use chrono::Duration;
use regex::Regex;
use std::sync::LazyLock;

static EXPIRES_IN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,6})([mhdw])$").expect("valid regex"));

/// Longest accepted lifetime for a link.
pub const MAX_EXPIRES_IN_DAYS: i64 = 365;

/// Errors produced by [`parse_expires_in`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpiresInError {
    #[error("expiresIn must look like 30m, 24h, 7d or 2w, got '{0}'")]
    InvalidFormat(String),

    #[error("expiresIn must be greater than zero")]
    Zero,

    #[error("expiresIn must not exceed 365 days")]
    TooLong,
}

/// Parses `<n><unit>` where unit is `m` (minutes), `h`, `d` or `w`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use linkgate::utils::expires_in::parse_expires_in;
///
/// assert_eq!(parse_expires_in("24h").unwrap(), Duration::hours(24));
/// assert_eq!(parse_expires_in("7d").unwrap(), Duration::days(7));
/// ```
pub fn parse_expires_in(input: &str) -> Result<Duration, ExpiresInError> {
    let trimmed = input.trim();
    let captures = EXPIRES_IN_REGEX
        .captures(trimmed)
        .ok_or_else(|| ExpiresInError::InvalidFormat(input.to_string()))?;

    let amount: i64 = captures[1]
        .parse()
        .map_err(|_| ExpiresInError::InvalidFormat(input.to_string()))?;

    if amount == 0 {
        return Err(ExpiresInError::Zero);
    }

    let duration = match &captures[2] {
        "m" => Duration::minutes(amount),
        "h" => Duration::hours(amount),
        "d" => Duration::days(amount),
        "w" => Duration::weeks(amount),
        _ => return Err(ExpiresInError::InvalidFormat(input.to_string())),
    };

    if duration > Duration::days(MAX_EXPIRES_IN_DAYS) {
        return Err(ExpiresInError::TooLong);
    }

    Ok(duration)
}
