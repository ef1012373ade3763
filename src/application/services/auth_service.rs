//! Authentication of administrative requests.

use hmac::{Hmac, Mac};
use rand::RngCore;
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Checks bearer tokens against the configured admin token.
///
/// Only the HMAC-SHA256 of the token (under a random per-process key) is kept
/// in memory, and candidates are compared with the MAC's constant-time check.
/// Without a configured token every request is rejected.
pub struct AuthService {
    key: [u8; 32],
    expected: Option<Vec<u8>>,
}

impl AuthService {
    /// Creates the service. `admin_token` of `None` (or empty) disables admin access.
    pub fn new(admin_token: Option<&str>) -> Self {
        let mut key = [0u8; 32];
        rand::rng().fill_bytes(&mut key);

        let expected = admin_token
            .filter(|token| !token.is_empty())
            .map(|token| Self::mac(&key, token).finalize().into_bytes().to_vec());

        Self { key, expected }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    fn mac(key: &[u8], token: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        mac
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if admin access is disabled or the
    /// token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let Some(expected) = &self.expected else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Admin access is not configured" }),
            ));
        };

        Self::mac(&self.key, token)
            .verify_slice(expected)
            .map_err(|_| AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new(Some("s3cret-admin-token"));

        assert!(service.is_enabled());
        assert!(service.authenticate("s3cret-admin-token").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new(Some("s3cret-admin-token"));

        let result = service.authenticate("s3cret-admin-tokeN");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_disabled_without_token() {
        for service in [AuthService::new(None), AuthService::new(Some(""))] {
            assert!(!service.is_enabled());
            assert!(matches!(
                service.authenticate(""),
                Err(AppError::Unauthorized { .. })
            ));
        }
    }

    #[test]
    fn test_keys_differ_per_instance() {
        let a = AuthService::new(Some("token"));
        let b = AuthService::new(Some("token"));

        assert_ne!(a.expected, b.expected);
    }
}
