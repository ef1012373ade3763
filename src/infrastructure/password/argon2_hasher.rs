use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use super::{PasswordError, PasswordHasher};

/// Argon2id hasher with default parameters.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::Verify(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "correct horse");
        assert!(hasher.verify(&hash, "correct horse").unwrap());
        assert!(!hasher.verify(&hash, "wrong horse").unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = Argon2PasswordHasher::new();
        let a = hasher.hash("password123").unwrap();
        let b = hasher.hash("password123").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2PasswordHasher::new();
        assert!(matches!(
            hasher.verify("not-a-hash", "password123"),
            Err(PasswordError::Verify(_))
        ));
    }
}
