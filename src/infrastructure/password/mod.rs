//! One-way hashing of link passwords.
//!
//! - [`PasswordHasher`] - Hashing seam used by the link service
//! - [`Argon2PasswordHasher`] - Argon2id with a random salt per hash

mod argon2_hasher;

pub use argon2_hasher::Argon2PasswordHasher;

/// Password hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hash error: {0}")]
    Hash(String),

    #[error("Password verify error: {0}")]
    Verify(String),
}

/// Hashes link passwords and checks candidates against stored hashes.
///
/// Both operations are CPU-bound; async callers run them on a blocking thread.
pub trait PasswordHasher: Send + Sync {
    /// Produces a self-describing hash string that embeds its salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Hash`] if hashing fails.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Returns whether `plaintext` matches `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Verify`] if `hash` is not a valid hash string.
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError>;
}
