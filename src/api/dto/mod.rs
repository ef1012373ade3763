//! Data Transfer Objects for API requests and responses.
//!
//! Link DTOs use camelCase field names. Request bodies also accept the legacy
//! names `shortCode` and `longUrl`.

pub mod check_code;
pub mod create_link;
pub mod health;
pub mod stats;
pub mod variants;
pub mod verify_password;

use serde::{Deserialize, Deserializer};

/// Deserializes blank strings as `None`.
///
/// Form clients send `""` for fields the user left empty.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
