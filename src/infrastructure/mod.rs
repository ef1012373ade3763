//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and the
//! application services.
//!
//! # Modules
//!
//! - [`persistence`] - Link repositories (PostgreSQL and in-memory)
//! - [`rate_limit`] - Fixed-window admission control (Redis and in-memory)
//! - [`safety`] - Destination reputation checks (VirusTotal and no-op)
//! - [`password`] - Argon2 password hashing

pub mod password;
pub mod persistence;
pub mod rate_limit;
pub mod safety;
