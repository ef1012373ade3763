//! Utility functions shared across layers.
//!
//! - [`validation`] - Destination, code and password predicates
//! - [`code_generator`] - Random short code generation
//! - [`expires_in`] - Relative expiry parsing (`24h`, `7d`, ...)
//! - [`client_identity`] - Rate-limit identity from forwarded headers

pub mod client_identity;
pub mod code_generator;
pub mod expires_in;
pub mod validation;
