//! HTTP middleware for request processing and protection.
//!
//! Admin authentication, rate limit headers and request tracing.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
