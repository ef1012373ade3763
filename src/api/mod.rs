//! JSON API and redirect endpoints.
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - One handler per endpoint
//! - [`middleware`] - Admin auth, rate limit headers, tracing
//! - [`routes`] - Public and admin route tables mounted under `/api`

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
