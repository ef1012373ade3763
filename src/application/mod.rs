//! Application layer services implementing business logic.
//!
//! Services orchestrate domain rules, repositories and infrastructure
//! collaborators, and give HTTP handlers and the admin CLI one API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution, ranking and cleanup
//! - [`services::auth_service::AuthService`] - Admin bearer-token authentication

pub mod services;
