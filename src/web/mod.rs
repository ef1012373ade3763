//! Server-rendered HTML for the redirect path.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`pages`] - Not-found, expired, quota-exceeded and error pages

pub mod pages;
