//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A stored code → destination mapping with its gating fields
//! - [`NewShortLink`] - Creation input for a link
//! - [`SafetyVerdict`] - Safety oracle snapshot stored with each link

pub mod link;

pub use link::{NewShortLink, SafetyVerdict, ShortLink};
