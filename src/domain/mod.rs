//! Domain layer containing business entities and logic.
//!
//! Nothing in this layer performs I/O. Storage is reached only through the
//! [`repositories`] traits, implemented in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`gatekeeper`] - Per-request classification of a stored link
//! - [`variant_ranker`] - Ordering and pruning of links sharing a destination
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives a code
//! 2. The record is fetched through [`repositories::LinkRepository`]
//! 3. [`gatekeeper::LinkState::classify`] decides between not-found, expired,
//!    quota-exceeded and active
//! 4. Active links get an atomic click increment, then a redirect

pub mod entities;
pub mod gatekeeper;
pub mod repositories;
pub mod variant_ranker;
