//! Storage contracts of the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Unit tests
//! use the `mockall` generated `MockLinkRepository`, integration tests the
//! in-memory store.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
