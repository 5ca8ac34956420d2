//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interface that abstracts data access
//! following the Repository pattern. Concrete stores live in
//! `crate::infrastructure::persistence`.
//!
//! # Testing
//!
//! A mock implementation is auto-generated via `mockall` for unit tests.
//! See integration tests in `tests/repository_link.rs` for the PostgreSQL store.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
