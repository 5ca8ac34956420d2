//! Application layer services implementing business logic.
//!
//! Services validate input, enforce code uniqueness through the store, and
//! bound every storage call with a deadline. Handlers call services; services
//! call the [`LinkRepository`](crate::domain::repositories::LinkRepository) trait.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, listing and deletion
//! - [`services::redirect_service::RedirectService`] - Redirect resolution, click recording and stats

pub mod services;
