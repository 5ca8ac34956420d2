//! Core domain entities.
//!
//! The service has a single entity, [`Link`]. Creation input is modelled
//! separately as [`NewLink`] since `id`, click accounting and `created_at`
//! are assigned by the store.

pub mod link;

pub use link::{Link, NewLink};
