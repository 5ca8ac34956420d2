//! Utility functions for code generation, URL validation, and database errors.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Classification of PostgreSQL constraint errors

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
