//! End-to-end tests through the public API.

pub mod arrays;
pub mod properties;
pub mod scenarios;
pub mod server_errors;
