//! sympta-common — shared error types for the Sympta workspace.

pub mod error;

pub use error::ApiError;
