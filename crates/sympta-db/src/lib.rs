//! sympta-db — SQLite persistence for users, sessions and reports.
//!
//! The core matching engine never touches this crate; the web layer calls
//! the repository functions here with data shapes produced by the matcher.

pub mod password;
pub mod reports;
pub mod sessions;
pub mod sqlite;
pub mod users;

pub use reports::{NewReport, Report};
pub use sqlite::{open_database, open_memory_database};
pub use users::User;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}
