//! User accounts.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password::{hash_password, verify_password};
use crate::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new user with a hashed password. Fails when the username is
/// already taken.
pub fn create_user(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<User, DatabaseError> {
    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        created_at: Utc::now(),
    };
    let result = conn.execute(
        "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id.to_string(),
            user.username,
            hash_password(password),
            user.created_at.to_rfc3339(),
        ],
    );
    match result {
        Ok(_) => Ok(user),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DatabaseError::UsernameTaken(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, username, created_at FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    );
    match result {
        Ok((id, username, created_at)) => Ok(Some(parse_user(&id, username, &created_at)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, username, created_at FROM users WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    );
    match result {
        Ok((id, username, created_at)) => Ok(Some(parse_user(&id, username, &created_at)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials; returns the user when username and password both
/// check out, `None` otherwise (caller cannot tell which was wrong).
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, username, created_at, password_hash FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    );
    match result {
        Ok((id, username, created_at, stored_hash)) => {
            if verify_password(password, &stored_hash) {
                Ok(Some(parse_user(&id, username, &created_at)?))
            } else {
                Ok(None)
            }
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_user(id: &str, username: String, created_at: &str) -> Result<User, DatabaseError> {
    Ok(User {
        id: Uuid::parse_str(id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        username,
        created_at: DateTime::parse_from_rfc3339(created_at)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?
            .with_timezone(&Utc),
    })
}
