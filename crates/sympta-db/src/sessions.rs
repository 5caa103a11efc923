//! Server-side login sessions.
//!
//! The cookie only carries an opaque random token; everything else lives in
//! the sessions table so logout invalidates immediately.

use chrono::Utc;
use rand::RngCore;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::users::{find_by_id, User};
use crate::DatabaseError;

const TOKEN_BYTES: usize = 32;

/// Create a session for the user and return its token.
pub fn create_session(conn: &Connection, user_id: &Uuid) -> Result<String, DatabaseError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, user_id.to_string(), Utc::now().to_rfc3339()],
    )?;
    Ok(token)
}

/// Resolve a session token to its user, if the session is still live.
pub fn find_user_by_token(
    conn: &Connection,
    token: &str,
) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        "SELECT user_id FROM sessions WHERE token = ?1",
        params![token],
        |row| row.get::<_, String>(0),
    );
    match result {
        Ok(user_id) => {
            let id = Uuid::parse_str(&user_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
            find_by_id(conn, &id)
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove a session (logout). Removing an unknown token is a no-op.
pub fn delete_session(conn: &Connection, token: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::open_memory_database;
    use crate::users::create_user;

    #[test]
    fn session_round_trip() {
        let conn = open_memory_database().unwrap();
        let user = create_user(&conn, "alice", "secret").unwrap();

        let token = create_session(&conn, &user.id).unwrap();
        let resolved = find_user_by_token(&conn, &token).unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        delete_session(&conn, &token).unwrap();
        assert!(find_user_by_token(&conn, &token).unwrap().is_none());
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let conn = open_memory_database().unwrap();
        assert!(find_user_by_token(&conn, "deadbeef").unwrap().is_none());
        delete_session(&conn, "deadbeef").unwrap();
    }

    #[test]
    fn tokens_are_unique() {
        let conn = open_memory_database().unwrap();
        let user = create_user(&conn, "alice", "secret").unwrap();
        let a = create_session(&conn, &user.id).unwrap();
        let b = create_session(&conn, &user.id).unwrap();
        assert_ne!(a, b);
    }
}
