//! Queries against the `users` table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::types::{UserImageStatus, UserSummary};

/// Store `bytes` as the user's profile image. Returns the affected row count.
pub fn update_user_image(conn: &Connection, user_id: i64, bytes: &[u8]) -> Result<usize> {
    conn.execute(
        "UPDATE users SET image = ?1 WHERE id = ?2",
        params![bytes, user_id],
    )
    .context("update user image")
}

/// Identity fields plus stored image length for one user, if the row exists.
pub fn user_image_status(conn: &Connection, user_id: i64) -> Result<Option<UserImageStatus>> {
    conn.query_row(
        "SELECT id, name, email, length(image) FROM users WHERE id = ?1",
        params![user_id],
        |row| {
            Ok(UserImageStatus {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                image_len: row.get(3)?,
            })
        },
    )
    .optional()
    .context("query user image status")
}

/// Raw stored payload for one user. None when the row is missing or the
/// image column is NULL.
pub fn fetch_user_image(conn: &Connection, user_id: i64) -> Result<Option<Vec<u8>>> {
    let blob: Option<Option<Vec<u8>>> = conn
        .query_row(
            "SELECT image FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .context("fetch user image")?;
    Ok(blob.flatten())
}

/// All users, ordered by id.
pub fn list_users(conn: &Connection) -> Result<Vec<UserSummary>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, enrollment_id FROM users ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(UserSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            enrollment_id: row.get(3)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("list users")
}

/// Image status for every user, ordered by id.
pub fn image_report_rows(conn: &Connection) -> Result<Vec<UserImageStatus>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, length(image) FROM users ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(UserImageStatus {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            image_len: row.get(3)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("query image report")
}

/// Id of the user with `email`, if any.
pub fn user_id_by_email(conn: &Connection, email: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM users WHERE email = ?1",
        params![email],
        |row| row.get(0),
    )
    .optional()
    .context("look up user by email")
}

/// Insert a user row with a hashed password and facial profile JSON.
/// Returns the new row id.
pub fn insert_user(
    conn: &Connection,
    name: &str,
    email: &str,
    enrollment_id: &str,
    password_hash: &str,
    facial_json: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (enrollment_id, name, email, password, facial_data)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![enrollment_id, name, email, password_hash, facial_json],
    )
    .context("insert user")?;
    Ok(conn.last_insert_rowid())
}

/// Store a new password hash for the user with `email`. Returns the affected
/// row count.
pub fn set_password(conn: &Connection, email: &str, password_hash: &str) -> Result<usize> {
    conn.execute(
        "UPDATE users SET password = ?1 WHERE email = ?2",
        params![password_hash, email],
    )
    .context("update password")
}

/// Store facial profile JSON for one user. Returns the affected row count.
pub fn set_facial_data(conn: &Connection, user_id: i64, facial_json: &str) -> Result<usize> {
    conn.execute(
        "UPDATE users SET facial_data = ?1 WHERE id = ?2",
        params![facial_json, user_id],
    )
    .context("update facial data")
}

/// Delete one user row by id. Returns the affected row count.
pub fn delete_user(conn: &Connection, user_id: i64) -> Result<usize> {
    conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])
        .context("delete user")
}

/// Number of rows in the users table.
pub fn user_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .context("count users")
}
