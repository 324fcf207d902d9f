//! Open the library database and ensure the schema exists.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use crate::utils::config::DB_BUSY_TIMEOUT_MS;

use super::SCHEMA;

/// Busy timeout plus the idempotent schema. Safe to run on every open.
/// Foreign keys are switched off explicitly (the bundled SQLite defaults
/// them on), as in the backend server: deleting a user must work even when
/// borrow records still reference the row.
fn setup_connection(conn: &Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(DB_BUSY_TIMEOUT_MS))
        .context("set busy timeout")?;
    conn.pragma_update(None, "foreign_keys", false)
        .context("disable foreign key enforcement")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    Ok(())
}

/// Open or create the library DB and ensure the schema exists.
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("open database at {}", path.display()))?;
    setup_connection(&conn)?;
    Ok(conn)
}

/// Open an in-memory DB with the same schema (for tests and dry runs).
pub fn open_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory database")?;
    setup_connection(&conn)?;
    Ok(conn)
}

/// Size of the database file in bytes, when it exists.
pub fn db_file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}
