//! Queries against the `books` table and the two borrow-record tables.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::types::{BookSummary, LibraryStats, LoanRecord};

use super::BOOK_COLUMNS;

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<BookSummary> {
    Ok(BookSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        barcode: row.get(4)?,
        quantity: row.get(5)?,
        available: row.get(6)?,
        category: row.get(7)?,
        cover_chars: row.get(8)?,
    })
}

/// Insert a book with `isbn = barcode`, every copy available, category
/// "General". Returns the new row id; a duplicate barcode or ISBN is a
/// domain error naming the barcode.
pub fn insert_book(
    conn: &Connection,
    title: &str,
    author: &str,
    barcode: &str,
    quantity: i64,
) -> Result<i64> {
    let result = conn.execute(
        "INSERT INTO books (title, author, isbn, barcode, quantity, available, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![title, author, barcode, barcode, quantity, quantity, "General"],
    );
    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            bail!("barcode {barcode:?} already exists in the books table")
        }
        Err(e) => Err(e).context("insert book"),
    }
}

/// Store the cover data URI for the book with `barcode`. Returns the
/// affected row count.
pub fn update_book_cover(conn: &Connection, barcode: &str, data_uri: &str) -> Result<usize> {
    conn.execute(
        "UPDATE books SET cover_image_base64 = ?1 WHERE barcode = ?2",
        params![data_uri, barcode],
    )
    .context("update book cover")
}

/// The book with `barcode`, if any.
pub fn book_by_barcode(conn: &Connection, barcode: &str) -> Result<Option<BookSummary>> {
    conn.query_row(
        &format!("SELECT {BOOK_COLUMNS} FROM books WHERE barcode = ?1"),
        params![barcode],
        book_from_row,
    )
    .optional()
    .context("look up book by barcode")
}

/// All books, ordered by id.
pub fn list_books(conn: &Connection) -> Result<Vec<BookSummary>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
    let rows = stmt.query_map([], book_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("list books")
}

/// Current borrow records, newest first, joined with book titles.
pub fn loans(conn: &Connection) -> Result<Vec<LoanRecord>> {
    let mut stmt = conn.prepare(
        "SELECT bb.id, bb.user_id, bb.book_id, bb.book_barcode, bb.issued_date,
                bb.due_date, bb.return_date, bb.status, b.title
         FROM borrowed_books bb
         LEFT JOIN books b ON bb.book_id = b.id
         ORDER BY bb.issued_date DESC",
    )?;
    let rows = stmt.query_map([], loan_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("list borrow records")
}

/// Legacy borrow records, newest first. No title join; the old table
/// predates the books table in some databases.
pub fn legacy_loans(conn: &Connection) -> Result<Vec<LoanRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, book_id, book_barcode, borrow_date,
                due_date, return_date, status, NULL
         FROM borrowing
         ORDER BY borrow_date DESC",
    )?;
    let rows = stmt.query_map([], loan_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("list legacy borrow records")
}

fn loan_from_row(row: &Row<'_>) -> rusqlite::Result<LoanRecord> {
    Ok(LoanRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        book_id: row.get(2)?,
        barcode: row.get(3)?,
        issued: row.get(4)?,
        due: row.get(5)?,
        returned: row.get(6)?,
        status: row.get(7)?,
        title: row.get(8)?,
    })
}

/// Availability sums and per-status loan counts.
pub fn library_stats(conn: &Connection) -> Result<LibraryStats> {
    let (books_available, books_total) = conn
        .query_row(
            "SELECT COALESCE(SUM(available), 0), COALESCE(SUM(quantity), 0) FROM books",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .context("sum book availability")?;
    let count_by = |status: &str| -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM borrowed_books WHERE status = ?1",
            params![status],
            |row| row.get(0),
        )
        .context("count loans by status")
    };
    Ok(LibraryStats {
        books_available,
        books_total,
        active_loans: count_by("active")?,
        returned_loans: count_by("returned")?,
        reissued_loans: count_by("reissued")?,
    })
}
