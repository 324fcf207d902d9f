//! Public types for the stacksmith API: table rows, flow reports, options.

use std::path::PathBuf;

use crate::placeholder::PlaceholderKind;

/// Resolved runtime options shared by every command.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Backend directory: where images are looked up and the default DB lives.
    pub dir: PathBuf,
    /// Resolved database path (flag, env, settings file, or `dir/library.db`).
    pub db_path: PathBuf,
    pub verbose: bool,
}

/// One row of the `users` table, identity fields only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// NOT NULL in the current schema; databases from older backend versions
    /// carry NULLs here.
    pub enrollment_id: Option<String>,
}

/// Identity fields plus stored profile image length for one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserImageStatus {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Byte length of the stored payload, None when the image column is NULL.
    pub image_len: Option<i64>,
}

impl UserImageStatus {
    /// Status string in the backend's reporting format.
    pub fn status_line(&self) -> String {
        match self.image_len {
            Some(n) => format!("Image exists ({n} bytes)"),
            None => "No image".to_string(),
        }
    }
}

/// One row of the `books` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub barcode: String,
    pub quantity: i64,
    pub available: i64,
    pub category: Option<String>,
    /// Character length of the stored cover data URI, None when absent.
    pub cover_chars: Option<i64>,
}

/// One borrow record, from the current table (joined with book titles) or
/// the legacy one (no titles).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoanRecord {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub barcode: Option<String>,
    pub issued: Option<String>,
    pub due: Option<String>,
    pub returned: Option<String>,
    pub status: Option<String>,
    pub title: Option<String>,
}

/// Aggregate counters for the `show` report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub books_available: i64,
    pub books_total: i64,
    pub active_loans: i64,
    pub returned_loans: i64,
    pub reissued_loans: i64,
}

/// Every table plus the summary counters, for the `show` report.
#[derive(Clone, Debug)]
pub struct LibrarySnapshot {
    pub users: Vec<UserSummary>,
    pub books: Vec<BookSummary>,
    pub loans: Vec<LoanRecord>,
    pub legacy_loans: Vec<LoanRecord>,
    pub stats: LibraryStats,
}

/// How the source image for an attach run was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Path given on the command line.
    Explicit,
    /// The default profile image in the backend directory.
    Default,
    /// Found by scanning the backend directory.
    Discovered,
    /// Synthesized because nothing was on disk.
    Placeholder(PlaceholderKind),
}

/// Outcome of the attach-image flow.
#[derive(Clone, Debug)]
pub struct AttachReport {
    pub image_path: PathBuf,
    pub source: ImageSource,
    pub bytes_written: usize,
    /// Blake3 digest of the payload, verified against the stored row.
    pub digest: String,
    pub user: UserImageStatus,
}

/// Outcome of the attach-cover flow.
#[derive(Clone, Debug)]
pub struct CoverReport {
    pub image_path: PathBuf,
    pub file_len: usize,
    pub book: BookSummary,
}

/// Outcome of seeding the demo user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Row inserted with this id.
    Created(i64),
    /// A user with the email already existed; nothing was written.
    Exists(i64),
}

/// Outcome of the delete-users flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<i64>,
    pub missing: Vec<i64>,
    /// Users left in the table afterwards.
    pub remaining: i64,
}

/// The `images` report: per-user status plus database file facts.
#[derive(Clone, Debug)]
pub struct ImageReport {
    pub rows: Vec<UserImageStatus>,
    pub db_path: PathBuf,
    pub db_size: Option<u64>,
}
