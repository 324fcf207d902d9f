//! Database operations: schema, connection helpers, user and book queries.

mod books;
mod connection;
mod users;

pub use books::{
    book_by_barcode, insert_book, legacy_loans, library_stats, list_books, loans,
    update_book_cover,
};
pub use connection::{db_file_size, open_db, open_db_in_memory};
pub use users::{
    delete_user, fetch_user_image, image_report_rows, insert_user, list_users, set_facial_data,
    set_password, update_user_image, user_count, user_id_by_email, user_image_status,
};

/// Schema mirrored from the backend server (idempotent). Columns the tool
/// never touches (OTP, phone, loan cover snapshots) stay so a database
/// created here is one the backend accepts as-is.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    enrollment_id TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    phone TEXT,
    image LONGBLOB,
    facial_data TEXT,
    two_fa_enabled BOOLEAN DEFAULT 1,
    otp_code TEXT,
    otp_expiry INTEGER,
    barcode_id TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn TEXT UNIQUE,
    barcode TEXT UNIQUE NOT NULL,
    quantity INTEGER DEFAULT 0,
    available INTEGER DEFAULT 0,
    category TEXT,
    cover_image LONGBLOB,
    cover_image_base64 TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS borrowed_books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    book_id INTEGER NOT NULL,
    book_barcode TEXT NOT NULL,
    cover_image_base64 TEXT,
    issued_date DATETIME DEFAULT CURRENT_TIMESTAMP,
    due_date DATETIME NOT NULL,
    return_date DATETIME,
    return_cover_image_base64 TEXT,
    status TEXT DEFAULT 'active',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (book_id) REFERENCES books(id)
);

CREATE TABLE IF NOT EXISTS borrowing (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    book_id INTEGER NOT NULL,
    book_barcode TEXT,
    cover_image LONGBLOB,
    borrow_date DATETIME DEFAULT CURRENT_TIMESTAMP,
    due_date DATETIME,
    return_date DATETIME,
    return_cover_image LONGBLOB,
    status TEXT DEFAULT 'active',
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (book_id) REFERENCES books(id)
);
"#;

/// Column list shared by the book queries.
pub(crate) const BOOK_COLUMNS: &str =
    "id, title, author, isbn, barcode, quantity, available, category, length(cover_image_base64)";
