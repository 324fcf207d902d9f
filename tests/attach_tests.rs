//! Attach flow tests: placeholder synthesis, round-trip storage, verification,
//! and the failure paths that must leave the database untouched.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use stacksmith::ImageSource;
use stacksmith::attach::{COVER_DATA_URI_PREFIX, attach_book_cover, attach_user_image};
use stacksmith::engine::db_ops::{
    fetch_user_image, insert_book, open_db, update_user_image,
};
use stacksmith::placeholder::MINIMAL_JPEG;

fn backend_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("library.db");
    (dir, db_path)
}

fn seed_user(db_path: &Path, id: i64, name: &str, email: &str) {
    let conn = open_db(db_path).unwrap();
    conn.execute(
        "INSERT INTO users (id, enrollment_id, name, email, password) VALUES (?1, ?2, ?3, ?4, 'x')",
        rusqlite::params![id, format!("ENR{id:03}"), name, email],
    )
    .unwrap();
}

fn stored_image(db_path: &Path, id: i64) -> Option<Vec<u8>> {
    let conn = open_db(db_path).unwrap();
    fetch_user_image(&conn, id).unwrap()
}

// --- attach-image ---

#[test]
fn test_attach_explicit_image_round_trip() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    let bytes: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
    let image_path = dir.path().join("me.jpg");
    std::fs::write(&image_path, &bytes).unwrap();

    let report = attach_user_image(&db_path, dir.path(), 6, Some(&image_path)).unwrap();
    assert_eq!(report.source, ImageSource::Explicit);
    assert_eq!(report.bytes_written, bytes.len());
    assert_eq!(report.digest, blake3::hash(&bytes).to_hex().to_string());

    // Reported length equals the payload length, stored bytes are identical.
    assert_eq!(report.user.image_len, Some(bytes.len() as i64));
    assert_eq!(stored_image(&db_path, 6).unwrap(), bytes);
}

#[test]
fn test_attach_missing_explicit_path_errors_and_leaves_db() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");
    {
        let conn = open_db(&db_path).unwrap();
        update_user_image(&conn, 6, b"before").unwrap();
    }

    let missing = dir.path().join("nope.jpg");
    let err = attach_user_image(&db_path, dir.path(), 6, Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");

    // Explicit paths never fall back to a placeholder, and nothing is written.
    assert!(!dir.path().join("profile.jpg").exists());
    assert_eq!(stored_image(&db_path, 6).unwrap(), b"before");
}

#[cfg(not(feature = "render"))]
#[test]
fn test_attach_synthesizes_minimal_jpeg_when_nothing_on_disk() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    let report = attach_user_image(&db_path, dir.path(), 6, None).unwrap();
    assert_eq!(
        report.source,
        ImageSource::Placeholder(stacksmith::placeholder::PlaceholderKind::MinimalJpeg)
    );

    let placeholder = dir.path().join("profile.jpg");
    assert_eq!(std::fs::read(&placeholder).unwrap(), MINIMAL_JPEG);
    assert_eq!(stored_image(&db_path, 6).unwrap(), MINIMAL_JPEG);
    assert_eq!(report.user.image_len, Some(MINIMAL_JPEG.len() as i64));
}

#[cfg(feature = "render")]
#[test]
fn test_attach_synthesizes_rendered_placeholder() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    let report = attach_user_image(&db_path, dir.path(), 6, None).unwrap();
    assert_eq!(
        report.source,
        ImageSource::Placeholder(stacksmith::placeholder::PlaceholderKind::Rendered)
    );

    let bytes = std::fs::read(dir.path().join("profile.jpg")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(stored_image(&db_path, 6).unwrap(), bytes);
}

#[test]
fn test_attach_uses_default_profile_image() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    let bytes = b"jpeg bytes pretending hard";
    std::fs::write(dir.path().join("profile.jpg"), bytes).unwrap();

    let report = attach_user_image(&db_path, dir.path(), 6, None).unwrap();
    assert_eq!(report.source, ImageSource::Default);
    assert_eq!(stored_image(&db_path, 6).unwrap(), bytes);
}

#[test]
fn test_attach_discovers_image_in_directory() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    let bytes = b"png-ish";
    std::fs::write(dir.path().join("photo.PNG"), bytes).unwrap();

    let report = attach_user_image(&db_path, dir.path(), 6, None).unwrap();
    assert_eq!(report.source, ImageSource::Discovered);
    assert!(report.image_path.ends_with("photo.PNG"));
    assert_eq!(stored_image(&db_path, 6).unwrap(), bytes);
}

#[test]
fn test_attach_discovery_prefers_profile_stem() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 6, "Priyanshu Sharma", "priyanshu@example.com");

    std::fs::write(dir.path().join("aaa.jpg"), b"first alphabetically").unwrap();
    std::fs::write(dir.path().join("profile_pic.png"), b"the real one").unwrap();

    let report = attach_user_image(&db_path, dir.path(), 6, None).unwrap();
    assert!(report.image_path.ends_with("profile_pic.png"));
    assert_eq!(stored_image(&db_path, 6).unwrap(), b"the real one");
}

#[test]
fn test_attach_missing_user_errors_and_other_rows_untouched() {
    let (dir, db_path) = backend_dir();
    seed_user(&db_path, 1, "Amit Kumar", "amit@example.com");
    seed_user(&db_path, 2, "Priya Patel", "priya@example.com");
    {
        let conn = open_db(&db_path).unwrap();
        update_user_image(&conn, 1, b"image-a").unwrap();
        update_user_image(&conn, 2, b"image-b").unwrap();
    }

    let image_path = dir.path().join("me.jpg");
    std::fs::write(&image_path, b"new payload").unwrap();

    let err = attach_user_image(&db_path, dir.path(), 6, Some(&image_path)).unwrap_err();
    assert!(err.to_string().contains("no user row"), "got: {err}");
    assert_eq!(stored_image(&db_path, 1).unwrap(), b"image-a");
    assert_eq!(stored_image(&db_path, 2).unwrap(), b"image-b");
}

// --- attach-cover ---

#[test]
fn test_attach_cover_stores_data_uri() {
    let (dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_book(&conn, "Clean Code", "Robert C. Martin", "BAR001004", 2).unwrap();
    }

    let bytes = b"cover jpeg bytes";
    let image_path = dir.path().join("cover.jpg");
    std::fs::write(&image_path, bytes).unwrap();

    let report = attach_book_cover(&db_path, "BAR001004", &image_path).unwrap();
    assert_eq!(report.file_len, bytes.len());

    let expected = format!("{COVER_DATA_URI_PREFIX}{}", STANDARD.encode(bytes));
    let conn = open_db(&db_path).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT cover_image_base64 FROM books WHERE barcode = 'BAR001004'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, expected);
    assert_eq!(report.book.cover_chars, Some(expected.len() as i64));
}

#[test]
fn test_attach_cover_unknown_barcode_errors() {
    let (dir, db_path) = backend_dir();
    let image_path = dir.path().join("cover.jpg");
    std::fs::write(&image_path, b"bytes").unwrap();

    let err = attach_book_cover(&db_path, "BAR999999", &image_path).unwrap_err();
    assert!(err.to_string().contains("BAR999999"), "got: {err}");
}

#[test]
fn test_attach_cover_missing_file_errors() {
    let (dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_book(&conn, "1984", "George Orwell", "BAR001002", 1).unwrap();
    }

    let err =
        attach_book_cover(&db_path, "BAR001002", &dir.path().join("gone.jpg")).unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
}
