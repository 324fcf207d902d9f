//! Admin flow tests: seeding, passwords, descriptors, books, deletion.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use stacksmith::SeedOutcome;
use stacksmith::admin::{
    SeedUserParams, add_book, delete_users, refresh_descriptor, seed_user, set_password,
};
use stacksmith::engine::db_ops::{insert_user, open_db};
use stacksmith::facial::{DESCRIPTOR_LEN, FacialProfile};
use stacksmith::utils::verify_password;

fn backend_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("library.db");
    (dir, db_path)
}

fn demo_params() -> SeedUserParams {
    SeedUserParams {
        name: "Priyanshu Sharma".to_string(),
        email: "priyanshu.sharma24@st.niituniversity.in".to_string(),
        enrollment_id: "ENR999".to_string(),
        password: "priyanshu123".to_string(),
    }
}

fn user_column(db_path: &Path, email: &str, column: &str) -> String {
    let conn = open_db(db_path).unwrap();
    conn.query_row(
        &format!("SELECT {column} FROM users WHERE email = ?1"),
        [email],
        |row| row.get(0),
    )
    .unwrap()
}

// --- seed-user ---

#[test]
fn test_seed_user_creates_account() {
    let (_dir, db_path) = backend_dir();
    let params = demo_params();

    let outcome = seed_user(&db_path, &params).unwrap();
    let SeedOutcome::Created(id) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert!(id > 0);

    let stored = user_column(&db_path, &params.email, "password");
    assert!(verify_password("priyanshu123", &stored));
    assert!(!verify_password("wrong", &stored));

    let facial: FacialProfile =
        serde_json::from_str(&user_column(&db_path, &params.email, "facial_data")).unwrap();
    assert_eq!(facial.descriptor.len(), DESCRIPTOR_LEN);
    assert!(facial.descriptor.iter().all(|&v| v == 0.5));
    assert_eq!(facial.age, Some(20));
}

#[test]
fn test_seed_user_existing_email_is_left_untouched() {
    let (_dir, db_path) = backend_dir();
    let params = demo_params();
    let SeedOutcome::Created(id) = seed_user(&db_path, &params).unwrap() else {
        panic!("first run should create");
    };

    let mut again = demo_params();
    again.name = "Someone Else".to_string();
    again.password = "different".to_string();
    assert_eq!(seed_user(&db_path, &again).unwrap(), SeedOutcome::Exists(id));

    assert_eq!(user_column(&db_path, &params.email, "name"), "Priyanshu Sharma");
    let stored = user_column(&db_path, &params.email, "password");
    assert!(verify_password("priyanshu123", &stored));
}

// --- set-password ---

#[test]
fn test_set_password_round_trip() {
    let (_dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_user(&conn, "Neha Gupta", "neha@example.com", "ENR004", "old", "{}").unwrap();
    }

    set_password(&db_path, "neha@example.com", "fresh-password").unwrap();
    let stored = user_column(&db_path, "neha@example.com", "password");
    assert!(verify_password("fresh-password", &stored));
    assert!(!verify_password("old", &stored));
}

#[test]
fn test_set_password_unknown_email_errors() {
    let (_dir, db_path) = backend_dir();
    let err = set_password(&db_path, "nobody@example.com", "pw").unwrap_err();
    assert!(err.to_string().contains("nobody@example.com"), "got: {err}");
}

// --- refresh-descriptor ---

#[test]
fn test_refresh_descriptor_writes_random_profile() {
    let (_dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_user(&conn, "Amit Kumar", "amit@example.com", "ENR001", "x", "{}").unwrap();
    }

    let profile = refresh_descriptor(&db_path, 1).unwrap();
    assert_eq!(profile.descriptor.len(), DESCRIPTOR_LEN);
    assert!(profile.descriptor.iter().all(|&v| (0.0..1.0).contains(&v)));
    assert_eq!(profile.version.as_deref(), Some("1.0"));
    assert!(profile.timestamp.is_some());

    let stored: FacialProfile =
        serde_json::from_str(&user_column(&db_path, "amit@example.com", "facial_data")).unwrap();
    assert_eq!(stored.descriptor, profile.descriptor);
}

#[test]
fn test_refresh_descriptor_unknown_user_errors() {
    let (_dir, db_path) = backend_dir();
    let err = refresh_descriptor(&db_path, 42).unwrap_err();
    assert!(err.to_string().contains("42"), "got: {err}");
}

// --- add-book ---

#[test]
fn test_add_book_reports_stored_row() {
    let (_dir, db_path) = backend_dir();
    let book = add_book(&db_path, "The Great Gatsby", "F. Scott Fitzgerald", "BAR001001", 3)
        .unwrap();
    assert_eq!(book.title, "The Great Gatsby");
    assert_eq!(book.isbn.as_deref(), Some("BAR001001"));
    assert_eq!(book.available, book.quantity);
    assert_eq!(book.quantity, 3);
}

#[test]
fn test_add_book_duplicate_barcode_errors() {
    let (_dir, db_path) = backend_dir();
    add_book(&db_path, "1984", "George Orwell", "BAR001002", 1).unwrap();
    let err = add_book(&db_path, "Animal Farm", "George Orwell", "BAR001002", 1).unwrap_err();
    assert!(err.to_string().contains("BAR001002"), "got: {err}");
}

// --- delete-users ---

#[test]
fn test_delete_users_mixed_ids() {
    let (_dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_user(&conn, "Amit Kumar", "amit@example.com", "ENR001", "x", "{}").unwrap();
        insert_user(&conn, "Priya Patel", "priya@example.com", "ENR002", "x", "{}").unwrap();
        insert_user(&conn, "Rahul Singh", "rahul@example.com", "ENR003", "x", "{}").unwrap();
    }

    let report = delete_users(&db_path, &[1, 99, 2]).unwrap();
    assert_eq!(report.deleted, vec![1, 2]);
    assert_eq!(report.missing, vec![99]);
    assert_eq!(report.remaining, 1);
}

#[test]
fn test_delete_users_empty_db() {
    let (_dir, db_path) = backend_dir();
    let report = delete_users(&db_path, &[7]).unwrap();
    assert!(report.deleted.is_empty());
    assert_eq!(report.missing, vec![7]);
    assert_eq!(report.remaining, 0);
}

#[test]
fn test_delete_users_with_borrow_history() {
    let (_dir, db_path) = backend_dir();
    {
        let conn = open_db(&db_path).unwrap();
        insert_user(&conn, "Amit Kumar", "amit@example.com", "ENR001", "x", "{}").unwrap();
        insert_user(&conn, "Priya Patel", "priya@example.com", "ENR002", "x", "{}").unwrap();
        conn.execute(
            "INSERT INTO borrowed_books (user_id, book_id, book_barcode, due_date, status)
             VALUES (1, 1, 'BAR001001', '2025-03-01', 'active')",
            [],
        )
        .unwrap();
    }

    let report = delete_users(&db_path, &[1, 2]).unwrap();
    assert_eq!(report.deleted, vec![1, 2]);
    assert!(report.missing.is_empty());
    assert_eq!(report.remaining, 0);

    // The loan row survives the account delete.
    let conn = open_db(&db_path).unwrap();
    let loans: i64 = conn
        .query_row("SELECT COUNT(*) FROM borrowed_books", [], |row| row.get(0))
        .unwrap();
    assert_eq!(loans, 1);
}
