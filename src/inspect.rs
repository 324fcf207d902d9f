//! Read-only reports: user listing, image storage status, full snapshot.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::engine::db_ops;
use crate::types::{ImageReport, LibrarySnapshot, LoanRecord, UserSummary};

/// All users, ordered by id.
pub fn list_users(db_path: &Path) -> Result<Vec<UserSummary>> {
    let conn = db_ops::open_db(db_path)?;
    db_ops::list_users(&conn)
}

/// Per-user image status plus database file facts.
pub fn image_report(db_path: &Path) -> Result<ImageReport> {
    let conn = db_ops::open_db(db_path)?;
    Ok(ImageReport {
        rows: db_ops::image_report_rows(&conn)?,
        db_size: db_ops::db_file_size(db_path),
        db_path: db_path.to_path_buf(),
    })
}

/// Every table plus summary statistics, in one pass.
pub fn snapshot(db_path: &Path) -> Result<LibrarySnapshot> {
    let conn = db_ops::open_db(db_path)?;
    Ok(LibrarySnapshot {
        users: db_ops::list_users(&conn)?,
        books: db_ops::list_books(&conn)?,
        loans: db_ops::loans(&conn)?,
        legacy_loans: db_ops::legacy_loans(&conn)?,
        stats: db_ops::library_stats(&conn)?,
    })
}

fn heading(text: &str) {
    println!();
    println!("{}", text.bold());
    println!("{}", "-".repeat(60));
}

pub fn print_users(users: &[UserSummary]) {
    heading("USERS");
    if users.is_empty() {
        println!("  (none)");
        return;
    }
    for u in users {
        println!(
            "  {:>4}  {:<24} {:<40} {}",
            u.id,
            u.name,
            u.email,
            u.enrollment_id.as_deref().unwrap_or("N/A")
        );
    }
    println!();
    println!("Total: {}", users.len());
}

pub fn print_image_report(report: &ImageReport) {
    heading("USER IMAGES");
    if report.rows.is_empty() {
        println!("  (none)");
    }
    for row in &report.rows {
        println!("  {:>4}  {:<24} {}", row.id, row.name, row.status_line());
    }
    let with_image = report.rows.iter().filter(|r| r.image_len.is_some()).count();
    println!();
    println!("With image: {with_image} / {}", report.rows.len());
    println!("Database:   {}", report.db_path.display());
    if let Some(size) = report.db_size {
        println!("DB size:    {size} bytes");
    }
}

fn print_loans(loans: &[LoanRecord]) {
    if loans.is_empty() {
        println!("  (none)");
        return;
    }
    for l in loans {
        let title = l.title.as_deref().unwrap_or("?");
        println!(
            "  {:>4}  user {:<4} book {:<4} {:<28} {:<10} issued {}  due {}",
            l.id,
            l.user_id,
            l.book_id,
            title,
            l.status.as_deref().unwrap_or("-"),
            l.issued.as_deref().unwrap_or("-"),
            l.due.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_snapshot(snap: &LibrarySnapshot) {
    print_users(&snap.users);

    heading("BOOKS");
    if snap.books.is_empty() {
        println!("  (none)");
    }
    for b in &snap.books {
        println!(
            "  {:>4}  {:<28} {:<20} {:<12} {:<10} {}/{} available",
            b.id,
            b.title,
            b.author,
            b.barcode,
            b.category.as_deref().unwrap_or("-"),
            b.available,
            b.quantity,
        );
    }

    heading("BORROWED BOOKS");
    print_loans(&snap.loans);

    heading("BORROWING (LEGACY)");
    print_loans(&snap.legacy_loans);

    heading("SUMMARY");
    let stats = &snap.stats;
    println!(
        "  Books available:    {} / {}",
        stats.books_available, stats.books_total
    );
    println!("  Currently borrowed: {}", stats.active_loans);
    println!("  Returned:           {}", stats.returned_loans);
    println!("  Reissued:           {}", stats.reissued_loans);
}
