//! Account and inventory fixes: seed the demo user, set passwords, refresh
//! facial descriptors, add books, delete users.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::{info, warn};
use std::path::Path;

use crate::engine::db_ops;
use crate::facial::{self, FacialProfile};
use crate::types::{BookSummary, DeleteReport, SeedOutcome};
use crate::utils::password;

/// Identity fields for the seeded demo account.
#[derive(Clone, Debug)]
pub struct SeedUserParams {
    pub name: String,
    pub email: String,
    pub enrollment_id: String,
    pub password: String,
}

/// Insert the demo user with a hashed password and the default facial
/// profile. A user with the same email is reported and left untouched.
pub fn seed_user(db_path: &Path, params: &SeedUserParams) -> Result<SeedOutcome> {
    let conn = db_ops::open_db(db_path)?;
    if let Some(id) = db_ops::user_id_by_email(&conn, &params.email)? {
        info!("user {} already exists with id {id}", params.email);
        return Ok(SeedOutcome::Exists(id));
    }
    let hash = password::hash_password(&params.password);
    let profile_json = serde_json::to_string(&facial::default_profile())
        .context("serialize facial profile")?;
    let id = db_ops::insert_user(
        &conn,
        &params.name,
        &params.email,
        &params.enrollment_id,
        &hash,
        &profile_json,
    )?;
    Ok(SeedOutcome::Created(id))
}

/// Hash `new_password` and store it for the user with `email`.
pub fn set_password(db_path: &Path, email: &str, new_password: &str) -> Result<()> {
    let conn = db_ops::open_db(db_path)?;
    let hash = password::hash_password(new_password);
    if db_ops::set_password(&conn, email, &hash)? == 0 {
        bail!("no user with email {email:?}");
    }
    Ok(())
}

/// Write a fresh random descriptor profile for `user_id`. Returns the
/// profile that was stored.
pub fn refresh_descriptor(db_path: &Path, user_id: i64) -> Result<FacialProfile> {
    let conn = db_ops::open_db(db_path)?;
    let profile = facial::random_profile(&mut rand::rng());
    let json = serde_json::to_string(&profile).context("serialize facial profile")?;
    if db_ops::set_facial_data(&conn, user_id, &json)? == 0 {
        bail!("no user row with id {user_id}");
    }
    Ok(profile)
}

/// Insert a book and return its stored row.
pub fn add_book(
    db_path: &Path,
    title: &str,
    author: &str,
    barcode: &str,
    quantity: i64,
) -> Result<BookSummary> {
    let conn = db_ops::open_db(db_path)?;
    let id = db_ops::insert_book(&conn, title, author, barcode, quantity)?;
    db_ops::book_by_barcode(&conn, barcode)?
        .with_context(|| format!("reread inserted book {id}"))
}

/// Delete each listed user id. Missing ids are logged and skipped, and
/// borrow records referencing a deleted user stay in place.
pub fn delete_users(db_path: &Path, ids: &[i64]) -> Result<DeleteReport> {
    let conn = db_ops::open_db(db_path)?;
    let mut report = DeleteReport::default();
    for &id in ids {
        if db_ops::delete_user(&conn, id)? == 0 {
            warn!("user id {id} not found");
            report.missing.push(id);
        } else {
            info!("deleted user id {id}");
            report.deleted.push(id);
        }
    }
    report.remaining = db_ops::user_count(&conn)?;
    Ok(report)
}

pub fn print_seed_outcome(outcome: &SeedOutcome, email: &str) {
    match outcome {
        SeedOutcome::Created(id) => {
            println!("{}", "Demo user created".green().bold());
            println!("  ID:    {id}");
            println!("  Email: {email}");
        }
        SeedOutcome::Exists(id) => {
            println!("{}", "Demo user already present".yellow().bold());
            println!("  ID:    {id}");
            println!("  Email: {email}");
        }
    }
}

/// Print the stored descriptor's shape and leading values.
pub fn print_descriptor_report(user_id: i64, profile: &FacialProfile) {
    let head: Vec<String> = profile
        .descriptor
        .iter()
        .take(5)
        .map(|v| format!("{v:.3}"))
        .collect();
    println!("{}", "Descriptor refreshed".green().bold());
    println!("  User: {user_id}");
    println!("  Dims: {}", profile.descriptor.len());
    println!("  Head: [{}, ...]", head.join(", "));
}

pub fn print_new_book(book: &BookSummary) {
    println!("{}", "Book added".green().bold());
    println!("  ID:       {}", book.id);
    println!("  Title:    {}", book.title);
    println!("  Author:   {}", book.author);
    println!("  Barcode:  {}", book.barcode);
    println!("  Copies:   {} ({} available)", book.quantity, book.available);
    println!("  Category: {}", book.category.as_deref().unwrap_or("-"));
}

pub fn print_delete_report(report: &DeleteReport) {
    println!("{}", "Users deleted".green().bold());
    println!("  Deleted:   {:?}", report.deleted);
    if !report.missing.is_empty() {
        println!("  Not found: {:?}", report.missing);
    }
    println!("  Remaining: {}", report.remaining);
}
