//! Image attachment flows: profile images for users, cover images for books.

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::engine::db_ops;
use crate::placeholder::write_placeholder;
use crate::types::{AttachReport, CoverReport, ImageSource};
use crate::utils::config::{DEFAULT_PROFILE_IMAGE, IMAGE_EXTENSIONS, PROFILE_IMAGE_STEM};

/// Prefix of the stored cover value; the frontend feeds it straight into an
/// `<img src>` attribute.
pub const COVER_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|x| ext.eq_ignore_ascii_case(x)))
}

/// Scan one level of `dir` for image files. A file whose stem contains the
/// default profile stem wins; otherwise the first in name order.
fn find_image_in_dir(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_image_extension(p))
        .collect();
    let preferred = candidates.iter().position(|p| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.to_ascii_lowercase().contains(PROFILE_IMAGE_STEM))
    });
    match preferred {
        Some(i) => Some(candidates.swap_remove(i)),
        None if candidates.is_empty() => None,
        None => Some(candidates.remove(0)),
    }
}

/// Resolve which image file to attach. Order: explicit argument (must
/// exist), default profile image in `dir`, any image found in `dir`,
/// synthesized placeholder at the default path.
fn resolve_image(dir: &Path, explicit: Option<&Path>) -> Result<(PathBuf, ImageSource)> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("image file not found: {}", path.display());
        }
        return Ok((path.to_path_buf(), ImageSource::Explicit));
    }
    let default_path = dir.join(DEFAULT_PROFILE_IMAGE);
    if default_path.is_file() {
        return Ok((default_path, ImageSource::Default));
    }
    if let Some(found) = find_image_in_dir(dir) {
        info!("using {}", found.display());
        return Ok((found, ImageSource::Discovered));
    }
    info!(
        "no image on disk, synthesizing a placeholder at {}",
        default_path.display()
    );
    let kind = write_placeholder(&default_path)?;
    Ok((default_path, ImageSource::Placeholder(kind)))
}

/// Attach a profile image to the user row `user_id`, then verify the stored
/// payload against the source file (reported length and blake3 digest).
pub fn attach_user_image(
    db_path: &Path,
    dir: &Path,
    user_id: i64,
    image: Option<&Path>,
) -> Result<AttachReport> {
    let (image_path, source) = resolve_image(dir, image)?;
    let bytes = fs::read(&image_path)
        .with_context(|| format!("read image at {}", image_path.display()))?;
    let digest = blake3::hash(&bytes);
    debug!("loaded {} bytes from {}", bytes.len(), image_path.display());

    let conn = db_ops::open_db(db_path)?;
    let updated = db_ops::update_user_image(&conn, user_id, &bytes)?;
    if updated == 0 {
        bail!("no user row with id {user_id}");
    }
    let user = db_ops::user_image_status(&conn, user_id)?
        .context("row vanished between update and verification")?;
    let stored = db_ops::fetch_user_image(&conn, user_id)?.unwrap_or_default();
    if blake3::hash(&stored) != digest {
        bail!(
            "stored payload does not match {} (digest mismatch)",
            image_path.display()
        );
    }
    Ok(AttachReport {
        image_path,
        source,
        bytes_written: bytes.len(),
        digest: digest.to_hex().to_string(),
        user,
    })
}

/// Attach a cover image to the book with `barcode`, stored as a base64 data
/// URI in `cover_image_base64`.
pub fn attach_book_cover(db_path: &Path, barcode: &str, image: &Path) -> Result<CoverReport> {
    if !image.is_file() {
        bail!("image file not found: {}", image.display());
    }
    let bytes =
        fs::read(image).with_context(|| format!("read image at {}", image.display()))?;
    let data_uri = format!("{COVER_DATA_URI_PREFIX}{}", BASE64.encode(&bytes));
    debug!(
        "encoded {} bytes into a {}-character data URI",
        bytes.len(),
        data_uri.len()
    );

    let conn = db_ops::open_db(db_path)?;
    let updated = db_ops::update_book_cover(&conn, barcode, &data_uri)?;
    if updated == 0 {
        bail!("no book with barcode {barcode:?}");
    }
    let book = db_ops::book_by_barcode(&conn, barcode)?
        .context("row vanished between update and verification")?;
    Ok(CoverReport {
        image_path: image.to_path_buf(),
        file_len: bytes.len(),
        book,
    })
}

/// Print the post-update report for an attach-image run.
pub fn print_attach_report(report: &AttachReport) {
    let source = match report.source {
        ImageSource::Explicit => "explicit path".to_string(),
        ImageSource::Default => "default profile image".to_string(),
        ImageSource::Discovered => "discovered in directory".to_string(),
        ImageSource::Placeholder(kind) => format!("synthesized placeholder, {kind}"),
    };
    println!("{}", "Profile image stored".green().bold());
    println!("  File:   {} ({source})", report.image_path.display());
    println!("  Size:   {} bytes", report.bytes_written);
    println!("  Digest: blake3:{}", report.digest);
    println!();
    println!("{}", "Verification".bold());
    println!("  ID:     {}", report.user.id);
    println!("  Name:   {}", report.user.name);
    println!("  Email:  {}", report.user.email);
    println!("  Status: {}", report.user.status_line());
}

/// Print the post-update report for an attach-cover run.
pub fn print_cover_report(report: &CoverReport) {
    let book = &report.book;
    println!("{}", "Cover image stored".green().bold());
    println!("  File:    {}", report.image_path.display());
    println!("  Size:    {} bytes", report.file_len);
    println!();
    println!("{}", "Verification".bold());
    println!("  ID:      {}", book.id);
    println!("  Title:   {}", book.title);
    println!("  Author:  {}", book.author);
    println!("  Barcode: {}", book.barcode);
    match book.cover_chars {
        Some(n) => println!("  Cover:   stored ({n} characters)"),
        None => println!("  Cover:   missing"),
    }
}
