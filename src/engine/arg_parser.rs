use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::config;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
    pub const QUANTITY: i64 = 1;
}

/// Maintenance CLI for the smart-library SQLite database.
#[derive(Clone, Parser)]
#[command(name = "stacksmith")]
#[command(about = "Patch and inspect the smart-library database: images, accounts, books.")]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every subcommand.
#[derive(Clone, Args)]
pub struct CommonArgs {
    /// Backend directory holding the database and image files. Default: current directory.
    #[arg(long, short, global = true, default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Path to the SQLite database. Default: `library.db` in DIR (or STACKSMITH_DB / `.stacksmith.toml`).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Verbose output.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Attach a profile image to a user row; synthesizes a placeholder when no image is around.
    AttachImage(AttachImageArgs),
    /// Attach a cover image to a book, stored as a base64 data URI.
    AttachCover(AttachCoverArgs),
    /// Insert a new book (isbn = barcode, every copy available).
    AddBook(AddBookArgs),
    /// Create the demo user account with a hashed password and default facial profile.
    SeedUser(SeedUserArgs),
    /// Set a user's password by email.
    SetPassword(SetPasswordArgs),
    /// Write a fresh random facial descriptor for a user.
    RefreshDescriptor(RefreshDescriptorArgs),
    /// Delete users by id.
    DeleteUsers(DeleteUsersArgs),
    /// List all users.
    Users,
    /// Report per-user image storage status.
    Images,
    /// Dump every table plus summary statistics.
    Show,
}

#[derive(Clone, Args)]
pub struct AttachImageArgs {
    /// Image file to store. When omitted: `profile.jpg` in DIR, then any image in DIR, then a placeholder.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Target user id.
    #[arg(long, short, default_value_t = config::DEMO_USER_ID)]
    pub user: i64,
}

#[derive(Clone, Args)]
pub struct AttachCoverArgs {
    /// Book barcode.
    pub barcode: String,

    /// Cover image file.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,
}

#[derive(Clone, Args)]
pub struct AddBookArgs {
    pub title: String,

    pub author: String,

    /// Barcode; also stored as the ISBN.
    pub barcode: String,

    /// Number of copies.
    #[arg(long, short, default_value_t = DefaultArgs::QUANTITY)]
    pub quantity: i64,
}

#[derive(Clone, Args)]
pub struct SeedUserArgs {
    /// Display name.
    #[arg(long, default_value = config::DEMO_USER_NAME)]
    pub name: String,

    /// Login email.
    #[arg(long, default_value = config::DEMO_USER_EMAIL)]
    pub email: String,

    /// Enrollment id (UNIQUE NOT NULL in the schema).
    #[arg(long, default_value = config::DEMO_ENROLLMENT_ID)]
    pub enrollment: String,

    /// Plain-text password, hashed before storage.
    #[arg(long, default_value = config::DEMO_PASSWORD)]
    pub password: String,
}

#[derive(Clone, Args)]
pub struct SetPasswordArgs {
    /// Login email of the account to update.
    pub email: String,

    /// Plain-text password, hashed before storage.
    #[arg(long, default_value = config::DEMO_PASSWORD)]
    pub password: String,
}

#[derive(Clone, Args)]
pub struct RefreshDescriptorArgs {
    /// Target user id.
    #[arg(long, short, default_value_t = config::DEMO_USER_ID)]
    pub user: i64,
}

#[derive(Clone, Args)]
pub struct DeleteUsersArgs {
    /// User ids to delete.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<i64>,
}
