//! Application configuration constants.
//! Defaults and identifiers in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    settings_filename: String,
    env_db_key: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                settings_filename: format!(".{pkg}.toml"),
                env_db_key: format!("{}_DB", pkg.to_uppercase()),
            }
        })
    }

    /// Per-directory settings file, `.stacksmith.toml`.
    pub fn settings_filename(&self) -> &str {
        &self.settings_filename
    }

    /// Environment variable naming the database path, `STACKSMITH_DB`.
    pub fn env_db_key(&self) -> &str {
        &self.env_db_key
    }
}

// ---- Database ----

/// Database filename the backend server creates next to itself.
pub const DB_FILENAME: &str = "library.db";

/// How long a writer waits on a locked database before giving up (ms).
pub const DB_BUSY_TIMEOUT_MS: u64 = 5000;

// ---- Demo account ----

/// Row id the demo profile image is attached to by default.
pub const DEMO_USER_ID: i64 = 6;
pub const DEMO_USER_NAME: &str = "Priyanshu Sharma";
pub const DEMO_USER_EMAIL: &str = "priyanshu.sharma24@st.niituniversity.in";
pub const DEMO_ENROLLMENT_ID: &str = "ENR999";
pub const DEMO_PASSWORD: &str = "priyanshu123";

// ---- Images ----

/// Filename checked (and written for placeholders) in the backend directory.
pub const DEFAULT_PROFILE_IMAGE: &str = "profile.jpg";
/// Stem preferred when scanning the backend directory for a profile image.
pub const PROFILE_IMAGE_STEM: &str = "profile";
/// Extensions recognized when scanning for image files.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// Placeholder geometry and fill, a light blue square.
pub const PLACEHOLDER_SIZE: (u32, u32) = (300, 300);
pub const PLACEHOLDER_RGB: [u8; 3] = [173, 216, 230];

// ---- Passwords ----

/// Random salt length for stored password hashes (bytes).
pub const PASSWORD_SALT_LEN: usize = 16;
