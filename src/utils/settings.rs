//! Database path and verbosity resolution for the CLI: `--db` flag →
//! `STACKSMITH_DB` (env, then `.env` in dir) → `.stacksmith.toml` → default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::{DB_FILENAME, PackagePaths};

#[derive(Debug, Deserialize)]
pub struct SettingsToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    db_path: Option<String>,
    verbose: Option<bool>,
}

impl SettingsToml {
    pub fn verbose(&self) -> bool {
        self.settings.verbose.unwrap_or(false)
    }
}

/// Load `.stacksmith.toml` from `dir`. A missing or unreadable file is
/// `Ok(None)`; a file that does not parse is an error for the caller to
/// report once logging is up.
pub fn load_settings_toml(dir: &Path) -> Result<Option<SettingsToml>> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    let file = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

/// Database path from the environment: `STACKSMITH_DB`, falling back to a
/// `.env` file in `dir`. Empty values are ignored.
fn env_db_path(dir: &Path) -> Option<PathBuf> {
    let key = PackagePaths::get().env_db_key();
    if let Ok(s) = std::env::var(key) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(PathBuf::from(s));
        }
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Ok(s) = std::env::var(key) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                return Some(PathBuf::from(s));
            }
        }
    }
    None
}

/// Resolve the database path. Precedence: CLI flag, environment, settings
/// file, then `library.db` inside `dir`. Relative paths from the settings
/// file or environment are taken relative to `dir`.
pub fn resolve_db_path(
    dir: &Path,
    cli_db: Option<&Path>,
    file: Option<&SettingsToml>,
) -> PathBuf {
    if let Some(p) = cli_db {
        return p.to_path_buf();
    }
    if let Some(p) = env_db_path(dir) {
        return anchor(dir, p);
    }
    if let Some(p) = file.and_then(|f| f.settings.db_path.as_deref()) {
        return anchor(dir, PathBuf::from(p));
    }
    dir.join(DB_FILENAME)
}

fn anchor(dir: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { dir.join(p) }
}
