//! Stacksmith: maintenance and fixture CLI for the smart-library SQLite database

pub mod admin;
pub mod attach;
pub mod engine;
pub mod facial;
pub mod inspect;
pub mod placeholder;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

/// Result alias used by public stacksmith API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
