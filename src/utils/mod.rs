pub mod config;
pub mod logger;
pub mod password;
pub mod settings;

pub use config::*;
pub use logger::setup_logging;
pub use password::{hash_password, verify_password};
