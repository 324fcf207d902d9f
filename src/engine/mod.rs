//! Engine module: CLI surface and database operations.

pub mod arg_parser;
pub mod db_ops;
pub mod handlers;

// Re-export commonly used items
pub use arg_parser::{Cli, Commands, CommonArgs};
pub use db_ops::{open_db, open_db_in_memory};
pub use handlers::handle_run;
