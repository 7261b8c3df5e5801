// Database Module
//
// Top-level entry point tying configuration, catalog and storage together.

pub mod config;
pub mod database;

pub use self::config::DatabaseConfig;
pub use self::database::Database;
