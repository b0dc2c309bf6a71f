/// listwise library
///
/// Natural-language shopping list: command interpretation, catalog
/// ranking and purchase suggestions over pluggable stores.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod intelligence;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{ListError, Result};
