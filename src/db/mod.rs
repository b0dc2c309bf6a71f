/// Database module for listwise
///
/// Handles all persistence using SQLite and sqlx, plus the store traits
/// the core is written against.

pub mod catalog;
pub mod connection;
pub mod memory;
pub mod models;
pub mod queries;
pub mod store;

pub use catalog::StaticCatalog;
pub use connection::Database;
pub use memory::MemoryStore;
pub use models::*;
pub use store::{CatalogSource, HistoryStore, ListStore};
