/// Store contracts consumed by the core
///
/// The core never owns the list or the history. It talks to whatever
/// implements these traits: `Database` in production, `MemoryStore` in
/// tests and throwaway sessions.
///
/// Every mutating method must be atomic against its own store. No method
/// here spans more than one write.

use crate::db::models::{CatalogProduct, ListEntry};
use crate::error::Result;

/// The active shopping list
#[allow(async_fn_in_trait)]
pub trait ListStore {
    /// Insert a new row and return its id
    async fn insert(&self, item: &str, quantity: i64, category: &str) -> Result<i64>;

    /// Delete the lowest-id row whose item equals `item` ignoring case.
    /// Returns false when nothing matched.
    async fn delete_first_matching(&self, item: &str) -> Result<bool>;

    /// All rows in insertion order
    async fn list_all(&self) -> Result<Vec<ListEntry>>;
}

/// Append-only purchase history
#[allow(async_fn_in_trait)]
pub trait HistoryStore {
    async fn append(&self, item: &str) -> Result<()>;

    /// Lower-cased items by descending count; equal counts sort alphabetically
    async fn top_n_by_frequency(&self, n: usize) -> Result<Vec<String>>;
}

/// Matching key for an item. Both stores compare and group on this.
pub(crate) fn item_key(item: &str) -> String {
    item.to_lowercase()
}

/// Read-only product catalog
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn all_products(&self) -> Result<Vec<CatalogProduct>>;
}
