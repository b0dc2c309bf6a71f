// Adds and removes items on the shopping list
//
// Cleans up the item text, files it under a category, and keeps the
// purchase history in step with every successful add.

use crate::db::{HistoryStore, ListEntry, ListStore};
use crate::error::{ListError, Result};
use crate::intelligence::categorize;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// Nobody is buying a paragraph.
const MAX_ITEM_LENGTH: usize = 200;

/// What ended up on the list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddedItem {
    pub id: i64,
    pub item: String,
    pub quantity: u32,
    pub category: String,
}

/// Removal result. A miss is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed { item: String },
    NotFound { item: String },
}

pub struct ListManager<S> {
    store: Arc<S>,
}

impl<S: ListStore + HistoryStore> ListManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    // Validate, clean, categorize, insert, then log it in the history.
    pub async fn add(&self, item: &str, quantity: u32) -> Result<AddedItem> {
        let item = self.validate_item(item)?;
        let quantity = quantity.max(1);
        let category = categorize(&item);

        let id = self
            .store
            .insert(&item, i64::from(quantity), category)
            .await?;
        self.store.append(&item).await?;

        info!(id, item = %item, quantity, category, "added to list");

        Ok(AddedItem {
            id,
            item,
            quantity,
            category: category.to_string(),
        })
    }

    // Deletes the oldest row with this name, ignoring case
    pub async fn remove(&self, item: &str) -> Result<RemoveOutcome> {
        let item = self.sanitize_item(item);
        if item.is_empty() {
            return Err(ListError::EmptyInput);
        }

        // add() never stores anything this long
        if item.chars().count() > MAX_ITEM_LENGTH {
            info!(len = item.len(), "nothing to remove");
            return Ok(RemoveOutcome::NotFound { item });
        }

        if self.store.delete_first_matching(&item).await? {
            info!(item = %item, "removed from list");
            Ok(RemoveOutcome::Removed { item })
        } else {
            info!(item = %item, "nothing to remove");
            Ok(RemoveOutcome::NotFound { item })
        }
    }

    pub async fn list(&self) -> Result<Vec<ListEntry>> {
        self.store.list_all().await
    }

    fn validate_item(&self, item: &str) -> Result<String> {
        let sanitized = self.sanitize_item(item);
        if sanitized.is_empty() {
            return Err(ListError::EmptyInput);
        }

        if sanitized.chars().count() > MAX_ITEM_LENGTH {
            return Err(ListError::ItemTooLong(MAX_ITEM_LENGTH));
        }

        Ok(sanitized)
    }

    /// Sanitize an item name
    ///
    /// - Removes null bytes
    /// - Collapses runs of whitespace
    /// - Keeps the original casing
    fn sanitize_item(&self, item: &str) -> String {
        item.replace('\0', "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, MemoryStore};

    fn create_test_manager() -> (ListManager<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ListManager::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn test_add_categorizes_and_records_history() {
        let (manager, store) = create_test_manager();

        let added = manager.add("  Almond   Milk ", 2).await.unwrap();
        assert_eq!(added.item, "Almond Milk");
        assert_eq!(added.quantity, 2);
        assert_eq!(added.category, "dairy-alternative");

        let top = store.top_n_by_frequency(5).await.unwrap();
        assert_eq!(top, vec!["almond milk"]);
    }

    #[tokio::test]
    async fn test_add_empty_item() {
        let (manager, _) = create_test_manager();

        let result = manager.add("   ", 1).await;
        match result {
            Err(ListError::EmptyInput) => {}
            _ => panic!("Expected EmptyInput error"),
        }
    }

    #[tokio::test]
    async fn test_add_item_too_long() {
        let (manager, _) = create_test_manager();

        let long_item = "a".repeat(MAX_ITEM_LENGTH + 1);
        match manager.add(&long_item, 1).await {
            Err(ListError::ItemTooLong(_)) => {}
            _ => panic!("Expected ItemTooLong error"),
        }
    }

    #[tokio::test]
    async fn test_zero_quantity_becomes_one() {
        let (manager, _) = create_test_manager();

        let added = manager.add("bread", 0).await.unwrap();
        assert_eq!(added.quantity, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_item_leaves_list_unchanged() {
        let (manager, _) = create_test_manager();
        manager.add("bread", 1).await.unwrap();
        manager.add("eggs", 12).await.unwrap();

        let before = manager.list().await.unwrap();
        let outcome = manager.remove("butter").await.unwrap();
        let after = manager.list().await.unwrap();

        assert_eq!(
            outcome,
            RemoveOutcome::NotFound {
                item: "butter".to_string()
            }
        );
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_remove_overlong_item_is_not_found() {
        let (manager, _) = create_test_manager();
        manager.add("bread", 1).await.unwrap();

        let long_item = "x".repeat(MAX_ITEM_LENGTH + 1);
        let outcome = manager.remove(&long_item).await.unwrap();

        assert_eq!(outcome, RemoveOutcome::NotFound { item: long_item });
        assert_eq!(manager.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_oldest_match_against_database() {
        let db = Arc::new(Database::new_test().await.unwrap());
        let manager = ListManager::new(Arc::clone(&db));

        let first = manager.add("Milk", 1).await.unwrap();
        let second = manager.add("milk", 3).await.unwrap();

        let outcome = manager.remove("MILK").await.unwrap();
        assert!(matches!(outcome, RemoveOutcome::Removed { .. }));

        let remaining = manager.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
        assert_ne!(remaining[0].id, first.id);

        // history is append-only
        assert_eq!(db.get_history().await.unwrap().len(), 2);
    }

    #[test]
    fn test_sanitize_item() {
        let (manager, _) = create_test_manager();

        assert_eq!(manager.sanitize_item("  oat \t milk "), "oat milk");
        assert!(!manager.sanitize_item("egg\0s").contains('\0'));
    }
}
