/// SQL query functions for database operations
///
/// Each store method is a single statement, so SQLite gives us the
/// per-operation atomicity the core relies on.

use crate::db::models::*;
use crate::db::store::{item_key, CatalogSource, HistoryStore, ListStore};
use crate::db::Database;
use crate::error::Result;
use chrono::Utc;
use sqlx::Row;

impl ListStore for Database {
    async fn insert(&self, item: &str, quantity: i64, category: &str) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO list_items (item, item_key, quantity, category, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(item)
        .bind(item_key(item))
        .bind(quantity)
        .bind(category)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(self.pool())
        .await?;

        Ok(result.get(0))
    }

    async fn delete_first_matching(&self, item: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM list_items WHERE id = (
                SELECT id FROM list_items WHERE item_key = ? ORDER BY id LIMIT 1
            )
            "#,
        )
        .bind(item_key(item))
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<ListEntry>> {
        let entries = sqlx::query_as::<_, ListEntry>(
            "SELECT id, item, quantity, category, created_at FROM list_items ORDER BY id ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(entries)
    }
}

impl HistoryStore for Database {
    async fn append(&self, item: &str) -> Result<()> {
        sqlx::query("INSERT INTO history (item, item_key, created_at) VALUES (?, ?, ?)")
            .bind(item)
            .bind(item_key(item))
            .bind(Utc::now().to_rfc3339())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn top_n_by_frequency(&self, n: usize) -> Result<Vec<String>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT item_key, COUNT(*) AS uses
            FROM history
            GROUP BY item_key
            ORDER BY uses DESC, item_key ASC
            LIMIT ?
            "#,
        )
        .bind(n as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(|(item, _)| item).collect())
    }
}

impl CatalogSource for Database {
    async fn all_products(&self) -> Result<Vec<CatalogProduct>> {
        let products = sqlx::query_as::<_, CatalogProduct>("SELECT * FROM products ORDER BY id ASC")
            .fetch_all(self.pool())
            .await?;

        Ok(products)
    }
}

impl Database {
    /// Get the full history log, oldest first
    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT id, item, created_at FROM history ORDER BY id ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(entries)
    }

    /// Insert products if the catalog table is empty
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of products inserted (0 if already seeded)
    pub async fn seed_catalog(&self, products: &[CatalogProduct]) -> Result<usize> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool())
            .await?;

        if existing > 0 {
            return Ok(0);
        }

        let mut tx = self.pool().begin().await?;
        for product in products {
            sqlx::query(
                "INSERT INTO products (name, brand, category, price, unit, stock) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&product.name)
            .bind(&product.brand)
            .bind(&product.category)
            .bind(product.price)
            .bind(&product.unit)
            .bind(product.stock)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(products.len())
    }

    /// Remove every row from the active list. History is kept.
    pub async fn clear_list(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM list_items")
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let item_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM list_items")
            .fetch_one(self.pool())
            .await?;

        let history_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM history")
            .fetch_one(self.pool())
            .await?;

        let product_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool())
            .await?;

        Ok(DatabaseStats {
            total_items: item_count.0,
            total_history: history_count.0,
            total_products: product_count.0,
            pool_size: self.pool().size(),
            idle_connections: self.pool().num_idle(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StaticCatalog;

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new_test().await.unwrap();

        let first = db.insert("Milk", 2, "dairy").await.unwrap();
        let second = db.insert("bread", 1, "bakery").await.unwrap();
        assert!(second > first);

        let entries = db.list_all().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item, "Milk");
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[1].category, "bakery");
    }

    #[tokio::test]
    async fn test_repeated_adds_are_separate_rows() {
        let db = Database::new_test().await.unwrap();

        db.insert("eggs", 1, "misc").await.unwrap();
        db.insert("eggs", 3, "misc").await.unwrap();

        let entries = db.list_all().await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_first_matching_is_case_insensitive_and_oldest_first() {
        let db = Database::new_test().await.unwrap();

        let oldest = db.insert("Milk", 1, "dairy").await.unwrap();
        let newer = db.insert("milk", 4, "dairy").await.unwrap();

        assert!(db.delete_first_matching("MILK").await.unwrap());

        let entries = db.list_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, newer);
        assert_ne!(entries[0].id, oldest);
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_list_unchanged() {
        let db = Database::new_test().await.unwrap();
        db.insert("bread", 1, "bakery").await.unwrap();

        let before = db.list_all().await.unwrap();
        assert!(!db.delete_first_matching("butter").await.unwrap());
        let after = db.list_all().await.unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_quantity_must_be_positive() {
        let db = Database::new_test().await.unwrap();

        let result = db.insert("apples", 0, "produce").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_top_n_by_frequency() {
        let db = Database::new_test().await.unwrap();

        for item in ["milk", "Bread", "milk", "eggs", "bread", "MILK", "apples"] {
            db.append(item).await.unwrap();
        }

        let top = db.top_n_by_frequency(3).await.unwrap();
        // apples and eggs tie at one use; alphabetical wins
        assert_eq!(top, vec!["milk", "bread", "apples"]);
        assert_eq!(db.get_history().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_non_ascii_items_match_ignoring_case() {
        let db = Database::new_test().await.unwrap();

        db.insert("Éclair", 1, "misc").await.unwrap();
        assert!(db.delete_first_matching("éclair").await.unwrap());
        assert!(db.list_all().await.unwrap().is_empty());

        for item in ["Éclair", "éclair", "ÉCLAIR", "bread"] {
            db.append(item).await.unwrap();
        }
        let top = db.top_n_by_frequency(5).await.unwrap();
        assert_eq!(top, vec!["éclair", "bread"]);

        // original casing survives in the stored rows
        assert_eq!(db.get_history().await.unwrap()[0].item, "Éclair");
    }

    #[tokio::test]
    async fn test_seed_catalog_once() {
        let db = Database::new_test().await.unwrap();
        let catalog = StaticCatalog::default();

        let inserted = db.seed_catalog(catalog.products()).await.unwrap();
        assert_eq!(inserted, catalog.products().len());

        let again = db.seed_catalog(catalog.products()).await.unwrap();
        assert_eq!(again, 0);

        let products = db.all_products().await.unwrap();
        assert_eq!(products.len(), catalog.products().len());
        assert_eq!(products[0].name, catalog.products()[0].name);
    }

    #[tokio::test]
    async fn test_clear_list_keeps_history() {
        let db = Database::new_test().await.unwrap();
        db.insert("milk", 1, "dairy").await.unwrap();
        db.append("milk").await.unwrap();

        assert_eq!(db.clear_list().await.unwrap(), 1);

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_history, 1);
        assert_eq!(stats.total_products, 0);
    }
}
