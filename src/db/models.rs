/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row on the active shopping list
///
/// Repeated adds of the same item produce separate rows; quantities are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ListEntry {
    pub id: i64,
    pub item: String, // case preserved as entered
    pub quantity: i64,
    pub category: String,
    pub created_at: String, // RFC 3339
}

/// Append-only record of a successful add
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub item: String,
    pub created_at: String, // RFC 3339
}

/// A product from the catalog. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub stock: Option<i64>,
}

impl CatalogProduct {
    /// Build a product with a known price and no stock/unit info
    pub fn new(id: i64, name: &str, brand: &str, category: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            price: Some(price),
            unit: None,
            stock: None,
        }
    }

    /// Price used for ordering. Unknown prices sort after every known one.
    pub fn sort_price(&self) -> f64 {
        self.price.unwrap_or(f64::INFINITY)
    }
}

/// Row counts, used by `status`
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub total_items: i64,
    pub total_history: i64,
    pub total_products: i64,
    pub pool_size: u32,
    pub idle_connections: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_price_unknown_is_last() {
        let mut product = CatalogProduct::new(1, "Paneer 200g", "LocalDairy", "Dairy", 110.0);
        assert_eq!(product.sort_price(), 110.0);

        product.price = None;
        assert!(product.sort_price() > 1_000_000.0);
    }

    #[test]
    fn test_list_entry_serializes() {
        let entry = ListEntry {
            id: 3,
            item: "Milk".to_string(),
            quantity: 2,
            category: "dairy".to_string(),
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["item"], "Milk");
        assert_eq!(json["quantity"], 2);
    }
}
