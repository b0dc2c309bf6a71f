/// Catalog searcher
///
/// Pulls the catalog from its source and hands it to the ranker.

use crate::db::{CatalogProduct, CatalogSource};
use crate::error::Result;
use crate::intelligence::{detect_price_filter, Ranker, SearchFilters};
use std::sync::Arc;

/// Handles product searches
pub struct Searcher<C> {
    catalog: Arc<C>,
}

impl<C: CatalogSource> Searcher<C> {
    /// Create a new searcher instance
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Search the catalog
    ///
    /// # Arguments
    /// * `query` - Search text, empty for "everything"
    /// * `filters` - Price bounds and brand
    /// * `limit` - Maximum results to return
    ///
    /// # Returns
    /// * `Ok(Vec<CatalogProduct>)` - Ranked products
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> Result<Vec<CatalogProduct>> {
        let products = self.catalog.all_products().await?;

        Ok(Ranker::rank(&products, query, filters, limit))
    }

    /// Search using a spoken phrase such as "toothpaste under 100"
    ///
    /// Falls back to a plain query when the phrase carries no constraints.
    pub async fn search_phrase(
        &self,
        phrase: &str,
        limit: usize,
    ) -> Result<(String, SearchFilters, Vec<CatalogProduct>)> {
        let (query, filters) = match detect_price_filter(phrase) {
            Some(pq) => (pq.query, pq.filters),
            None => (phrase.trim().to_string(), SearchFilters::default()),
        };

        let products = self.search(&query, &filters, limit).await?;

        Ok((query, filters, products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, StaticCatalog};

    fn setup() -> Searcher<StaticCatalog> {
        Searcher::new(Arc::new(StaticCatalog::default()))
    }

    #[tokio::test]
    async fn test_search_ranks_prefix_first() {
        let searcher = setup();

        let results = searcher
            .search("almond", &SearchFilters::default(), 5)
            .await
            .unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].name, "Almond Milk (Alpro) 1L");
    }

    #[tokio::test]
    async fn test_search_phrase_with_price() {
        let searcher = setup();

        let (query, filters, results) = searcher
            .search_phrase("biscuits under 30", 10)
            .await
            .unwrap();

        assert_eq!(query, "biscuits");
        assert_eq!(filters.max_price, Some(30.0));
        assert_eq!(results[0].name, "Parle G Biscuits 300g");
        assert!(results.iter().all(|p| p.price.unwrap() <= 30.0));
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let searcher = setup();

        let first = searcher.search("milk", &SearchFilters::default(), 10).await.unwrap();
        let second = searcher.search("milk", &SearchFilters::default(), 10).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_database_catalog() {
        let db = Arc::new(Database::new_test().await.unwrap());
        db.seed_catalog(StaticCatalog::default().products())
            .await
            .unwrap();

        let searcher = Searcher::new(db);
        let results = searcher
            .search("", &SearchFilters::from_raw(None, None, Some("amul")), 10)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].brand, "Amul");
    }
}
