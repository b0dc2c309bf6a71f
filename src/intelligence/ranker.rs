/// Catalog search ranking
///
/// Filters a catalog by price and brand, scores what is left against the
/// query and returns the best `limit` products.

use crate::db::CatalogProduct;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name starts with the query
pub const NAME_PREFIX_SCORE: i64 = 100;
/// Query appears in the name, but not at the start
pub const NAME_CONTAINS_SCORE: i64 = 50;
pub const BRAND_CONTAINS_SCORE: i64 = 30;
pub const CATEGORY_CONTAINS_SCORE: i64 = 20;
/// Per query token found in the name
pub const TOKEN_NAME_SCORE: i64 = 6;
/// Per query token found in the brand
pub const TOKEN_BRAND_SCORE: i64 = 3;
/// Every candidate scores this when there is no query
pub const BASELINE_SCORE: i64 = 1;

/// Optional search constraints. Price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brand: Option<String>,
}

impl SearchFilters {
    /// Build filters from raw request text
    ///
    /// Unparseable prices are dropped rather than failing the search.
    pub fn from_raw(min_price: Option<&str>, max_price: Option<&str>, brand: Option<&str>) -> Self {
        Self {
            min_price: min_price.and_then(parse_price_filter),
            max_price: max_price.and_then(parse_price_filter),
            brand: brand
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether a product survives the filtering pass
    ///
    /// A missing price never excludes a product.
    pub fn admits(&self, product: &CatalogProduct) -> bool {
        if let Some(price) = product.price {
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        match self.brand.as_deref().map(str::trim) {
            Some(brand) if !brand.is_empty() => product
                .brand
                .to_lowercase()
                .contains(&brand.to_lowercase()),
            _ => true,
        }
    }
}

/// Parse a price filter, tolerating currency symbols and junk
///
/// "250", "₹250", "Rs 99.5" all parse. Anything else is treated as absent.
pub fn parse_price_filter(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return Some(value);
        }
    }

    let digits: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(raw = %raw, "ignoring unparseable price filter");
            None
        }
    }
}

/// A product with its score. Only lives during ranking.
#[derive(Debug, Clone)]
struct ScoredCandidate<'a> {
    score: i64,
    product: &'a CatalogProduct,
}

/// Ranker for catalog searches
pub struct Ranker;

impl Ranker {
    /// Rank a catalog against a query
    ///
    /// # Arguments
    /// * `catalog` - Products to search
    /// * `query` - Free text, may be empty
    /// * `filters` - Price bounds and brand substring
    /// * `limit` - Maximum results
    ///
    /// # Returns
    /// * Products by descending score, cheaper first on ties, unknown prices last
    pub fn rank(
        catalog: &[CatalogProduct],
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> Vec<CatalogProduct> {
        let query = query.trim().to_lowercase();

        let mut candidates: Vec<ScoredCandidate> = catalog
            .iter()
            .filter(|product| filters.admits(product))
            .map(|product| ScoredCandidate {
                score: if query.is_empty() {
                    BASELINE_SCORE
                } else {
                    Self::score(product, &query)
                },
                product,
            })
            .collect();

        // Stable sort, so equal score and price keep catalog order
        candidates.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.product.sort_price().total_cmp(&b.product.sort_price()))
        });

        debug!(
            query = %query,
            candidates = candidates.len(),
            top_score = candidates.first().map(|c| c.score),
            "ranked catalog"
        );

        candidates
            .into_iter()
            .take(limit)
            .map(|c| c.product.clone())
            .collect()
    }

    /// Score one product against a lower-cased, non-empty query
    pub fn score(product: &CatalogProduct, query: &str) -> i64 {
        let name = product.name.to_lowercase();
        let brand = product.brand.to_lowercase();
        let category = product.category.to_lowercase();

        let mut score = 0;

        if name.starts_with(query) {
            score += NAME_PREFIX_SCORE;
        } else if name.contains(query) {
            score += NAME_CONTAINS_SCORE;
        }

        if brand.contains(query) {
            score += BRAND_CONTAINS_SCORE;
        }

        if category.contains(query) {
            score += CATEGORY_CONTAINS_SCORE;
        }

        for token in query.split_whitespace() {
            if name.contains(token) {
                score += TOKEN_NAME_SCORE;
            }
            if brand.contains(token) {
                score += TOKEN_BRAND_SCORE;
            }
        }

        score
    }
}
