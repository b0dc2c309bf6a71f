//! Property-based tests for catalog ranking

use listwise_lib::db::CatalogProduct;
use listwise_lib::intelligence::{Ranker, SearchFilters};
use proptest::prelude::*;

fn product_strategy() -> impl Strategy<Value = CatalogProduct> {
    (
        "[a-z]{1,6}( [a-z]{1,6})?",
        prop_oneof![Just("Amul"), Just("Alpro"), Just("Britannia"), Just("Local")],
        prop_oneof![Just("Dairy"), Just("Bakery"), Just("Snacks")],
        prop::option::of(1u32..500),
    )
        .prop_map(|(name, brand, category, price)| {
            let mut product = CatalogProduct::new(0, &name, brand, category, 0.0);
            product.price = price.map(f64::from);
            product
        })
}

fn catalog_strategy() -> impl Strategy<Value = Vec<CatalogProduct>> {
    prop::collection::vec(product_strategy(), 0..30).prop_map(|mut products| {
        for (i, product) in products.iter_mut().enumerate() {
            product.id = i as i64 + 1;
        }
        products
    })
}

fn filters_strategy() -> impl Strategy<Value = SearchFilters> {
    (
        prop::option::of(0u32..300),
        prop::option::of(100u32..600),
        prop::option::of(prop_oneof![Just("amul"), Just("AL"), Just("zzz")]),
    )
        .prop_map(|(min, max, brand)| SearchFilters {
            min_price: min.map(f64::from),
            max_price: max.map(f64::from),
            brand: brand.map(str::to_string),
        })
}

#[test]
fn prop_results_fill_limit_from_filtered_catalog() {
    proptest!(|(
        catalog in catalog_strategy(),
        query in "[a-z ]{0,8}",
        filters in filters_strategy(),
        limit in 0usize..20,
    )| {
        let results = Ranker::rank(&catalog, &query, &filters, limit);
        let survivors = catalog.iter().filter(|p| filters.admits(p)).count();

        prop_assert_eq!(results.len(), limit.min(survivors));
        for product in &results {
            prop_assert!(filters.admits(product), "{:?} slipped past {:?}", product, filters);
            prop_assert!(catalog.contains(product));
        }
    });
}

#[test]
fn prop_results_are_ordered_by_score_then_price() {
    proptest!(|(catalog in catalog_strategy(), query in "[a-z]{1,6}")| {
        let results = Ranker::rank(&catalog, &query, &SearchFilters::default(), catalog.len());
        let lowered = query.to_lowercase();

        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (score_a, score_b) = (Ranker::score(a, &lowered), Ranker::score(b, &lowered));
            prop_assert!(score_a >= score_b);
            if score_a == score_b {
                prop_assert!(a.sort_price() <= b.sort_price());
            }
        }
    });
}

#[test]
fn prop_ranking_is_deterministic() {
    proptest!(|(catalog in catalog_strategy(), query in "[a-z ]{0,8}", filters in filters_strategy())| {
        let first = Ranker::rank(&catalog, &query, &filters, 10);
        let second = Ranker::rank(&catalog, &query, &filters, 10);
        prop_assert_eq!(first, second);
    });
}
