// Pulls price and brand constraints out of spoken searches
//
// "find toothpaste under 100"         -> q=toothpaste, max=100
// "show me rice between 200 and 500"  -> q=rice, min=200, max=500
// "find shampoo from dove under ₹300" -> q=shampoo, brand=dove, max=300
// "search juice above 100"            -> q=juice, min=100
// "find biscuits by parle"            -> q=biscuits, brand=parle
//
// Patterns are tried in that order. Brand+price goes before plain "under",
// otherwise the brand ends up glued onto the query.

use crate::intelligence::ranker::SearchFilters;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const VERB: &str = r"^(?:(?:show me|find me|search for|look for|look up|find|show|search|get)\s+)?";
const CURRENCY: &str = r"\s*(?:₹|rs\.?|rupees|inr)?\s*";
const AMOUNT: &str = r"(\d+(?:\.\d+)?)";

struct PricePattern {
    regex: Regex,
    shape: Shape,
}

#[derive(Clone, Copy)]
enum Shape {
    BrandUnder,
    Under,
    Between,
    Above,
    Brand,
}

static PATTERNS: LazyLock<Vec<PricePattern>> = LazyLock::new(|| {
    let sources = [
        (
            format!(
                r"{VERB}(?P<q>.+?)\s+(?:from|by)\s+(?P<brand>[a-z0-9 ]+?)\s+(?:under|below|less than){CURRENCY}{AMOUNT}"
            ),
            Shape::BrandUnder,
        ),
        (
            format!(r"{VERB}(?P<q>.+?)\s+(?:under|below|less than){CURRENCY}{AMOUNT}"),
            Shape::Under,
        ),
        (
            format!(
                r"{VERB}(?P<q>.+?)\s+between{CURRENCY}{AMOUNT}\s*(?:and|-|to){CURRENCY}{AMOUNT}"
            ),
            Shape::Between,
        ),
        (
            format!(r"{VERB}(?P<q>.+?)\s+(?:above|over|more than){CURRENCY}{AMOUNT}"),
            Shape::Above,
        ),
        (
            r"^(?:find|show|search)(?:\s+me|\s+for)?\s+(?P<q>.+?)\s+(?:from|by)\s+(?P<brand>[a-z0-9 ]+)$"
                .to_string(),
            Shape::Brand,
        ),
    ];

    sources
        .into_iter()
        .map(|(source, shape)| PricePattern {
            regex: Regex::new(&source).expect("valid regex"),
            shape,
        })
        .collect()
});

/// A search query with the constraints spoken alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub query: String,
    pub filters: SearchFilters,
}

/// Detect a price or brand constrained search. None if the text has neither.
pub fn detect_price_filter(text: &str) -> Option<PriceQuery> {
    let lowered = text.trim().to_lowercase();

    PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(&lowered)?;
        let query = caps.name("q")?.as_str().trim().to_string();
        let brand = caps.name("brand").map(|b| b.as_str().trim().to_string());

        // Amount groups are unnamed; 1-based index skips the whole match
        let amounts: Vec<f64> = caps
            .iter()
            .skip(1)
            .flatten()
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .collect();
        let last_amount = amounts.last().copied();

        let filters = match pattern.shape {
            Shape::BrandUnder => SearchFilters {
                min_price: None,
                max_price: last_amount,
                brand,
            },
            Shape::Under => SearchFilters {
                min_price: None,
                max_price: last_amount,
                brand: None,
            },
            Shape::Between => {
                let n = amounts.len();
                if n < 2 {
                    return None;
                }
                SearchFilters {
                    min_price: Some(amounts[n - 2]),
                    max_price: Some(amounts[n - 1]),
                    brand: None,
                }
            }
            Shape::Above => SearchFilters {
                min_price: last_amount,
                max_price: None,
                brand: None,
            },
            Shape::Brand => SearchFilters {
                min_price: None,
                max_price: None,
                brand,
            },
        };

        Some(PriceQuery { query, filters })
    })
}
