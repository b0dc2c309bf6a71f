/// Item categorization
///
/// Maps an item name to a category label by keyword containment.
/// Rules are checked top to bottom and the first hit wins, so more specific
/// keywords have to sit above the general ones they contain
/// ("almond milk" before "milk").

/// Fallback label when no keyword matches
pub const DEFAULT_CATEGORY: &str = "misc";

/// Ordered (keyword, category) rules
pub const CATEGORY_RULES: &[(&str, &str)] = &[
    // Plant milks before dairy
    ("almond milk", "dairy-alternative"),
    ("soy milk", "dairy-alternative"),
    ("oat milk", "dairy-alternative"),
    ("coconut milk", "dairy-alternative"),
    ("milk", "dairy"),
    ("cheese", "dairy"),
    ("yogurt", "dairy"),
    ("butter", "dairy"),
    ("paneer", "dairy"),
    ("egg", "dairy"),
    ("apple", "produce"),
    ("banana", "produce"),
    ("orange", "produce"),
    ("tomato", "produce"),
    ("potato", "produce"),
    ("onion", "produce"),
    ("mango", "produce"),
    ("bread", "bakery"),
    ("bagel", "bakery"),
    ("bun", "bakery"),
    ("water", "drinks"),
    ("juice", "drinks"),
    ("coffee", "drinks"),
    ("tea", "drinks"),
    ("chips", "snacks"),
    ("biscuit", "snacks"),
    ("chocolate", "snacks"),
    ("detergent", "household"),
    ("soap", "household"),
    ("shampoo", "household"),
    ("toothpaste", "household"),
    ("toilet paper", "household"),
    ("salt", "spices"),
    ("pepper", "spices"),
    ("turmeric", "spices"),
];

/// Categorize an item by name.
///
/// Matching is case-insensitive substring containment. Never fails.
pub fn categorize(item: &str) -> &'static str {
    let lower = item.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}
