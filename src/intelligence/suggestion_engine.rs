/// Suggestion engine
///
/// Builds "what should I buy" lists from purchase history, a fixed set of
/// staples and substitutes for whatever is already on the list.

use crate::db::{HistoryStore, ListEntry, ListStore};
use crate::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Never return more than this many suggestions
pub const SUGGESTION_CAP: usize = 8;

/// How many frequent history items seed the list
pub const DEFAULT_HISTORY_TOP_N: usize = 5;

/// Suggested regardless of history
pub const STAPLES: &[&str] = &["bread", "milk", "eggs"];

/// Ordered item -> alternatives table
pub type SubstituteMap = [(&'static str, &'static [&'static str])];

pub const SUBSTITUTES: &SubstituteMap = &[
    ("milk", &["almond milk", "soy milk", "oat milk"]),
    ("butter", &["margarine"]),
    ("sugar", &["honey"]),
];

/// Alternatives for an item, matched on the trimmed lower-cased name
pub fn substitutes_for(substitutes: &SubstituteMap, item: &str) -> &'static [&'static str] {
    let key = item.trim().to_lowercase();

    substitutes
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, alternatives)| *alternatives)
        .unwrap_or(&[])
}

/// Combine history, staples and substitutes into one suggestion list
///
/// # Arguments
/// * `history_top` - Most frequent history items, already ordered
/// * `current_list` - Active list rows, used for substitutes
/// * `substitutes` - Substitute table
/// * `staples` - Default items
///
/// # Returns
/// * At most `SUGGESTION_CAP` distinct strings, in first-seen order
pub fn suggest(
    history_top: &[String],
    current_list: &[ListEntry],
    substitutes: &SubstituteMap,
    staples: &[&str],
) -> Vec<String> {
    let mut suggestions: Vec<String> = history_top.to_vec();

    for staple in staples {
        if !suggestions.iter().any(|s| s == staple) {
            suggestions.push(staple.to_string());
        }
    }

    for entry in current_list {
        suggestions.extend(
            substitutes_for(substitutes, &entry.item)
                .iter()
                .map(|s| s.to_string()),
        );
    }

    let mut seen = HashSet::new();
    suggestions.retain(|s| seen.insert(s.clone()));
    suggestions.truncate(SUGGESTION_CAP);

    suggestions
}

/// Suggestion engine over a list and history store
pub struct SuggestionEngine<S> {
    store: Arc<S>,
    history_top_n: usize,
}

impl<S: ListStore + HistoryStore> SuggestionEngine<S> {
    /// Create a new suggestion engine
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            history_top_n: DEFAULT_HISTORY_TOP_N,
        }
    }

    pub fn with_history_top_n(mut self, n: usize) -> Self {
        self.history_top_n = n;
        self
    }

    /// Generate suggestions from the current store contents
    pub async fn generate(&self) -> Result<Vec<String>> {
        let history_top = self.store.top_n_by_frequency(self.history_top_n).await?;
        let current_list = self.store.list_all().await?;

        let suggestions = suggest(&history_top, &current_list, SUBSTITUTES, STAPLES);
        debug!(
            from_history = history_top.len(),
            list_items = current_list.len(),
            returned = suggestions.len(),
            "generated suggestions"
        );

        Ok(suggestions)
    }
}
