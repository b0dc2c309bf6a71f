// The front door: free text in, list changes and answers out
//
// text -> interpreter -> Intent -> list add/remove, catalog search, or suggestions

use crate::core::list_manager::{AddedItem, ListManager, RemoveOutcome};
use crate::core::searcher::Searcher;
use crate::db::{CatalogProduct, CatalogSource, HistoryStore, ListStore};
use crate::error::{ListError, Result};
use crate::intelligence::{
    detect_price_filter, parse, substitutes_for, IntentKind, SearchFilters, SuggestionEngine,
    SUBSTITUTES,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 12;

/// What happened in response to a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Added {
        entry: AddedItem,
        substitutes: Vec<String>,
    },
    Removed {
        item: String,
    },
    NotFound {
        item: String,
    },
    SearchResults {
        query: String,
        filters: SearchFilters,
        products: Vec<CatalogProduct>,
    },
    Suggestions {
        items: Vec<String>,
    },
    /// An add/remove trigger fired but no item was left after stripping
    Ambiguous {
        attempted: IntentKind,
    },
    Unrecognized {
        text: String,
    },
}

pub struct Assistant<S, C> {
    lists: ListManager<S>,
    searcher: Searcher<C>,
    suggestions: SuggestionEngine<S>,
    search_limit: usize,
}

impl<S, C> Assistant<S, C>
where
    S: ListStore + HistoryStore,
    C: CatalogSource,
{
    pub fn new(store: Arc<S>, catalog: Arc<C>) -> Self {
        Self {
            lists: ListManager::new(Arc::clone(&store)),
            searcher: Searcher::new(catalog),
            suggestions: SuggestionEngine::new(store),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_history_top_n(mut self, n: usize) -> Self {
        self.suggestions = self.suggestions.with_history_top_n(n);
        self
    }

    /// Interpret a command and carry it out
    ///
    /// Blank text is rejected with `ListError::EmptyInput`. Anything else
    /// produces an `Outcome`; only store failures surface as errors.
    pub async fn handle(&self, text: &str) -> Result<Outcome> {
        if text.trim().is_empty() {
            return Err(ListError::EmptyInput);
        }

        let intent = parse(text);
        debug!(?intent, "dispatching");

        let outcome = match (intent.kind, intent.item) {
            (IntentKind::Add, Some(item)) => {
                let entry = self.lists.add(&item, intent.quantity).await?;
                let substitutes = substitutes_for(SUBSTITUTES, &entry.item)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                Outcome::Added { entry, substitutes }
            }
            (IntentKind::Remove, Some(item)) => match self.lists.remove(&item).await? {
                RemoveOutcome::Removed { item } => Outcome::Removed { item },
                RemoveOutcome::NotFound { item } => Outcome::NotFound { item },
            },
            (IntentKind::Search, item) => {
                // spoken constraints win over the plain extracted item
                let (query, filters) = match detect_price_filter(text) {
                    Some(pq) => (pq.query, pq.filters),
                    None => (item.unwrap_or_default(), SearchFilters::default()),
                };
                let products = self
                    .searcher
                    .search(&query, &filters, self.search_limit)
                    .await?;
                Outcome::SearchResults {
                    query,
                    filters,
                    products,
                }
            }
            (IntentKind::Suggest, _) => Outcome::Suggestions {
                items: self.suggestions.generate().await?,
            },
            _ => match intent.degraded_from {
                Some(attempted) => Outcome::Ambiguous { attempted },
                None => Outcome::Unrecognized {
                    text: text.trim().to_string(),
                },
            },
        };

        Ok(outcome)
    }
}
