// In-process store. Same contracts as the SQLite one, nothing touches disk.
//
// Each method takes the lock once and never awaits while holding it, so
// every mutation is a single critical section.

use crate::db::models::{CatalogProduct, HistoryEntry, ListEntry};
use crate::db::store::{item_key, CatalogSource, HistoryStore, ListStore};
use crate::error::{ListError, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    next_id: i64,
    items: Vec<ListEntry>,
    history: Vec<HistoryEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    products: Vec<CatalogProduct>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<CatalogProduct>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            products,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| ListError::Generic("memory store lock poisoned".to_string()))
    }
}

impl ListStore for MemoryStore {
    async fn insert(&self, item: &str, quantity: i64, category: &str) -> Result<i64> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = state.next_id;
        state.items.push(ListEntry {
            id,
            item: item.to_string(),
            quantity,
            category: category.to_string(),
            created_at: Utc::now().to_rfc3339(),
        });
        Ok(id)
    }

    async fn delete_first_matching(&self, item: &str) -> Result<bool> {
        let needle = item_key(item);
        let mut state = self.lock()?;

        // items stay in id order, so the first hit is the oldest row
        match state.items.iter().position(|e| item_key(&e.item) == needle) {
            Some(index) => {
                state.items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_all(&self) -> Result<Vec<ListEntry>> {
        Ok(self.lock()?.items.clone())
    }
}

impl HistoryStore for MemoryStore {
    async fn append(&self, item: &str) -> Result<()> {
        let mut state = self.lock()?;
        let id = state.history.len() as i64 + 1;
        state.history.push(HistoryEntry {
            id,
            item: item.to_string(),
            created_at: Utc::now().to_rfc3339(),
        });
        Ok(())
    }

    async fn top_n_by_frequency(&self, n: usize) -> Result<Vec<String>> {
        let state = self.lock()?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in &state.history {
            *counts.entry(item_key(&entry.item)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(ranked.into_iter().take(n).map(|(item, _)| item).collect())
    }
}

impl CatalogSource for MemoryStore {
    async fn all_products(&self) -> Result<Vec<CatalogProduct>> {
        Ok(self.products.clone())
    }
}
