//! In-memory snippet storage.
//!
//! This is a demo store, not a production one: the map is unbounded, nothing
//! expires or is evicted, and everything is lost on restart. Concurrent
//! inserts are safe in the narrow sense that each one gets a distinct id;
//! there are no other guarantees.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, Utc};
use dashmap::DashMap;

use crate::snippets::model::{NewSnippet, Snippet, SnippetStore, StoreError};

/// Default lifetime of a snippet.
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

pub struct MemoryStorage {
    counter: AtomicU64,
    snippets: DashMap<String, Snippet>,
    expiry: Duration,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_expiry(Duration::hours(DEFAULT_EXPIRY_HOURS))
    }

    pub fn with_expiry(expiry: Duration) -> Self {
        Self {
            counter: AtomicU64::new(0),
            snippets: DashMap::new(),
            expiry,
        }
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetStore for MemoryStorage {
    fn create_snippet(&self, data: NewSnippet) -> Result<String, StoreError> {
        let created = Utc::now();
        let expires = created
            .checked_add_signed(self.expiry)
            .ok_or(StoreError::ExpiryOutOfRange)?;

        let id = (self.counter.fetch_add(1, Ordering::Relaxed) + 1).to_string();
        let snippet = Snippet {
            id: id.clone(),
            title: data.title,
            content: data.content,
            created,
            expires,
        };
        self.snippets.insert(id.clone(), snippet);

        tracing::debug!(id = %id, "Snippet created");
        Ok(id)
    }

    fn get_snippet_with_id(&self, id: &str) -> Result<Snippet, StoreError> {
        self.snippets
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_snippets(&self) -> Result<Vec<Snippet>, StoreError> {
        Ok(self
            .snippets
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
