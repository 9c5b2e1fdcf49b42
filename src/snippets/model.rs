//! Snippet records and the store abstraction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A stored snippet. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Client-supplied fields of a snippet; the store fills in the rest.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snippet {0} not found")]
    NotFound(String),

    #[error("snippet expiry is out of range")]
    ExpiryOutOfRange,
}

pub trait SnippetStore: Send + Sync {
    /// Inserts a snippet and returns its assigned id.
    fn create_snippet(&self, data: NewSnippet) -> Result<String, StoreError>;

    fn get_snippet_with_id(&self, id: &str) -> Result<Snippet, StoreError>;

    /// All snippets, in no particular order.
    fn get_snippets(&self) -> Result<Vec<Snippet>, StoreError>;
}

/// Shared handle to a [`SnippetStore`].
#[derive(Clone)]
pub struct SnippetModel {
    store: Arc<dyn SnippetStore>,
}

impl SnippetModel {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, data: NewSnippet) -> Result<String, StoreError> {
        self.store.create_snippet(data)
    }

    pub fn fetch(&self, id: &str) -> Result<Snippet, StoreError> {
        self.store.get_snippet_with_id(id)
    }

    pub fn fetch_all(&self) -> Result<Vec<Snippet>, StoreError> {
        self.store.get_snippets()
    }
}
