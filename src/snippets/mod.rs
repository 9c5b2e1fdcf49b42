//! Snippets demo application.
//!
//! # Data Flow
//! ```text
//! routes.rs (axum Router, htmx adapter)
//!     → handlers.rs (SnippetBox: home, view, poll, create)
//!     → model.rs (SnippetModel over a SnippetStore)
//!     → storage.rs (MemoryStorage)
//!     → views.rs (askama views, rendered through HxResponse::write_component)
//! ```

pub mod handlers;
pub mod model;
pub mod routes;
pub mod storage;
pub mod views;

pub use handlers::SnippetBox;
pub use model::{NewSnippet, Snippet, SnippetModel, SnippetStore, StoreError};
pub use routes::setup_snippet_router;
pub use storage::MemoryStorage;
