//! Partial-page update helpers for axum, and a snippets demo built on them.

pub mod config;
pub mod htmx;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod snippets;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
