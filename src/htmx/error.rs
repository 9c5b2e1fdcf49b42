use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

/// Errors raised by the response helpers.
#[derive(Debug, Error)]
pub enum HxError {
    /// The value contains bytes that cannot appear in a header.
    #[error("invalid value for header {header}: {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: InvalidHeaderValue,
    },

    /// A trigger payload could not be encoded as JSON.
    #[error("failed to marshal trigger message event: {0}")]
    TriggerEncoding(#[from] serde_json::Error),
}
