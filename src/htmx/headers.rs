//! Header names of the partial-update protocol.
//!
//! `http` stores header names lowercased; matching on the wire is
//! case-insensitive, so `X-Request-Marker` and `x-request-marker` are the
//! same header.

use axum::http::HeaderName;

// ── Request headers ─────────────────────────────────────────────

/// Always `"true"` when the client issued the request through the
/// enhancement library.
pub const X_REQUEST_MARKER: HeaderName = HeaderName::from_static("x-request-marker");

/// Id of the element that triggered the request.
pub const X_TRIGGER_ID: HeaderName = HeaderName::from_static("x-trigger-id");

/// Name of the element that triggered the request.
pub const X_TRIGGER_NAME: HeaderName = HeaderName::from_static("x-trigger-name");

/// Id of the element that will receive the response fragment.
pub const X_TARGET_ID: HeaderName = HeaderName::from_static("x-target-id");

/// Value the user typed into a prompt dialog.
pub const X_PROMPT_VALUE: HeaderName = HeaderName::from_static("x-prompt-value");

/// `"true"` when the request came from a boosted link or form.
pub const X_BOOSTED: HeaderName = HeaderName::from_static("x-boosted");

/// The browser's current URL.
pub const X_CURRENT_URL: HeaderName = HeaderName::from_static("x-current-url");

/// `"true"` when the client is restoring history after a cache miss.
pub const X_HISTORY_RESTORE: HeaderName = HeaderName::from_static("x-history-restore");

// ── Response headers ────────────────────────────────────────────

/// Pushes a URL into the browser history.
pub const X_PUSH_URL: HeaderName = HeaderName::from_static("x-push-url");

/// Client-side redirect to a new location.
pub const X_REDIRECT: HeaderName = HeaderName::from_static("x-redirect");

/// Client-side redirect that behaves like a swap.
pub const X_LOCATION: HeaderName = HeaderName::from_static("x-location");

/// `"true"` forces a full client reload.
pub const X_REFRESH: HeaderName = HeaderName::from_static("x-refresh");

/// Replaces the URL in the location bar without pushing history.
pub const X_REPLACE_URL: HeaderName = HeaderName::from_static("x-replace-url");

/// Overrides the swap strategy.
pub const X_RESWAP: HeaderName = HeaderName::from_static("x-reswap");

/// CSS selector overriding the swap target.
pub const X_RETARGET: HeaderName = HeaderName::from_static("x-retarget");

/// CSS selector choosing which part of the response is swapped in.
pub const X_RESELECT: HeaderName = HeaderName::from_static("x-reselect");

/// Client-side event(s) fired as soon as the response arrives.
pub const X_TRIGGER: HeaderName = HeaderName::from_static("x-trigger");

/// Client-side event(s) fired after the swap step.
pub const X_TRIGGER_AFTER_SWAP: HeaderName = HeaderName::from_static("x-trigger-after-swap");

/// Client-side event(s) fired after the settle step.
pub const X_TRIGGER_AFTER_SETTLE: HeaderName = HeaderName::from_static("x-trigger-after-settle");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_case_insensitive() {
        let parsed: HeaderName = "X-Request-Marker".parse().unwrap();
        assert_eq!(parsed, X_REQUEST_MARKER);

        let parsed: HeaderName = "X-Trigger-After-Settle".parse().unwrap();
        assert_eq!(parsed, X_TRIGGER_AFTER_SETTLE);
    }
}
