//! Read-only view over an inbound request's protocol headers.

use std::ops::Deref;

use axum::body::Body;
use axum::http::{HeaderName, Request};
use url::Url;

use super::headers::{
    X_BOOSTED, X_CURRENT_URL, X_HISTORY_RESTORE, X_PROMPT_VALUE, X_REQUEST_MARKER, X_TARGET_ID,
    X_TRIGGER_ID, X_TRIGGER_NAME,
};

/// Wraps a borrowed request and exposes the protocol headers as typed
/// accessors.
///
/// Every accessor is a pure header lookup. Missing headers read as `""`,
/// `false` or `None`; nothing here fails.
#[derive(Debug)]
pub struct HxRequest<'a, B = Body> {
    inner: &'a Request<B>,
}

impl<'a, B> HxRequest<'a, B> {
    pub fn new(inner: &'a Request<B>) -> Self {
        Self { inner }
    }

    /// The wrapped request.
    pub fn request(&self) -> &'a Request<B> {
        self.inner
    }

    /// True if the client used the enhancement library for this request.
    pub fn is_hx_request(&self) -> bool {
        self.flag(&X_REQUEST_MARKER)
    }

    /// Id of the element that triggered the request.
    pub fn trigger_id(&self) -> &'a str {
        self.text(&X_TRIGGER_ID)
    }

    /// Name of the element that triggered the request.
    pub fn trigger_name(&self) -> &'a str {
        self.text(&X_TRIGGER_NAME)
    }

    /// Id of the element receiving the response fragment.
    pub fn target_id(&self) -> &'a str {
        self.text(&X_TARGET_ID)
    }

    /// Value entered by the user at a prompt.
    pub fn prompt(&self) -> &'a str {
        self.text(&X_PROMPT_VALUE)
    }

    pub fn is_boosted(&self) -> bool {
        self.flag(&X_BOOSTED)
    }

    /// The client's current browser URL, or `None` if the header is absent
    /// or does not parse.
    pub fn current_url(&self) -> Option<Url> {
        self.url(&X_CURRENT_URL)
    }

    pub fn is_history_restore(&self) -> bool {
        self.flag(&X_HISTORY_RESTORE)
    }

    /// Exact, case-sensitive comparison against `true`.
    fn flag(&self, name: &HeaderName) -> bool {
        self.inner
            .headers()
            .get(name)
            .map(|v| v.as_bytes() == b"true")
            .unwrap_or(false)
    }

    fn text(&self, name: &HeaderName) -> &'a str {
        self.inner
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    fn url(&self, name: &HeaderName) -> Option<Url> {
        Url::parse(self.text(name)).ok()
    }
}

impl<B> Deref for HxRequest<'_, B> {
    type Target = Request<B>;

    fn deref(&self) -> &Self::Target {
        self.inner
    }
}
