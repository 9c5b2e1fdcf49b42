//! Outbound response wrapper with protocol header setters.

use std::io;
use std::ops::{Deref, DerefMut};

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;
use url::Url;

use super::error::HxError;
use super::headers::{
    X_LOCATION, X_PUSH_URL, X_REDIRECT, X_REFRESH, X_REPLACE_URL, X_RESELECT, X_RESWAP,
    X_RETARGET, X_TRIGGER, X_TRIGGER_AFTER_SETTLE, X_TRIGGER_AFTER_SWAP,
};
use super::trigger::TriggerEvents;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body sent when a component fails to render.
pub const RENDER_ERROR_BODY: &str = "Internal Server Error";

/// Something that can write its representation into a byte sink.
pub trait Component {
    fn render(&self, out: &mut dyn io::Write) -> Result<(), BoxError>;
}

/// Adapts a closure into a [`Component`].
pub struct ComponentFn<F>(pub F);

impl<F> Component for ComponentFn<F>
where
    F: Fn(&mut dyn io::Write) -> Result<(), BoxError>,
{
    fn render(&self, out: &mut dyn io::Write) -> Result<(), BoxError> {
        (self.0)(out)
    }
}

/// Builds a response for a protocol-aware client.
///
/// Header setters may be called any number of times. The status line and
/// body are written once: later writes are dropped with a warning.
#[derive(Debug)]
pub struct HxResponse {
    inner: Response<Body>,
    written: bool,
}

impl HxResponse {
    /// An empty `200 OK` response.
    pub fn new() -> Self {
        Self::from_response(Response::new(Body::empty()))
    }

    pub fn from_response(inner: Response<Body>) -> Self {
        Self {
            inner,
            written: false,
        }
    }

    /// Whether a status/body write has happened.
    pub fn is_written(&self) -> bool {
        self.written
    }

    pub fn into_inner(self) -> Response<Body> {
        self.inner
    }

    // ── Header setters ──────────────────────────────────────────

    /// Pushes `url` into the browser history.
    pub fn set_push_url(&mut self, url: &Url) {
        self.set_url(X_PUSH_URL, url);
    }

    /// Redirects the client to `url`.
    pub fn set_redirect(&mut self, url: &Url) {
        self.set_url(X_REDIRECT, url);
    }

    /// Redirects the client to `url`, swapping content instead of reloading.
    pub fn set_location(&mut self, url: &Url) {
        self.set_url(X_LOCATION, url);
    }

    /// Replaces the current location bar URL.
    pub fn set_replace_url(&mut self, url: &Url) {
        self.set_url(X_REPLACE_URL, url);
    }

    /// Asks the client for a full page refresh.
    pub fn set_refresh(&mut self) {
        self.inner
            .headers_mut()
            .insert(X_REFRESH, HeaderValue::from_static("true"));
    }

    pub fn set_reswap(&mut self, strategy: &str) -> Result<(), HxError> {
        self.set_text(X_RESWAP, strategy)
    }

    pub fn set_retarget(&mut self, selector: &str) -> Result<(), HxError> {
        self.set_text(X_RETARGET, selector)
    }

    pub fn set_reselect(&mut self, selector: &str) -> Result<(), HxError> {
        self.set_text(X_RESELECT, selector)
    }

    /// Fires `events` on the client as soon as the response is received.
    pub fn set_trigger(&mut self, events: &TriggerEvents) -> Result<(), HxError> {
        self.set_text(X_TRIGGER, events.header_value())
    }

    /// Fires `events` on the client after the swap step.
    pub fn set_trigger_after_swap(&mut self, events: &TriggerEvents) -> Result<(), HxError> {
        self.set_text(X_TRIGGER_AFTER_SWAP, events.header_value())
    }

    /// Fires `events` on the client after the settle step.
    pub fn set_trigger_after_settle(&mut self, events: &TriggerEvents) -> Result<(), HxError> {
        self.set_text(X_TRIGGER_AFTER_SETTLE, events.header_value())
    }

    fn set_url(&mut self, name: HeaderName, url: &Url) {
        // A serialized Url is always visible ASCII.
        match HeaderValue::from_str(url.as_str()) {
            Ok(value) => {
                self.inner.headers_mut().insert(name, value);
            }
            Err(e) => tracing::warn!(header = %name, error = %e, "URL header value rejected"),
        }
    }

    fn set_text(&mut self, name: HeaderName, value: &str) -> Result<(), HxError> {
        let value = HeaderValue::from_bytes(value.as_bytes()).map_err(|source| {
            HxError::InvalidHeaderValue {
                header: name.to_string(),
                source,
            }
        })?;
        self.inner.headers_mut().insert(name, value);
        Ok(())
    }

    // ── Status and body ─────────────────────────────────────────

    /// Writes `status` with an empty body.
    pub fn write_status(&mut self, status: StatusCode) {
        self.write(status, Body::empty());
    }

    /// Writes a plain-text error response.
    pub fn error(&mut self, status: StatusCode, message: &str) {
        if self.guard_written() {
            return;
        }
        let headers = self.inner.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        self.write(status, Body::from(format!("{message}\n")));
    }

    pub fn not_found(&mut self) {
        self.error(StatusCode::NOT_FOUND, "404 page not found");
    }

    /// Sets `Location` and writes `status` with an empty body.
    pub fn redirect(&mut self, location: &str, status: StatusCode) {
        if self.guard_written() {
            return;
        }
        match HeaderValue::from_str(location) {
            Ok(value) => {
                self.inner.headers_mut().insert(header::LOCATION, value);
                self.write(status, Body::empty());
            }
            Err(e) => {
                tracing::error!(location = %location, error = %e, "Invalid redirect location");
                self.error(StatusCode::INTERNAL_SERVER_ERROR, RENDER_ERROR_BODY);
            }
        }
    }

    /// Renders `component` into a buffer and, only if that succeeds, writes
    /// `status` followed by the buffered bytes.
    ///
    /// A failed render is logged and answered with `500` and
    /// [`RENDER_ERROR_BODY`]; the partial output is discarded.
    pub fn write_component<C>(&mut self, component: &C, status: StatusCode)
    where
        C: Component + ?Sized,
    {
        if self.guard_written() {
            return;
        }

        let mut buf = Vec::new();
        if let Err(e) = component.render(&mut buf) {
            tracing::error!(error = %e, discarded_bytes = buf.len(), "Component render failed");
            self.error(StatusCode::INTERNAL_SERVER_ERROR, RENDER_ERROR_BODY);
            return;
        }

        if !self.inner.headers().contains_key(header::CONTENT_TYPE) {
            self.inner.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
        }
        self.write(status, Body::from(buf));
    }

    fn write(&mut self, status: StatusCode, body: Body) {
        if self.guard_written() {
            return;
        }
        *self.inner.status_mut() = status;
        *self.inner.body_mut() = body;
        self.written = true;
    }

    fn guard_written(&self) -> bool {
        if self.written {
            tracing::warn!(
                status = %self.inner.status(),
                "superfluous response write ignored"
            );
        }
        self.written
    }
}

impl Default for HxResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for HxResponse {
    type Target = Response<Body>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for HxResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl IntoResponse for HxResponse {
    fn into_response(self) -> axum::response::Response {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn body_string(response: HxResponse) -> String {
        let bytes = axum::body::to_bytes(response.into_inner().into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header<'a>(w: &'a HxResponse, name: &str) -> Option<&'a str> {
        w.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_url_setters() {
        let url = Url::parse("https://example.com/snippet?id=7").unwrap();
        let mut w = HxResponse::new();
        w.set_push_url(&url);
        w.set_redirect(&url);
        w.set_location(&url);
        w.set_replace_url(&url);

        for name in ["X-Push-Url", "X-Redirect", "X-Location", "X-Replace-Url"] {
            assert_eq!(header(&w, name), Some("https://example.com/snippet?id=7"), "{name}");
        }
    }

    #[test]
    fn test_refresh_writes_literal_true() {
        let mut w = HxResponse::new();
        w.set_refresh();
        assert_eq!(header(&w, "X-Refresh"), Some("true"));
    }

    #[test]
    fn test_string_setters() {
        let mut w = HxResponse::new();
        w.set_reswap("outerHTML").unwrap();
        w.set_retarget("#errors").unwrap();
        w.set_reselect(".content").unwrap();

        assert_eq!(header(&w, "X-Reswap"), Some("outerHTML"));
        assert_eq!(header(&w, "X-Retarget"), Some("#errors"));
        assert_eq!(header(&w, "X-Reselect"), Some(".content"));
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let mut w = HxResponse::new();
        let err = w.set_retarget("#a\n#b").unwrap_err();
        assert!(matches!(err, HxError::InvalidHeaderValue { ref header, .. } if header == "x-retarget"));
        assert!(w.headers().get("X-Retarget").is_none());
    }

    #[test]
    fn test_trigger_setters() {
        let mut w = HxResponse::new();
        w.set_trigger(&TriggerEvents::names(["a", "b", "a"])).unwrap();
        w.set_trigger_after_swap(&TriggerEvents::name("swapped")).unwrap();
        w.set_trigger_after_settle(&TriggerEvents::with_context([("done", 1)]))
            .unwrap();

        assert_eq!(header(&w, "X-Trigger"), Some("a,b,a"));
        assert_eq!(header(&w, "X-Trigger-After-Swap"), Some("swapped"));
        assert_eq!(header(&w, "X-Trigger-After-Settle"), Some(r#"{"done":1}"#));
    }

    #[test]
    fn test_setter_replaces_previous_value() {
        let mut w = HxResponse::new();
        w.set_trigger(&TriggerEvents::name("first")).unwrap();
        w.set_trigger(&TriggerEvents::name("second")).unwrap();

        let values: Vec<_> = w.headers().get_all("X-Trigger").iter().collect();
        assert_eq!(values, vec!["second"]);
    }

    #[tokio::test]
    async fn test_write_component_success() {
        let component = ComponentFn(|out: &mut dyn io::Write| -> Result<(), BoxError> {
            out.write_all(b"<li>one</li>")?;
            out.write_all(b"<li>two</li>")?;
            Ok(())
        });

        let mut w = HxResponse::new();
        w.write_component(&component, StatusCode::CREATED);

        assert_eq!(w.status(), StatusCode::CREATED);
        assert_eq!(header(&w, "content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(body_string(w).await, "<li>one</li><li>two</li>");
    }

    #[tokio::test]
    async fn test_write_component_failure_discards_partial_output() {
        let component = ComponentFn(|out: &mut dyn io::Write| -> Result<(), BoxError> {
            out.write_all(b"<div>partial")?;
            Err("template exploded".into())
        });

        let mut w = HxResponse::new();
        w.write_component(&component, StatusCode::OK);

        assert_eq!(w.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(w).await;
        assert_eq!(body.trim_end(), RENDER_ERROR_BODY);
        assert!(!body.contains("partial"));
    }

    #[tokio::test]
    async fn test_second_write_is_ignored() {
        let mut w = HxResponse::new();
        w.write_status(StatusCode::CREATED);
        w.error(StatusCode::BAD_REQUEST, "too late");

        assert!(w.is_written());
        assert_eq!(w.status(), StatusCode::CREATED);
        assert_eq!(body_string(w).await, "");
    }

    #[tokio::test]
    async fn test_error_writes_plain_text() {
        let mut w = HxResponse::new();
        w.error(StatusCode::BAD_REQUEST, "missing id query");

        assert_eq!(w.status(), StatusCode::BAD_REQUEST);
        assert_eq!(header(&w, "content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(header(&w, "x-content-type-options"), Some("nosniff"));
        assert_eq!(body_string(w).await, "missing id query\n");
    }

    #[test]
    fn test_redirect() {
        let mut w = HxResponse::new();
        w.redirect("/snippet?id=4", StatusCode::SEE_OTHER);

        assert_eq!(w.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(&w, "location"), Some("/snippet?id=4"));
    }
}
