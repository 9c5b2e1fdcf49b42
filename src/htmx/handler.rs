//! Adapter from protocol-aware handlers to axum handlers.

use std::future::{ready, Ready};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use super::request::HxRequest;
use super::response::HxResponse;

/// Responds to a request using the protocol wrappers.
pub trait HxHandler: Send + Sync + 'static {
    fn serve_htmx(&self, w: &mut HxResponse, r: &HxRequest<'_, Body>);
}

impl<F> HxHandler for F
where
    F: Fn(&mut HxResponse, &HxRequest<'_, Body>) + Send + Sync + 'static,
{
    fn serve_htmx(&self, w: &mut HxResponse, r: &HxRequest<'_, Body>) {
        self(w, r)
    }
}

/// Wraps `handler` so it can be mounted on an axum router.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use hxkit::htmx::{htmx, HxRequest, HxResponse, TriggerEvents};
///
/// let app: Router = Router::new().route(
///     "/ping",
///     get(htmx(|w: &mut HxResponse, r: &HxRequest<'_>| {
///         if r.is_hx_request() {
///             let _ = w.set_trigger(&TriggerEvents::name("pong"));
///         }
///         w.write_status(axum::http::StatusCode::NO_CONTENT);
///     })),
/// );
/// ```
pub fn htmx<H>(handler: H) -> impl Fn(Request<Body>) -> Ready<Response> + Clone + Send + Sync + 'static
where
    H: HxHandler + Clone,
{
    move |request: Request<Body>| {
        let mut writer = HxResponse::new();
        handler.serve_htmx(&mut writer, &HxRequest::new(&request));
        ready(writer.into_response())
    }
}
