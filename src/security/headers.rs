//! Response hardening headers and static asset guards.
//!
//! # Responsibilities
//! - Add `X-XSS-Protection` and `X-Frame-Options` to every response
//! - Refuse directory paths under `/assets/` so no index is ever listed

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::htmx::HxResponse;

pub const X_XSS_PROTECTION: HeaderName = HeaderName::from_static("x-xss-protection");

/// Sets `X-XSS-Protection: 1;mode=block`.
pub fn xss_protection() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(X_XSS_PROTECTION, HeaderValue::from_static("1;mode=block"))
}

/// Sets `X-Frame-Options: deny`.
pub fn frame_options() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        axum::http::header::X_FRAME_OPTIONS,
        HeaderValue::from_static("deny"),
    )
}

/// Middleware answering 404 for any path ending in `/`.
pub async fn no_index(request: Request<Body>, next: Next) -> Response {
    if request.uri().path().ends_with('/') {
        let mut w = HxResponse::new();
        w.not_found();
        return w.into_response();
    }
    next.run(request).await
}
