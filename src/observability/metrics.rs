//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hxkit_requests_total` (counter): requests by method, status
//! - `hxkit_request_duration_seconds` (histogram): latency distribution
//! - `hxkit_snippets_created_total` (counter): snippets inserted
//!
//! Recording is a no-op until a recorder is installed, so handlers can call
//! these unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "hxkit_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("hxkit_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_snippet_created() {
    counter!("hxkit_snippets_created_total").increment(1);
}

/// Middleware recording request count and latency.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
