//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the snippet store and application from configuration
//! - Create the axum Router with application routes and static assets
//! - Wire up middleware (request ID, tracing, timeout, security headers,
//!   metrics, header logging)
//! - Serve until a shutdown signal arrives

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::{shutdown, signals};
use crate::observability::{logging, metrics};
use crate::security::headers::{frame_options, no_index, xss_protection};
use crate::snippets::handlers::demo_snippet;
use crate::snippets::storage::DEFAULT_EXPIRY_HOURS;
use crate::snippets::{setup_snippet_router, MemoryStorage, SnippetBox, SnippetModel, SnippetStore};

/// HTTP server for the snippets application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    app: SnippetBox,
}

impl HttpServer {
    /// Create a server backed by a fresh in-memory store.
    pub fn new(config: AppConfig) -> Self {
        let expiry = chrono::Duration::try_hours(config.snippets.expiry_hours).unwrap_or_else(|| {
            tracing::warn!(
                expiry_hours = config.snippets.expiry_hours,
                "Snippet expiry out of range, using default"
            );
            chrono::Duration::hours(DEFAULT_EXPIRY_HOURS)
        });
        let store = MemoryStorage::with_expiry(expiry);
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server backed by `store`.
    pub fn with_store(config: AppConfig, store: Arc<dyn SnippetStore>) -> Self {
        let app = SnippetBox::new(SnippetModel::new(store));

        if config.snippets.seed {
            match app.model().create(demo_snippet()) {
                Ok(id) => tracing::info!(id = %id, "Seeded demo snippet"),
                Err(e) => tracing::warn!(error = %e, "Failed to seed demo snippet"),
            }
        }

        let router = Self::build_router(&config, app.clone());
        Self {
            router,
            config,
            app,
        }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, app: SnippetBox) -> Router {
        let assets = Router::new()
            .nest_service(
                "/assets",
                ServeDir::new(&config.assets.dir).append_index_html_on_directories(false),
            )
            .layer(middleware::from_fn(no_index));

        setup_snippet_router(app)
            .merge(assets)
            .layer(middleware::from_fn(logging::log_request_headers))
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(xss_protection())
            .layer(frame_options())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(X_REQUEST_ID)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id,
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn app(&self) -> &SnippetBox {
        &self.app
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until a signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::shutdown_signal() => {},
                    _ = shutdown::triggered(shutdown) => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(AppConfig::default())
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, hx: bool) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if hx {
            builder = builder.header("X-Request-Marker", "true");
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_marker_returns_201_empty() {
        let router = server().router();
        let response = send(&router, post("/snippets/create", true)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_create_without_marker_redirects() {
        let router = server().router();
        let response = send(&router, post("/snippets/create", false)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/snippet?id=1");

        let response = send(&router, post("/snippets", false)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/snippet?id=2");
    }

    #[tokio::test]
    async fn test_view_created_snippet() {
        let router = server().router();
        send(&router, post("/snippets/create", true)).await;

        let response = send(&router, get("/snippet?id=1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = body_string(response).await;
        assert!(body.contains("O snail"));
        assert!(body.contains("Kobayashi Issa"));
    }

    #[tokio::test]
    async fn test_view_snippet_accepts_any_method() {
        let router = server().router();
        send(&router, post("/snippets/create", true)).await;

        let response = send(&router, post("/snippet?id=1", false)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("O snail"));
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_falls_back_to_default() {
        let mut config = AppConfig::default();
        config.snippets.expiry_hours = i64::MAX;
        let server = HttpServer::new(config);

        let id = server.app().model().create(demo_snippet()).unwrap();
        let snippet = server.app().model().fetch(&id).unwrap();
        assert_eq!(
            snippet.expires - snippet.created,
            chrono::Duration::hours(DEFAULT_EXPIRY_HOURS)
        );
    }

    #[tokio::test]
    async fn test_unknown_snippet_is_404() {
        let router = server().router();
        let response = send(&router, get("/snippet?id=999")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "snippet 999 not found\n");
    }

    #[tokio::test]
    async fn test_missing_id_is_400() {
        let router = server().router();
        for uri in ["/snippet", "/snippet?id=", "/snippet?other=1"] {
            let response = send(&router, get(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body_string(response).await, "missing id query\n");
        }
    }

    #[tokio::test]
    async fn test_poll_lists_in_numeric_order() {
        let router = server().router();
        for _ in 0..10 {
            send(&router, post("/snippets", true)).await;
        }

        let response = send(&router, get("/snippets")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let two = body.find("/snippet?id=2\"").unwrap();
        let ten = body.find("/snippet?id=10\"").unwrap();
        assert!(two < ten);
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn test_home_page() {
        let router = server().router();
        let response = send(&router, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<html"));
        assert!(body.contains("There's nothing to see here yet!"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let router = server().router();
        let response = send(&router, get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_snippets_rejects_other_methods() {
        let router = server().router();
        let request = Request::builder()
            .method("PUT")
            .uri("/snippets")
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,POST");
    }

    #[tokio::test]
    async fn test_security_and_request_id_headers() {
        let router = server().router();
        let response = send(&router, get("/")).await;
        assert_eq!(response.headers()["x-xss-protection"], "1;mode=block");
        assert_eq!(response.headers()["x-frame-options"], "deny");
        assert!(response.headers().contains_key("x-request-id"));

        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_assets() {
        let router = server().router();

        let response = send(&router, get("/assets/css/main.css")).await;
        assert_eq!(response.status(), StatusCode::OK);

        for uri in ["/assets/", "/assets/css/"] {
            let response = send(&router, get(uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let mut config = AppConfig::default();
        config.snippets.seed = true;
        let server = HttpServer::new(config);
        assert_eq!(server.app().model().fetch_all().unwrap().len(), 1);

        let response = send(&server.router(), get("/snippet?id=1")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
