use axum::routing::{any, get, post};
use axum::Router;

use crate::htmx::{htmx, HxRequest, HxResponse};
use crate::snippets::handlers::SnippetBox;

/// Routes of the snippets application.
///
/// | Route | Handler |
/// |---|---|
/// | `GET /` | list page |
/// | `/snippet?id=…` (any method) | detail page |
/// | `GET, POST /snippets` | list fragment / create |
/// | `POST /snippets/create` | create |
pub fn setup_snippet_router(app: SnippetBox) -> Router {
    let home = app.clone();
    let view = app.clone();
    let snippets = app.clone();
    let create = app.clone();
    let fallback = app;

    Router::new()
        .route(
            "/",
            get(htmx(move |w: &mut HxResponse, r: &HxRequest<'_>| home.home(w, r))),
        )
        .route(
            "/snippet",
            any(htmx(move |w: &mut HxResponse, r: &HxRequest<'_>| view.view_snippet(w, r))),
        )
        .route(
            "/snippets",
            any(htmx(move |w: &mut HxResponse, r: &HxRequest<'_>| snippets.snippets(w, r))),
        )
        .route(
            "/snippets/create",
            post(htmx(move |w: &mut HxResponse, r: &HxRequest<'_>| create.create_snippet(w, r))),
        )
        .fallback(htmx(move |w: &mut HxResponse, r: &HxRequest<'_>| fallback.home(w, r)))
}
