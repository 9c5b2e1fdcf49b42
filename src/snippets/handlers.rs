//! Snippet page and fragment handlers.

use std::io::Write;

use axum::http::{header, HeaderValue, Method, StatusCode, Uri};

use crate::htmx::{BoxError, ComponentFn, HxRequest, HxResponse};
use crate::observability::metrics;
use crate::snippets::model::{NewSnippet, SnippetModel, StoreError};
use crate::snippets::views::{HomePage, SnippetPage, SnippetsList, View};

const DEMO_TITLE: &str = "O snail";
const DEMO_CONTENT: &str = "O snail\nClimb Mount Fuji,\nBut slowly, slow-ly!\n\n- Kobayashi Issa";

/// The snippets demo application.
#[derive(Clone)]
pub struct SnippetBox {
    model: SnippetModel,
}

impl SnippetBox {
    pub fn new(model: SnippetModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &SnippetModel {
        &self.model
    }

    /// `GET /`
    pub fn home(&self, w: &mut HxResponse, r: &HxRequest<'_>) {
        if r.uri().path() != "/" {
            w.not_found();
            return;
        }

        match self.model.fetch_all() {
            Ok(snippets) => render(w, HomePage::new(&snippets)),
            Err(e) => server_error(w, &e),
        }
    }

    /// `GET /snippet?id=…`
    pub fn view_snippet(&self, w: &mut HxResponse, r: &HxRequest<'_>) {
        let id = match query_param(r.uri(), "id") {
            Some(id) if !id.is_empty() => id,
            _ => {
                w.error(StatusCode::BAD_REQUEST, "missing id query");
                return;
            }
        };

        match self.model.fetch(&id) {
            Ok(snippet) => render(w, SnippetPage::new(&snippet)),
            Err(e @ StoreError::NotFound(_)) => w.error(StatusCode::NOT_FOUND, &e.to_string()),
            Err(e) => server_error(w, &e),
        }
    }

    /// `/snippets`: GET polls the list fragment, POST creates.
    pub fn snippets(&self, w: &mut HxResponse, r: &HxRequest<'_>) {
        match *r.method() {
            Method::GET => self.poll_snippets(w),
            Method::POST => self.create_snippet(w, r),
            _ => {
                w.headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("GET,POST"));
                w.error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
            }
        }
    }

    fn poll_snippets(&self, w: &mut HxResponse) {
        match self.model.fetch_all() {
            Ok(snippets) => render(w, SnippetsList::new(&snippets)),
            Err(e) => server_error(w, &e),
        }
    }

    /// `POST /snippets/create`
    pub fn create_snippet(&self, w: &mut HxResponse, r: &HxRequest<'_>) {
        let id = match self.model.create(demo_snippet()) {
            Ok(id) => id,
            Err(e) => {
                server_error(w, &e);
                return;
            }
        };
        metrics::record_snippet_created();

        if r.is_hx_request() {
            // Polling clients pick the new snippet up on their own.
            w.write_status(StatusCode::CREATED);
            return;
        }

        w.redirect(&format!("/snippet?id={id}"), StatusCode::SEE_OTHER);
    }
}

/// The fixed snippet inserted by the create endpoints.
pub fn demo_snippet() -> NewSnippet {
    NewSnippet {
        title: DEMO_TITLE.to_string(),
        content: DEMO_CONTENT.to_string(),
    }
}

/// Renders `view` with status 200.
pub fn render<V: View>(w: &mut HxResponse, mut view: V) {
    view.prepare();
    tracing::debug!(template = V::TEMPLATE_NAME, "Rendering view");

    let component = ComponentFn(move |out: &mut dyn Write| -> Result<(), BoxError> {
        let html = askama::Template::render(&view)?;
        out.write_all(html.as_bytes())?;
        Ok(())
    });
    w.write_component(&component, StatusCode::OK);
}

fn server_error(w: &mut HxResponse, err: &StoreError) {
    tracing::error!(error = %err, "Snippet store failure");
    w.error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
}

/// First value of `key` in the query string.
fn query_param(uri: &Uri, key: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        let uri: Uri = "/snippet?id=12&id=13&x=%20y".parse().unwrap();
        assert_eq!(query_param(&uri, "id").as_deref(), Some("12"));
        assert_eq!(query_param(&uri, "x").as_deref(), Some(" y"));
        assert_eq!(query_param(&uri, "missing"), None);

        let uri: Uri = "/snippet".parse().unwrap();
        assert_eq!(query_param(&uri, "id"), None);
    }
}
