//! View types for snippet template rendering.
//!
//! Views are askama templates compiled into the binary, so each template is
//! parsed once and looked up by name for the life of the process. Views
//! carry pre-formatted strings so templates stay simple.

use askama::Template;
use chrono::{DateTime, Datelike, Utc};

use crate::snippets::model::Snippet;

/// A page or fragment that can be rendered for a response.
pub trait View: Template {
    /// Template file backing this view, relative to `templates/`.
    const TEMPLATE_NAME: &'static str;

    /// Last chance to adjust the data before the template executes.
    fn prepare(&mut self) {}
}

/// Display form of a snippet.
#[derive(Debug, Clone)]
pub struct SnippetRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created: String,
    pub expires: String,
}

impl SnippetRow {
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id.clone(),
            title: snippet.title.clone(),
            content: snippet.content.clone(),
            created: human_date(&snippet.created),
            expires: human_date(&snippet.expires),
        }
    }
}

/// `02 Jan 2006 at 15:04`
pub fn human_date(t: &DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Orders rows by the numeric value of their id, so `2` comes before `10`.
/// Ids that are not numbers sort first.
pub fn sort_by_numeric_id(rows: &mut [SnippetRow]) {
    rows.sort_by_key(|row| row.id.parse::<u64>().unwrap_or(0));
}

fn rows(snippets: &[Snippet]) -> Vec<SnippetRow> {
    snippets.iter().map(SnippetRow::from_snippet).collect()
}

// ── Home ────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub current_year: i32,
    pub snippets: Vec<SnippetRow>,
}

impl HomePage {
    pub fn new(snippets: &[Snippet]) -> Self {
        Self {
            current_year: current_year(),
            snippets: rows(snippets),
        }
    }
}

impl View for HomePage {
    const TEMPLATE_NAME: &'static str = "home.html";

    fn prepare(&mut self) {
        sort_by_numeric_id(&mut self.snippets);
    }
}

// ── Snippet detail ──────────────────────────────────────────────

#[derive(Template)]
#[template(path = "snippet.html")]
pub struct SnippetPage {
    pub current_year: i32,
    pub snippet: SnippetRow,
}

impl SnippetPage {
    pub fn new(snippet: &Snippet) -> Self {
        Self {
            current_year: current_year(),
            snippet: SnippetRow::from_snippet(snippet),
        }
    }
}

impl View for SnippetPage {
    const TEMPLATE_NAME: &'static str = "snippet.html";
}

// ── Snippets list fragment ──────────────────────────────────────

#[derive(Template)]
#[template(path = "snippets_list.html")]
pub struct SnippetsList {
    pub snippets: Vec<SnippetRow>,
}

impl SnippetsList {
    pub fn new(snippets: &[Snippet]) -> Self {
        Self {
            snippets: rows(snippets),
        }
    }
}

impl View for SnippetsList {
    const TEMPLATE_NAME: &'static str = "snippets_list.html";

    fn prepare(&mut self) {
        sort_by_numeric_id(&mut self.snippets);
    }
}
