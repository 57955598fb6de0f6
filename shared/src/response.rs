//! API response envelopes
//!
//! The backend is inconsistent about list shapes: some endpoints return a
//! DRF-style page (`{results, count, next, previous}`), others a bare JSON
//! array. Both shapes are deliberately accepted everywhere a list is
//! fetched; which endpoint uses which is recorded in DESIGN.md.

use serde::{Deserialize, Serialize};

/// Paginated page of items (`{results, count, next, previous}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// A list response in either of the two shapes the backend produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Items of the page, regardless of shape.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Plain(items) => items,
        }
    }

    /// Total item count across all pages; for the plain shape this is
    /// just the array length.
    pub fn total(&self) -> u64 {
        match self {
            ListResponse::Paginated(page) => page.count,
            ListResponse::Plain(items) => items.len() as u64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListResponse::Paginated(page) => page.results.len(),
            ListResponse::Plain(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
