//! Envelope of paged collection responses.

use serde::{Deserialize, Serialize};

/// One page of a collection.
///
/// Collections answer with `{"count": .., "next": .., "previous": .., "results": [..]}`
/// where `next` is the link to the following page or `null` on the last one.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total number of rows across all pages, if reported.
    #[serde(default)]
    pub count: Option<u64>,
    /// Link to the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Rows of this page.
    pub results: Vec<T>,
}

/// Query parameters sent with the first page request.
#[derive(Debug, Default, Serialize)]
pub(crate) struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
