use autocatalog_core::error::CoreError;
use autocatalog_core::search::{SearchRequest, SortField};
use serde::Deserialize;

/// Raw search query parameters shared by every `/search` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchParams {
    /// Apply defaults and resolve the sort key against `F`'s allow-list.
    pub fn into_request<F: SortField>(self) -> Result<SearchRequest<F>, CoreError> {
        SearchRequest::new(
            self.q,
            self.sort.as_deref(),
            self.direction.as_deref(),
            self.page,
            self.size,
        )
    }
}
