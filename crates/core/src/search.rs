//! Search & pagination policy shared by every list endpoint.
//!
//! Each resource supplies its own sort-field allow-list (a [`SortField`]
//! implementation) and filter predicate; paging, ordering direction, page
//! accounting and the next-page link are identical across resources.

use url::Url;

use crate::error::CoreError;
use crate::validation::NUL_MESSAGE;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the client does not send `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 4;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// A resource's sortable fields. Keys are the JSON field names clients send
/// in `?sort=`; matching is exact. The default variant is the identity field.
pub trait SortField: Copy + Default + 'static {
    /// Every accepted `(key, field)` pair.
    const ALLOWED: &'static [(&'static str, Self)];

    /// Resolve a requested key, silently falling back to the default.
    fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|key| {
            Self::ALLOWED
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, field)| *field)
        })
        .unwrap_or_default()
    }

    /// The client-facing key for this field.
    fn key(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any letter case selects descending; anything else ascends.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// A zero-based page request with a strictly positive size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Negative pages clamp to 0. A size of zero or less is rejected.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size <= 0 {
            return Err(CoreError::invalid("size", "must be greater than 0"));
        }
        Ok(Self {
            page: page.unwrap_or(0).max(0),
            size,
        })
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// Totals computed for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_items: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PageInfo {
    pub fn compute(total_items: i64, request: &PageRequest) -> Self {
        let total_pages = total_items / request.size + i64::from(total_items % request.size != 0);
        Self {
            total_items,
            total_pages,
            has_more: request.page < total_pages - 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized search request
// ---------------------------------------------------------------------------

/// A search request after defaults, clamping and allow-list resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest<F> {
    /// The raw `q` value; `None` when absent or blank.
    pub query: Option<String>,
    pub sort: F,
    pub direction: SortDirection,
    pub page: PageRequest,
}

impl<F: SortField> SearchRequest<F> {
    pub fn new(
        query: Option<String>,
        sort: Option<&str>,
        direction: Option<&str>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<Self, CoreError> {
        if query.as_deref().is_some_and(|q| q.contains('\0')) {
            return Err(CoreError::invalid("q", NUL_MESSAGE));
        }
        Ok(Self {
            query: query.filter(|q| !q.trim().is_empty()),
            sort: F::resolve(sort),
            direction: SortDirection::parse(direction),
            page: PageRequest::new(page, size)?,
        })
    }

    /// Link to the page after this one, or an empty string on the last page.
    ///
    /// The link is rooted at `base` (the public base URL) and carries `q`,
    /// `sort`, `direction`, `size` and the incremented `page`.
    pub fn next_page_url(&self, base: &Url, resource: &str, info: &PageInfo) -> String {
        if !info.has_more {
            return String::new();
        }

        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([resource, "search"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("q", self.query.as_deref().unwrap_or(""))
            .append_pair("sort", self.sort.key())
            .append_pair("direction", self.direction.key())
            .append_pair("page", &(self.page.page + 1).to_string())
            .append_pair("size", &self.page.size.to_string());
        url.to_string()
    }
}

// ---------------------------------------------------------------------------
// Text matching
// ---------------------------------------------------------------------------

/// Build a case-insensitive substring pattern for `ILIKE`.
///
/// LIKE wildcards in the user's text are escaped so they match literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    enum Field {
        #[default]
        Id,
        Name,
    }

    impl SortField for Field {
        const ALLOWED: &'static [(&'static str, Self)] = &[("id", Field::Id), ("name", Field::Name)];

        fn key(self) -> &'static str {
            match self {
                Field::Id => "id",
                Field::Name => "name",
            }
        }
    }

    fn base() -> Url {
        Url::parse("http://catalog.example:8080").unwrap()
    }

    // -- sorting ---------------------------------------------------------------

    #[test]
    fn sort_resolves_allowed_key() {
        assert_eq!(Field::resolve(Some("name")), Field::Name);
    }

    #[test]
    fn sort_falls_back_to_identity() {
        assert_eq!(Field::resolve(Some("password")), Field::Id);
        assert_eq!(Field::resolve(Some("NAME")), Field::Id);
        assert_eq!(Field::resolve(None), Field::Id);
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(None), SortDirection::Asc);
    }

    // -- paging ----------------------------------------------------------------

    #[test]
    fn page_defaults() {
        let page = PageRequest::new(None, None).unwrap();
        assert_eq!(page, PageRequest { page: 0, size: DEFAULT_PAGE_SIZE });
    }

    #[test]
    fn negative_page_clamps_to_zero() {
        let page = PageRequest::new(Some(-3), Some(10)).unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert_matches!(PageRequest::new(None, Some(0)), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(None, Some(-1)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn offset_is_page_times_size() {
        let page = PageRequest::new(Some(3), Some(5)).unwrap();
        assert_eq!(page.offset(), 15);
        assert_eq!(page.limit(), 5);
    }

    #[test]
    fn total_pages_is_ceiling() {
        let request = PageRequest::new(Some(0), Some(4)).unwrap();
        assert_eq!(PageInfo::compute(0, &request).total_pages, 0);
        assert_eq!(PageInfo::compute(4, &request).total_pages, 1);
        assert_eq!(PageInfo::compute(5, &request).total_pages, 2);
        assert_eq!(PageInfo::compute(8, &request).total_pages, 2);
    }

    #[test]
    fn huge_page_size_yields_a_single_page() {
        let request = PageRequest::new(Some(0), Some(i64::MAX)).unwrap();
        let info = PageInfo::compute(5, &request);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_more);

        let request = PageRequest::new(Some(i64::MAX), Some(i64::MAX)).unwrap();
        assert_eq!(request.offset(), i64::MAX);
        assert!(!PageInfo::compute(5, &request).has_more);
    }

    #[test]
    fn has_more_is_true_for_every_page_but_the_last() {
        for page in 0..3 {
            let request = PageRequest::new(Some(page), Some(4)).unwrap();
            let info = PageInfo::compute(10, &request);
            assert_eq!(info.total_pages, 3);
            assert_eq!(info.has_more, page < 2, "page {page}");
        }
    }

    #[test]
    fn has_more_is_false_past_the_end_and_when_empty() {
        let request = PageRequest::new(Some(7), Some(4)).unwrap();
        assert!(!PageInfo::compute(10, &request).has_more);
        let request = PageRequest::new(Some(0), Some(4)).unwrap();
        assert!(!PageInfo::compute(0, &request).has_more);
    }

    // -- search request -------------------------------------------------------

    #[test]
    fn blank_query_means_no_filter() {
        let request =
            SearchRequest::<Field>::new(Some("   ".into()), None, None, None, None).unwrap();
        assert_eq!(request.query, None);
    }

    #[test]
    fn nul_in_query_is_rejected() {
        let result = SearchRequest::<Field>::new(Some("a\0b".into()), None, None, None, None);
        assert_matches!(
            result,
            Err(CoreError::Validation(ref fields)) if fields[0].field == "q"
        );
    }

    #[test]
    fn next_page_url_preserves_query_and_size() {
        let request = SearchRequest::<Field>::new(
            Some("red car".into()),
            Some("name"),
            Some("DESC"),
            Some(0),
            Some(2),
        )
        .unwrap();
        let info = PageInfo::compute(5, &request.page);
        assert_eq!(
            request.next_page_url(&base(), "vehicles", &info),
            "http://catalog.example:8080/vehicles/search?q=red+car&sort=name&direction=desc&page=1&size=2"
        );
    }

    #[test]
    fn next_page_url_is_empty_on_last_page() {
        let request =
            SearchRequest::<Field>::new(None, None, None, Some(1), Some(2)).unwrap();
        let info = PageInfo::compute(4, &request.page);
        assert_eq!(request.next_page_url(&base(), "vehicles", &info), "");
    }

    #[test]
    fn next_page_url_keeps_base_path_prefix() {
        let base = Url::parse("https://example.com/catalog/").unwrap();
        let request = SearchRequest::<Field>::new(None, None, None, None, Some(1)).unwrap();
        let info = PageInfo::compute(3, &request.page);
        assert_eq!(
            request.next_page_url(&base, "accessories", &info),
            "https://example.com/catalog/accessories/search?q=&sort=id&direction=asc&page=1&size=1"
        );
    }

    // -- patterns --------------------------------------------------------------

    #[test]
    fn contains_pattern_wraps_and_escapes() {
        assert_eq!(contains_pattern("brake"), "%brake%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
