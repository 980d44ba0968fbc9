//! Listing query normalisation and pagination helpers.
//!
//! Lives in `core` so the repository and the HTTP layer agree on defaults and
//! on how the search text is turned into a `LIKE` pattern.

use serde::Serialize;

use crate::asset_type::AssetType;

/// Default number of assets per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of assets per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalised listing request.
///
/// `search` and `asset_type` are `None` when no filter applies. Soft-deleted
/// records are always excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub asset_type: Option<AssetType>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            asset_type: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Build a query from user input, clamping paging values and dropping
    /// blank search text.
    pub fn new(
        search: Option<&str>,
        asset_type: Option<AssetType>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            asset_type,
            page: clamp_page(page),
            page_size: clamp_page_size(page_size),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// `ILIKE` pattern for the search text, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Wrap `text` as a substring pattern, escaping `LIKE` wildcards so they
/// match literally. Uses PostgreSQL's default `\` escape character.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// One page of results plus the totals needed to render pagination links.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub last_page: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, total: i64, query: &ListQuery) -> Self {
        Self {
            data,
            total,
            page: query.page,
            page_size: query.page_size,
            last_page: last_page(total, query.page_size),
        }
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            last_page: self.last_page,
        }
    }
}

/// Number of the last page; an empty result still has page 1.
pub fn last_page(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + page_size - 1) / page_size
    }
}
