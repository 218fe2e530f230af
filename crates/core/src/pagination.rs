//! Page slicing and the listing envelope shared by every listable resource.
//!
//! A listing response always has the shape
//! `{ items, total, pages, current_page, per_page }`. Requesting a page past
//! the last one is not an error: it yields an empty `items` array while
//! `total` and `pages` still describe the full result set.

use serde::Serialize;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: i64 = 100;

/// A normalized `(page, per_page)` pair. Both values are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Build a request from raw query values.
    ///
    /// Missing values take the defaults; values below 1 are raised to 1 and
    /// `per_page` is capped at [`MAX_PER_PAGE`].
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// SQL `OFFSET` for this page. Saturates instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Number of pages needed to hold `total` rows, `0` when there are none.
pub fn page_count(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// The listing envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            pages: page_count(total, request.per_page()),
            current_page: request.page(),
            per_page: request.per_page(),
        }
    }

    /// Transform every item while keeping the counters intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
            current_page: self.current_page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_missing() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page(), 1);
        assert_eq!(req.per_page(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn values_below_one_are_raised() {
        let req = PageRequest::new(Some(0), Some(-5));
        assert_eq!(req.page(), 1);
        assert_eq!(req.per_page(), 1);
    }

    #[test]
    fn per_page_is_capped() {
        let req = PageRequest::new(Some(2), Some(10_000));
        assert_eq!(req.per_page(), MAX_PER_PAGE);
        assert_eq!(req.offset(), MAX_PER_PAGE);
    }

    #[test]
    fn offset_for_third_page() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn offset_saturates() {
        let req = PageRequest::new(Some(i64::MAX), Some(100));
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 7), 4);
    }

    #[test]
    fn envelope_past_last_page_keeps_totals() {
        let req = PageRequest::new(Some(9), Some(5));
        let page: Page<i32> = Page::new(Vec::new(), 12, req);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 12);
        assert_eq!(page.pages, 3);
        assert_eq!(page.current_page, 9);
        assert_eq!(page.per_page, 5);
    }

    #[test]
    fn map_preserves_counters() {
        let page = Page::new(vec![1, 2], 2, PageRequest::default()).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 2);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn envelope_serializes_expected_keys() {
        let page = Page::new(vec!["a"], 1, PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        for key in ["items", "total", "pages", "current_page", "per_page"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
