//! Page state for paginated tables.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default page sizes offered by the page size picker.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Who slices the data into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// The table holds every row and slices the processed set itself.
    /// `total` is derived from the processed row count.
    #[default]
    Client,
    /// The host already sliced the data. The table renders the rows as
    /// given and reports the host's `total`.
    Server,
}

/// Pagination position.
///
/// `page` is 1-based. The invariant `1 <= page <= max(1, total_pages)` is
/// restored by [`Pagination::clamped`].
///
/// # Example
///
/// ```
/// use party_grid::Pagination;
///
/// let page = Pagination::new(10).unwrap().with_total(25).with_page(3);
/// assert_eq!(page.total_pages(), 3);
/// assert_eq!(page.range(), 20..25);
/// assert_eq!((page.start_row(), page.end_row()), (21, 25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// A partial pagination update, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Pagination {
    /// First page with the given page size.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize(page_size));
        }
        Ok(Self {
            page: 1,
            page_size,
            total: 0,
        })
    }

    /// Sets the current page (not clamped).
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the total row count.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// `ceil(total / page_size)`.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// The last valid page number, never below 1.
    pub fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    /// Copy with `page` pulled into `1..=last_page()`.
    pub fn clamped(mut self) -> Self {
        self.page = self.page.clamp(1, self.last_page());
        self
    }

    /// Index range of the current page within the processed set.
    pub fn range(&self) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = self.page.saturating_sub(1).saturating_mul(size).min(self.total);
        let end = self.page.saturating_mul(size).min(self.total);
        start..end
    }

    /// 1-based number of the first row on this page, 0 when empty.
    pub fn start_row(&self) -> usize {
        let range = self.range();
        if range.is_empty() { 0 } else { range.start + 1 }
    }

    /// 1-based number of the last row on this page, 0 when empty.
    pub fn end_row(&self) -> usize {
        self.range().end
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Apply a partial update.
    pub fn apply(mut self, change: PaginationChange) -> Self {
        if let Some(page_size) = change.page_size {
            self.page_size = page_size.max(1);
        }
        if let Some(page) = change.page {
            self.page = page;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(Pagination::new(0), Err(Error::InvalidPageSize(0)));
    }

    #[test]
    fn test_empty_total_has_one_page() {
        let p = Pagination::new(10).unwrap().with_page(4).clamped();
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.range(), 0..0);
        assert_eq!((p.start_row(), p.end_row()), (0, 0));
        assert!(!p.has_next());
        assert!(!p.has_previous());
    }

    #[test]
    fn test_clamp_upper_bound() {
        let p = Pagination::new(2).unwrap().with_total(3).with_page(9).clamped();
        assert_eq!(p.page, 2);
        assert_eq!(p.range(), 2..3);
    }

    #[test]
    fn test_apply_partial_change() {
        let p = Pagination::new(10).unwrap().with_total(100).with_page(4);
        let p = p.apply(PaginationChange {
            page: Some(1),
            page_size: Some(50),
        });
        assert_eq!((p.page, p.page_size, p.total), (1, 50, 100));
    }
}
