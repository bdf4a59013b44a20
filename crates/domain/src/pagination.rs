use std::ops::{Range, RangeInclusive};

use accord_core::{AppError, AppResult};

/// Number of log rows shown per page.
pub const PAGE_SIZE: usize = 20;

/// Half-open row interval covered by one page.
///
/// A zero page size is treated as one so every function stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    start: usize,
    end: usize,
}

impl PageBounds {
    /// Returns `max(1, ceil(total_rows / page_size))`.
    #[must_use]
    pub fn page_count(total_rows: usize, page_size: usize) -> usize {
        total_rows.div_ceil(page_size.max(1)).max(1)
    }

    /// Returns `[(page - 1) * page_size, (page - 1) * page_size + page_size)` for a 1-based page.
    #[must_use]
    pub fn slice_bounds(page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let start = page.saturating_sub(1).saturating_mul(page_size);
        Self {
            start,
            end: start.saturating_add(page_size),
        }
    }

    /// Returns the unclamped start index.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the unclamped end index (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Clamps the interval to `[0, total_rows)`.
    #[must_use]
    pub fn clamp_to(&self, total_rows: usize) -> Range<usize> {
        let end = self.end.min(total_rows);
        self.start.min(end)..end
    }
}

/// Page cursor over one installed result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    total_rows: usize,
    total_pages: usize,
    current_page: usize,
}

impl PaginationState {
    /// Creates state at page 1 with the fixed page size.
    #[must_use]
    pub fn new(total_rows: usize) -> Self {
        Self::with_page_size(total_rows, PAGE_SIZE)
    }

    /// Creates state at page 1 with an explicit page size.
    #[must_use]
    pub fn with_page_size(total_rows: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            total_rows,
            total_pages: PageBounds::page_count(total_rows, page_size),
            current_page: 1,
        }
    }

    /// Moves to `page`, which must satisfy `1 <= page <= total_pages`.
    pub fn go_to(&mut self, page: usize) -> AppResult<()> {
        if page == 0 || page > self.total_pages {
            return Err(AppError::Validation(format!(
                "page {page} is outside 1..={}",
                self.total_pages
            )));
        }

        self.current_page = page;
        Ok(())
    }

    /// Returns the active 1-based page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the page count, never below one.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of rows being paginated.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns every selectable page number.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// Returns the clamped row range of the active page.
    #[must_use]
    pub fn current_range(&self) -> Range<usize> {
        PageBounds::slice_bounds(self.current_page, self.page_size).clamp_to(self.total_rows)
    }
}
