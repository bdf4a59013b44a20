use accord_core::AppResult;
use accord_domain::{LogEntry, LogResultSet, PaginationState};

/// One visible log row with its 1-based position in the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLogRow {
    /// Absolute row number, starting at 1 on page 1.
    pub number: usize,
    /// The log entry shown on this row.
    pub entry: LogEntry,
}

/// One page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    /// 1-based page number.
    pub page: usize,
    /// Whether this page is the one being shown.
    pub active: bool,
}

/// Visible slice of a result set plus its page selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Generation of the result set this page was cut from.
    pub generation: u64,
    /// Active page.
    pub current_page: usize,
    /// Page count for the result set.
    pub total_pages: usize,
    /// Rows on the active page, in server order.
    pub rows: Vec<NumberedLogRow>,
    /// One control per page.
    pub controls: Vec<PageControl>,
}

/// Pure pagination view over one installed result set.
///
/// A renderer is created per successful fetch, so navigation always acts on
/// the set it was built for.
#[derive(Debug, Clone)]
pub struct PaginationRenderer {
    result_set: LogResultSet,
    pagination: PaginationState,
}

impl PaginationRenderer {
    /// Creates a renderer positioned on page 1.
    #[must_use]
    pub fn new(result_set: LogResultSet) -> Self {
        let pagination = PaginationState::new(result_set.len());
        Self {
            result_set,
            pagination,
        }
    }

    /// Creates a renderer with a non-default page size.
    #[must_use]
    pub fn with_page_size(result_set: LogResultSet, page_size: usize) -> Self {
        let pagination = PaginationState::with_page_size(result_set.len(), page_size);
        Self {
            result_set,
            pagination,
        }
    }

    /// Returns the result set being paginated.
    #[must_use]
    pub fn result_set(&self) -> &LogResultSet {
        &self.result_set
    }

    /// Returns the page cursor.
    #[must_use]
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Renders the active page.
    #[must_use]
    pub fn render(&self) -> RenderedPage {
        let range = self.pagination.current_range();
        let first_number = range.start + 1;
        let rows = self
            .result_set
            .view(range)
            .iter()
            .enumerate()
            .map(|(offset, entry)| NumberedLogRow {
                number: first_number + offset,
                entry: entry.clone(),
            })
            .collect();

        let current_page = self.pagination.current_page();
        let controls = self
            .pagination
            .pages()
            .map(|page| PageControl {
                page,
                active: page == current_page,
            })
            .collect();

        RenderedPage {
            generation: self.result_set.generation(),
            current_page,
            total_pages: self.pagination.total_pages(),
            rows,
            controls,
        }
    }

    /// Moves to `page` and renders it. No request is issued.
    pub fn go_to_page(&mut self, page: usize) -> AppResult<RenderedPage> {
        self.pagination.go_to(page)?;
        Ok(self.render())
    }
}
