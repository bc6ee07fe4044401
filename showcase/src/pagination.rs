//! Fixed-size paging over a filtered list.
//!
//! An empty list is still page 1 of 1 so the UI can render its empty state
//! without special-casing. Out-of-range navigation is a no-op, never an
//! error, and a new filtered list means a fresh `Pagination` back at page 1.

use serde::{Serialize, Serializer};

const PAGE_WINDOW: usize = 5;

/// One entry of the rendered page-number strip: a page or an ellipsis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMark {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMark::Page(page) => serializer.serialize_u64(*page as u64),
            PageMark::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    current_page: usize,
    per_page: usize,
    total_items: usize,
}

impl Pagination {
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page).max(1)
    }

    /// Move to `page` if it is within range. Reports whether the page
    /// changed; out-of-range requests leave the state untouched.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }

        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        if self.current_page == 1 {
            return false;
        }
        self.go_to(self.current_page - 1)
    }

    /// The current page's window of `items`. The caller passes the same
    /// filtered list the pagination was sized from.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1) * self.per_page;
        let end = (start + self.per_page).min(items.len());

        if start >= items.len() {
            return &[];
        }

        &items[start..end]
    }

    /// Page numbers for display: all of them up to 5 pages, otherwise a
    /// 5-wide run anchored at `current - 2`, with `1 ...` and `... last`
    /// whenever the run does not touch that edge.
    pub fn page_numbers(&self) -> Vec<PageMark> {
        let total = self.total_pages();
        let mut marks = Vec::new();

        if total <= PAGE_WINDOW {
            marks.extend((1..=total).map(PageMark::Page));
            return marks;
        }

        let start = self.current_page.saturating_sub(2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(total);

        if start > 1 {
            marks.push(PageMark::Page(1));
            marks.push(PageMark::Ellipsis);
        }

        marks.extend((start..=end).map(PageMark::Page));

        if end < total {
            marks.push(PageMark::Ellipsis);
            marks.push(PageMark::Page(total));
        }

        marks
    }
}
