//! Page slicing and the compact page-number window.
//!
//! Pages are 1-based. Everything here is a pure function of the filtered
//! item count, the page size and the requested page; nothing ever panics on an
//! out-of-range page.

use std::fmt;
use std::num::NonZeroUsize;

/// Page size used when nothing is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes a surface offers when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Page counts at or below this show every page number without ellipses.
const FULL_WINDOW_MAX_PAGES: usize = 5;

// ===== PageSize =====

/// Number of items per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Smart constructor: returns `None` for zero.
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// The size as a plain count.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

/// [`DEFAULT_PAGE_SIZE_OPTIONS`] as page sizes, ascending.
pub fn default_page_size_options() -> Vec<PageSize> {
    DEFAULT_PAGE_SIZE_OPTIONS
        .iter()
        .filter_map(|&n| PageSize::new(n))
        .collect()
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== PageToken =====

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A page number, 1-based.
    Page(usize),
    /// A gap of skipped page numbers.
    Ellipsis,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(n) => write!(f, "{n}"),
            PageToken::Ellipsis => f.write_str("..."),
        }
    }
}

// ===== Pure Functions =====

/// `ceil(total_items / page_size)`; zero when there are no items.
pub fn page_count(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Items on `page` (1-based). Empty when the page is out of range.
pub fn slice<T>(view: &[T], page: usize, page_size: PageSize) -> &[T] {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size);
    if page == 0 || start >= view.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(view.len());
    &view[start..end]
}

/// Tokens for the navigation control around `current_page`.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always present, with a three-page cluster around the current page
/// (pinned to pages 2-4 near the start and to the last three before the end
/// near the end) and an ellipsis wherever a gap remains.
pub fn window_tokens(current_page: usize, total_pages: usize) -> Vec<PageToken> {
    if total_pages <= FULL_WINDOW_MAX_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let (start, end) = if current <= 3 {
        (2, 4)
    } else if current >= total_pages - 2 {
        (total_pages - 3, total_pages - 1)
    } else {
        (current - 1, current + 1)
    };

    let mut tokens = Vec::with_capacity(7);
    tokens.push(PageToken::Page(1));
    if start > 2 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.extend((start..=end).map(PageToken::Page));
    if end < total_pages - 1 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total_pages));
    tokens
}

// ===== PageWindow =====

/// The current page position over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page, 1-based.
    pub page: usize,
    /// Items per page.
    pub page_size: PageSize,
    /// Length of the filtered view.
    pub total_items: usize,
}

impl PageWindow {
    /// Build a window; `page` is clamped to at least 1.
    pub fn new(page: usize, page_size: PageSize, total_items: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total_items,
        }
    }

    /// Number of pages; 0 for an empty view.
    pub fn total_pages(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    /// Whether the navigation control should be shown at all.
    pub fn has_pages(&self) -> bool {
        self.total_pages() > 0
    }

    /// True when the page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages().max(1)
    }

    /// Zero-based index range of the current page within the filtered view,
    /// clamped to the item count.
    pub fn item_range(&self) -> std::ops::Range<usize> {
        let size = self.page_size.get();
        let start = (self.page - 1).saturating_mul(size).min(self.total_items);
        let end = start.saturating_add(size).min(self.total_items);
        start..end
    }

    /// Page-number window for the navigation control.
    pub fn tokens(&self) -> Vec<PageToken> {
        window_tokens(self.page, self.total_pages())
    }

    /// True unless on the first page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// True unless on the last page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Page to land on after the item count shrank under the current page.
    ///
    /// Returns `None` when the current page still exists. Otherwise steps back
    /// to the last existing page (page 1 when nothing is left), which for the
    /// usual case of emptying the trailing page is `page - 1`.
    pub fn healed_page(&self) -> Option<usize> {
        if self.is_out_of_range() {
            Some(self.total_pages().max(1))
        } else {
            None
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
