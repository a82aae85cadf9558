use crate::utils::error::{FlightError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// How `has_next` is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HasNextPolicy {
    /// A full page implies more may follow. Reports a next page that turns out empty when
    /// the collection length is an exact multiple of the page size.
    #[default]
    FullPage,
    /// Checks whether any item exists past the current page.
    Exact,
}

/// Validated page coordinates. The page index is clamped at zero; the page size must be
/// at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        if page_size < 1 {
            return Err(FlightError::invalid_argument(
                "page_size",
                page_size,
                "page size must be at least 1",
            ));
        }
        if page < 0 {
            tracing::debug!("Clamping page index {} to 0", page);
        }

        Ok(Self {
            page: usize::try_from(page.max(0)).unwrap_or(usize::MAX),
            page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub visible: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }
}

pub fn paginate<T>(items: &[T], request: PageRequest, policy: HasNextPolicy) -> Page<'_, T> {
    let PageRequest { page, page_size } = request;

    let start = page.checked_mul(page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(page_size);
    let visible = if start >= items.len() {
        &items[0..0]
    } else {
        &items[start..end.min(items.len())]
    };

    let has_next = match policy {
        HasNextPolicy::FullPage => visible.len() == page_size,
        HasNextPolicy::Exact => end < items.len(),
    };

    tracing::debug!(
        "Page {} shows {} of {} items (has_next: {})",
        page,
        visible.len(),
        items.len(),
        has_next
    );

    Page {
        visible,
        page,
        page_size,
        total_items: items.len(),
        has_previous: page > 0,
        has_next,
    }
}
