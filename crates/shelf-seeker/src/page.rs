//! Fixed-size pagination.
//!
//! Pages are numbered from 1. A sequence always has at least one page, so an
//! empty result reads as "page 1 of 1" rather than "page 1 of 0". Requested
//! page numbers outside `1..=total_pages` are clamped, never rejected.

use std::ops::Range;

use serde::Serialize;

use crate::error::{Result, SeekerError};

/// Metadata for one page of an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page number, 1-based.
    pub number: usize,
    /// Total number of pages, never less than 1.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Items per page.
    pub page_size: usize,
}

impl PageInfo {
    /// Returns `true` if there is a page before this one.
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Returns the index range of this page within the full sequence.
    pub fn range(&self) -> Range<usize> {
        let start = (self.number - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start.min(end)..end
    }
}

/// Slices ordered sequences into pages of a fixed size.
///
/// ```
/// use shelf_seeker::Paginator;
///
/// let pages = Paginator::new(50).unwrap();
/// assert_eq!(pages.total_pages(0), 1);
/// assert_eq!(pages.total_pages(101), 3);
///
/// let info = pages.page(101, 5);
/// assert_eq!(info.number, 3);
/// assert_eq!(info.range(), 100..101);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator. A page size of zero is rejected.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SeekerError::InvalidPageSize);
        }
        Ok(Paginator { page_size })
    }

    /// Returns the number of items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `ceil(count / page_size)`, with a floor of one page.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Clamps a requested page number into `1..=total_pages`.
    pub fn clamp(&self, count: usize, requested: usize) -> usize {
        requested.clamp(1, self.total_pages(count))
    }

    /// Describes the page that `requested` resolves to.
    pub fn page(&self, count: usize, requested: usize) -> PageInfo {
        PageInfo {
            number: self.clamp(count, requested),
            total_pages: self.total_pages(count),
            total_items: count,
            page_size: self.page_size,
        }
    }

    /// Returns the page after `current`, staying put on the last page.
    pub fn next(&self, count: usize, current: usize) -> usize {
        let current = self.clamp(count, current);
        if current < self.total_pages(count) {
            current + 1
        } else {
            current
        }
    }

    /// Returns the page before `current`, staying put on the first page.
    pub fn prev(&self, count: usize, current: usize) -> usize {
        let current = self.clamp(count, current);
        if current > 1 {
            current - 1
        } else {
            current
        }
    }

    /// Returns the items of the requested page along with its metadata.
    pub fn slice<'a, T>(&self, items: &'a [T], requested: usize) -> (&'a [T], PageInfo) {
        let info = self.page(items.len(), requested);
        (&items[info.range()], info)
    }
}
