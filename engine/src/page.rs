//! Page requests for list operations.

use crate::{error::Result, Error};
use serde::{Deserialize, Serialize};

/// A zero-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Items per page when the client does not say.
    pub const DEFAULT_SIZE: u32 = 20;

    /// Largest page a client may ask for.
    pub const MAX_SIZE: u32 = 2000;

    /// Build a page request from optional client parameters.
    ///
    /// `page` defaults to 0 and must not be negative; `size` defaults to
    /// [`Self::DEFAULT_SIZE`] and must lie in `1..=MAX_SIZE`.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self> {
        let page = match page {
            None => 0,
            Some(p) if p < 0 => {
                return Err(Error::InvalidPagination("page must not be negative"))
            }
            Some(p) => u32::try_from(p)
                .map_err(|_| Error::InvalidPagination("page is too large"))?,
        };

        let size = match size {
            None => Self::DEFAULT_SIZE,
            Some(s) if s < 1 || s > i64::from(Self::MAX_SIZE) => {
                return Err(Error::InvalidPagination("size must be between 1 and 2000"))
            }
            Some(s) => s as u32,
        };

        Ok(Self { page, size })
    }

    /// Page number, starting at 0.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Value for a SQL `OFFSET` clause.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Value for a SQL `LIMIT` clause.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// Cut this page out of an in-memory listing.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.size as usize).min(items.len());
        &items[start..end]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = PageRequest::new(None, None).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn offset_and_limit() {
        let page = PageRequest::new(Some(3), Some(25)).unwrap();
        assert_eq!(page.page(), 3);
        assert_eq!(page.size(), 25);
        assert_eq!(page.offset(), 75);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(PageRequest::new(Some(-1), None).is_err());
        assert!(PageRequest::new(None, Some(0)).is_err());
        assert!(PageRequest::new(None, Some(2001)).is_err());
        assert!(PageRequest::new(Some(i64::MAX), None).is_err());
        assert!(PageRequest::new(None, Some(2000)).is_ok());
    }

    #[test]
    fn slice_pages_through_items() {
        let items: Vec<u32> = (0..7).collect();

        let first = PageRequest::new(Some(0), Some(3)).unwrap();
        let last = PageRequest::new(Some(2), Some(3)).unwrap();
        let beyond = PageRequest::new(Some(5), Some(3)).unwrap();

        assert_eq!(first.slice(&items), &[0, 1, 2]);
        assert_eq!(last.slice(&items), &[6]);
        assert!(beyond.slice(&items).is_empty());
    }
}
