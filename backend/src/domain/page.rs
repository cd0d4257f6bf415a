//! Offset pagination parameters for list queries.

use std::fmt;

/// Page used when the client does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Rejected pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestError {
    /// Pages are numbered from 1.
    PageOutOfRange,
    /// Page size must lie in `1..=MAX_PAGE_SIZE`.
    PageSizeOutOfRange { max: u32 },
}

impl fmt::Display for PageRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageOutOfRange => write!(f, "page must be at least 1"),
            Self::PageSizeOutOfRange { max } => {
                write!(f, "pageSize must be between 1 and {max}")
            }
        }
    }
}

impl std::error::Error for PageRequestError {}

/// Validated page number and size.
///
/// # Examples
/// ```
/// use taskboard::domain::PageRequest;
///
/// let page = PageRequest::new(Some(3), Some(10)).unwrap();
/// assert_eq!(page.offset(), 20);
/// assert_eq!(page.limit(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate optional client-supplied values, falling back to defaults.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeOutOfRange { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    /// Rows to return.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// Convert each item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}
