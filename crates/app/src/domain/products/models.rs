//! Product Models

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageRequest {
    #[error("limit must be between 1 and {MAX_PAGE_LIMIT}")]
    Limit,

    #[error("page must be a positive integer")]
    Page,
}

/// A validated page of the product catalog to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    page: u32,
}

impl PageRequest {
    /// Build a page request, applying defaults for omitted values.
    ///
    /// # Errors
    ///
    /// Returns an error when `limit` is outside `1..=MAX_PAGE_LIMIT` or `page` is zero.
    pub fn new(limit: Option<u32>, page: Option<u32>) -> Result<Self, InvalidPageRequest> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let page = page.unwrap_or(1);

        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(InvalidPageRequest::Limit);
        }

        if page == 0 {
            return Err(InvalidPageRequest::Page);
        }

        Ok(Self { limit, page })
    }

    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    pub(crate) fn offset(self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            page: 1,
        }
    }
}

/// One page of the product catalog.
#[derive(Debug, Clone)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
}

impl ProductsPage {
    /// Number of pages needed for `total` products; an empty catalog still has one page.
    #[must_use]
    pub fn pages_for(total: u64, limit: u32) -> u32 {
        let pages = total.div_ceil(u64::from(limit.max(1))).max(1);

        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn prev_page(&self) -> Option<u32> {
        if self.has_prev_page() {
            Some(self.page - 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next_page() {
            Some(self.page + 1)
        } else {
            None
        }
    }
}
