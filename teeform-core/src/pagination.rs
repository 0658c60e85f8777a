//! Offset-based pagination over catalog snapshots.
//!
//! A page is a derived view, never persisted: the slice
//! `[offset, offset + limit)` of the append-ordered catalog plus a
//! `has_more` continuation signal. No sorting, filtering, or dedup
//! happens here; the slice order is exactly the store's append order.

use teeform_model::{GalleryPage, SubmissionRecord};

use crate::catalog::Catalog;
use crate::error::CatalogError;

/// A validated page request: `page >= 1`, `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

/// Page size used when a client does not ask for one.
pub const DEFAULT_LIMIT: usize = 6;

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Result<Self, InvalidPageRequest> {
        if page < 1 {
            return Err(InvalidPageRequest::Page(page));
        }
        if limit < 1 {
            return Err(InvalidPageRequest::Limit(limit));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A page request outside the contract. Callers map this to a 4xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPageRequest {
    #[error("page must be >= 1, got {0}")]
    Page(usize),
    #[error("limit must be >= 1, got {0}")]
    Limit(usize),
}

/// Slice one page out of a catalog snapshot.
///
/// Pure and total: an offset at or past the end yields an empty page
/// with `has_more = false` rather than an error, and identical inputs
/// always yield identical output.
pub fn paginate(records: &[SubmissionRecord], request: PageRequest) -> GalleryPage {
    let offset = request.offset().min(records.len());
    let end = offset.saturating_add(request.limit()).min(records.len());

    GalleryPage {
        images: records[offset..end].to_vec(),
        has_more: end < records.len(),
    }
}

/// Read path over the catalog. Stateless: every call works on a fresh
/// snapshot, so it may run concurrently with appends and with itself.
#[derive(Debug, Clone)]
pub struct PaginationService {
    catalog: Catalog,
}

impl PaginationService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub async fn list(&self, request: PageRequest) -> Result<GalleryPage, CatalogError> {
        let records = self.catalog.load().await?;
        Ok(paginate(&records, request))
    }
}
