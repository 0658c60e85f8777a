//! The incremental loader: an explicit state machine that accumulates
//! gallery pages and owns its single outstanding request.
//!
//! Visibility of the last rendered item hands out at most one
//! [`FetchTicket`]; applying the ticket's result always releases the
//! in-flight slot, succeed or fail. A loader disposed mid-fetch
//! discards the eventual response instead of mutating dead state.

use std::collections::HashSet;

use teeform_model::{AssetRef, GalleryPage, SubmissionRecord};
use tracing::debug;

use crate::error::LoaderError;

/// Where the loader sits between fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Ready to fetch the next page.
    Idle,
    /// Exactly one request is outstanding.
    Fetching,
    /// The server reported no more pages; no further fetches happen.
    Exhausted,
}

/// Proof that the loader granted a fetch. Consumed by
/// [`GalleryLoader::apply`], so a response can be applied at most once.
#[derive(Debug)]
pub struct FetchTicket {
    page: usize,
    limit: usize,
}

impl FetchTicket {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// What applying a fetch result did to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// `appended` new records landed (duplicates were suppressed).
    Applied { appended: usize, exhausted: bool },
    /// The loader was in flight, exhausted, or disposed; nothing ran.
    Skipped,
    /// The loader was disposed while the fetch was outstanding; the
    /// response was dropped.
    Discarded,
}

/// Abstraction over the transport so the machine can be driven by the
/// real [`crate::ApiClient`] or a scripted source in tests.
#[async_trait::async_trait]
pub trait PageSource {
    async fn fetch_page(&self, page: usize, limit: usize) -> Result<GalleryPage, LoaderError>;
}

/// Page size requested when the caller does not pick one; matches the
/// server's own default.
pub const DEFAULT_PAGE_LIMIT: usize = 6;

/// Client-resident accumulator over the paginated catalog.
#[derive(Debug)]
pub struct GalleryLoader {
    accumulated: Vec<SubmissionRecord>,
    seen: HashSet<AssetRef>,
    next_page: usize,
    limit: usize,
    phase: LoaderPhase,
    disposed: bool,
}

impl Default for GalleryLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl GalleryLoader {
    pub fn new(limit: usize) -> Self {
        Self {
            accumulated: Vec::new(),
            seen: HashSet::new(),
            next_page: 1,
            limit,
            phase: LoaderPhase::Idle,
            disposed: false,
        }
    }

    /// The last accumulated item; the caller's visibility observer
    /// watches this one to schedule the next fetch.
    pub fn last_record(&self) -> Option<&SubmissionRecord> {
        self.accumulated.last()
    }

    /// Records accumulated so far, in server order, deduplicated by
    /// asset reference.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.accumulated
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == LoaderPhase::Exhausted
    }

    pub fn in_flight(&self) -> bool {
        self.phase == LoaderPhase::Fetching
    }

    pub fn next_page(&self) -> usize {
        self.next_page
    }

    /// The last accumulated item became visible; grant a fetch if one
    /// is warranted. Repeated visibility events while a fetch is
    /// outstanding return `None`, which is the at-most-one-in-flight
    /// invariant.
    pub fn on_last_item_visible(&mut self) -> Option<FetchTicket> {
        self.begin_fetch()
    }

    /// Grant the single outstanding fetch, or `None` while in flight,
    /// exhausted, or disposed.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.disposed || self.phase != LoaderPhase::Idle {
            return None;
        }

        self.phase = LoaderPhase::Fetching;
        Some(FetchTicket {
            page: self.next_page,
            limit: self.limit,
        })
    }

    /// Apply the result of a granted fetch. Always releases the
    /// in-flight slot. On success, appends the page's unseen records in
    /// server order and advances; on failure, leaves the accumulated
    /// state and `next_page` untouched and surfaces the error.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<GalleryPage, LoaderError>,
    ) -> Result<FetchOutcome, LoaderError> {
        debug_assert_eq!(ticket.page, self.next_page);

        if self.disposed {
            // Torn down mid-fetch: drop the response, never mutate.
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let mut appended = 0;
                for record in page.images {
                    if self.seen.insert(record.asset_ref.clone()) {
                        self.accumulated.push(record);
                        appended += 1;
                    }
                }

                self.next_page += 1;
                self.phase = if page.has_more {
                    LoaderPhase::Idle
                } else {
                    LoaderPhase::Exhausted
                };

                debug!(
                    appended,
                    total = self.accumulated.len(),
                    exhausted = self.is_exhausted(),
                    "gallery page applied"
                );
                Ok(FetchOutcome::Applied {
                    appended,
                    exhausted: self.is_exhausted(),
                })
            }
            Err(err) => {
                self.phase = LoaderPhase::Idle;
                Err(err)
            }
        }
    }

    /// Run one visibility-triggered fetch against `source`. Skips when
    /// nothing is warranted, so callers can invoke this on every
    /// visibility event.
    pub async fn request_more<S: PageSource>(
        &mut self,
        source: &S,
    ) -> Result<FetchOutcome, LoaderError> {
        let Some(ticket) = self.begin_fetch() else {
            return Ok(FetchOutcome::Skipped);
        };

        let result = source.fetch_page(ticket.page, ticket.limit).await;
        self.apply(ticket, result)
    }

    /// Tear the loader down. Any outstanding fetch result will be
    /// discarded instead of applied.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}
