//! # Teeform Loader
//!
//! Client-side consumer of the gallery API: accumulates pages,
//! suppresses duplicates, and drives further fetches from
//! viewport-visibility events while guaranteeing at most one request
//! is ever in flight.
#![allow(missing_docs)]

pub mod api_client;
pub mod error;
pub mod loader;

pub use api_client::ApiClient;
pub use error::LoaderError;
pub use loader::{
    DEFAULT_PAGE_LIMIT, FetchOutcome, FetchTicket, GalleryLoader, LoaderPhase, PageSource,
};
