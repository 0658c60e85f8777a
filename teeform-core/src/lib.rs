//! # Teeform Core
//!
//! Domain services for the Teeform design gallery:
//!
//! - [`catalog`]: the durable, append-ordered collection of submission
//!   records, with all writes serialized through a single writer task
//! - [`assets`]: persistence for uploaded design binaries
//! - [`ingest`]: validation and recording of incoming submissions
//! - [`pagination`]: offset-based slicing of catalog snapshots
//!
//! The crate owns no HTTP surface; `teeform-server` maps these services
//! onto routes.
#![allow(missing_docs)]

pub mod assets;
pub mod catalog;
pub mod error;
pub mod ingest;
pub mod pagination;

pub use assets::AssetStore;
pub use catalog::Catalog;
pub use error::{CatalogError, IngestError};
pub use ingest::{IngestService, NewSubmission};
pub use pagination::{DEFAULT_LIMIT, InvalidPageRequest, PageRequest, PaginationService, paginate};
