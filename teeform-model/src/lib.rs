//! Core data model definitions shared across Teeform crates.
//!
//! Everything here is plain data: geometry newtypes, the placement
//! normalizer, submission records, and the wire types exchanged between
//! the server and the gallery client. No IO happens in this crate.
#![allow(missing_docs)]

pub mod error;
pub mod geometry;
pub mod overlay;
pub mod placement;
pub mod record;
pub mod wire;

// Intentionally curated re-exports for downstream consumers.
pub use error::{PlacementError, Result as ModelResult};
pub use geometry::{CanvasSize, PercentPoint, PercentSize, PixelPoint, PixelSize};
pub use overlay::TextOverlay;
pub use placement::PercentPlacement;
pub use record::{AssetRef, SubmissionRecord};
pub use wire::GalleryPage;
