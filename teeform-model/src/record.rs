//! The persisted unit describing one uploaded design and its placement.

use chrono::{DateTime, Utc};
use crate::geometry::{PercentPoint, PercentSize};
use crate::overlay::TextOverlay;

/// Opaque reference to a stored binary asset, e.g. `/uploads/<name>.png`.
///
/// Unique per record; the catalog does not enforce content uniqueness —
/// two records may point at visually identical uploads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        AssetRef(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetRef {
    fn from(path: String) -> Self {
        AssetRef(path)
    }
}

/// One catalog entry. Field names follow the persisted JSON layout
/// (`url`, `position`, `size`, `textOverlays`, `uploadedAt`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmissionRecord {
    #[cfg_attr(feature = "serde", serde(rename = "url"))]
    pub asset_ref: AssetRef,
    /// Top-left corner as percentages (0–100) of the reference canvas.
    pub position: PercentPoint,
    /// Extent as percentages (0–100) of the reference canvas.
    pub size: PercentSize,
    /// Catalogs written before overlays existed omit this field.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "textOverlays", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub text_overlays: Vec<TextOverlay>,
    /// Assigned by the ingestion service at append time.
    #[cfg_attr(feature = "serde", serde(rename = "uploadedAt"))]
    pub uploaded_at: DateTime<Utc>,
}
