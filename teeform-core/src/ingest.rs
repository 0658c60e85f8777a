//! The ingestion service: validates an incoming submission, persists
//! the binary asset, and appends a record to the catalog.
//!
//! Clients may author placements in either unit system:
//!
//! - with a `canvas` field, `position`/`size` (and overlay geometry)
//!   are pixels on that canvas and get normalized to percentages here;
//! - without one, they are taken as already-normalized percentages.
//!
//! Either way the stored record is percent-of-canvas, and out-of-range
//! values are rejected rather than clamped.

use chrono::Utc;
use serde::Deserialize;
use teeform_model::{
    CanvasSize, PercentPlacement, PercentPoint, PercentSize, PixelPoint, PixelSize,
    SubmissionRecord, TextOverlay,
};
use tracing::info;

use crate::assets::{AssetStore, extension_for};
use crate::catalog::Catalog;
use crate::error::IngestError;

/// An incoming submission as received from the upload surface. The
/// placement fields carry the raw JSON text of the corresponding
/// multipart fields; parsing them is this module's job.
#[derive(Debug, Default)]
pub struct NewSubmission {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: Option<String>,
    pub position: Option<String>,
    pub size: Option<String>,
    pub text_overlays: Option<String>,
    pub canvas: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawExtent {
    width: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOverlay {
    text: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
    font_size: f64,
}

/// Validates submissions and records them durably.
#[derive(Debug, Clone)]
pub struct IngestService {
    catalog: Catalog,
    assets: AssetStore,
    max_upload_bytes: u64,
}

impl IngestService {
    pub fn new(catalog: Catalog, assets: AssetStore, max_upload_bytes: u64) -> Self {
        Self {
            catalog,
            assets,
            max_upload_bytes,
        }
    }

    /// Run the full ingestion path for one submission.
    ///
    /// All validation happens before any side effect. After the asset
    /// write, the only remaining step is the catalog append; if that
    /// fails the asset is orphaned on disk but no catalog entry exists,
    /// so the catalog never references a half-recorded submission.
    pub async fn submit(&self, submission: NewSubmission) -> Result<SubmissionRecord, IngestError> {
        let extension = extension_for(&submission.content_type).ok_or_else(|| {
            IngestError::UnsupportedMediaType(submission.content_type.clone())
        })?;

        let size = submission.bytes.len() as u64;
        if size > self.max_upload_bytes {
            return Err(IngestError::PayloadTooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }

        let canvas = parse_canvas(submission.canvas.as_deref())?;
        let placement = parse_placement(
            submission.position.as_deref(),
            submission.size.as_deref(),
            canvas,
        )?;
        let text_overlays = parse_overlays(submission.text_overlays.as_deref(), canvas)?;

        let asset_ref = self.assets.save(&submission.bytes, extension).await?;

        let record = SubmissionRecord {
            asset_ref,
            position: placement.position,
            size: placement.size,
            text_overlays,
            uploaded_at: Utc::now(),
        };
        self.catalog.append(record.clone()).await?;

        info!(
            asset = %record.asset_ref,
            filename = submission.filename.as_deref().unwrap_or("<unnamed>"),
            bytes = size,
            "submission recorded"
        );
        Ok(record)
    }
}

/// Parse the optional canvas field. Present-but-malformed is a client
/// error, as is a canvas with non-positive dimensions.
fn parse_canvas(raw: Option<&str>) -> Result<Option<CanvasSize>, IngestError> {
    let Some(raw) = raw else { return Ok(None) };

    let extent: RawExtent = serde_json::from_str(raw)
        .map_err(|err| IngestError::InvalidPlacement(format!("malformed canvas: {err}")))?;
    let canvas = CanvasSize::new(extent.width, extent.height);
    if !canvas.is_valid() {
        return Err(IngestError::InvalidPlacement(format!(
            "canvas dimensions must be positive, got {}x{}",
            extent.width, extent.height
        )));
    }
    Ok(Some(canvas))
}

/// Parse and normalize the position/size fields. Both are required;
/// missing or malformed input fails instead of silently defaulting.
fn parse_placement(
    position: Option<&str>,
    size: Option<&str>,
    canvas: Option<CanvasSize>,
) -> Result<PercentPlacement, IngestError> {
    let position = position
        .ok_or_else(|| IngestError::InvalidPlacement("position field is required".into()))?;
    let size =
        size.ok_or_else(|| IngestError::InvalidPlacement("size field is required".into()))?;

    let point: RawPoint = serde_json::from_str(position)
        .map_err(|err| IngestError::InvalidPlacement(format!("malformed position: {err}")))?;
    let extent: RawExtent = serde_json::from_str(size)
        .map_err(|err| IngestError::InvalidPlacement(format!("malformed size: {err}")))?;

    let placement = match canvas {
        Some(canvas) => PercentPlacement::to_percent(
            PixelPoint::new(point.x, point.y),
            PixelSize::new(extent.width, extent.height),
            canvas,
        )
        .map_err(|err| IngestError::InvalidPlacement(err.to_string()))?,
        None => PercentPlacement {
            position: PercentPoint::new(point.x, point.y),
            size: PercentSize::new(extent.width, extent.height),
        },
    };

    placement
        .ensure_in_bounds()
        .map_err(|err| IngestError::InvalidPlacement(err.to_string()))?;
    Ok(placement)
}

/// Parse the optional overlay array, normalizing geometry into percent
/// units when the placement was authored in pixels.
fn parse_overlays(
    raw: Option<&str>,
    canvas: Option<CanvasSize>,
) -> Result<Vec<TextOverlay>, IngestError> {
    let Some(raw) = raw else { return Ok(Vec::new()) };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let overlays: Vec<RawOverlay> = serde_json::from_str(raw)
        .map_err(|err| IngestError::InvalidOverlay(err.to_string()))?;

    Ok(overlays
        .into_iter()
        .map(|overlay| match canvas {
            Some(canvas) => TextOverlay {
                text: overlay.text,
                x: overlay.x / canvas.width * 100.0,
                y: overlay.y / canvas.height * 100.0,
                width: overlay.width / canvas.width * 100.0,
                height: overlay.height / canvas.height * 100.0,
                color: overlay.color,
                font_size: overlay.font_size / canvas.height * 100.0,
            },
            None => TextOverlay {
                text: overlay.text,
                x: overlay.x,
                y: overlay.y,
                width: overlay.width,
                height: overlay.height,
                color: overlay.color,
                font_size: overlay.font_size,
            },
        })
        .collect())
}
