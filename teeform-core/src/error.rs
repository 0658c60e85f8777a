use thiserror::Error;

/// Failures on the catalog read/write paths.
///
/// A catalog file that exists but does not parse is deliberately *not*
/// represented here: the read path degrades to an empty catalog and
/// reports the condition through tracing instead of failing the caller.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("catalog writer task is no longer running")]
    WriterUnavailable,
}

/// Failures while ingesting a submission. The first four are
/// user-correctable validation errors; the rest are operational.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("payload of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid text overlays: {0}")]
    InvalidOverlay(String),

    #[error("failed to store asset: {0}")]
    Storage(#[source] std::io::Error),

    #[error("failed to record submission: {0}")]
    Catalog(#[from] CatalogError),
}

impl IngestError {
    /// Whether the client can fix this by correcting its request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IngestError::UnsupportedMediaType(_)
                | IngestError::PayloadTooLarge { .. }
                | IngestError::InvalidPlacement(_)
                | IngestError::InvalidOverlay(_)
        )
    }
}
