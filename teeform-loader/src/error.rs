use thiserror::Error;

/// Failures while fetching a gallery page. Surfaced to the UI layer as
/// is; the loader never retries on its own.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}
