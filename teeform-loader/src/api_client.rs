use reqwest::{Client, StatusCode};
use teeform_model::GalleryPage;
use tracing::debug;

use crate::error::LoaderError;
use crate::loader::PageSource;

/// How long a page fetch may take before it is treated as a failure.
/// A hung request would otherwise pin the loader's in-flight flag and
/// stall incremental loading forever.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// HTTP client for the gallery API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against `base_url`, e.g.
    /// `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Fetch one catalog page. Non-200 responses become
    /// [`LoaderError::Server`] carrying the server's error message.
    pub async fn fetch_page(&self, page: usize, limit: usize) -> Result<GalleryPage, LoaderError> {
        let url = format!("{}/images?page={page}&limit={limit}", self.base_url);
        debug!(%url, "fetching gallery page");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let message = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("error")?.as_str().map(str::to_owned))
                    .unwrap_or_else(|| "unknown error".to_owned());
                Err(LoaderError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(&self, page: usize, limit: usize) -> Result<GalleryPage, LoaderError> {
        ApiClient::fetch_page(self, page, limit).await
    }
}
