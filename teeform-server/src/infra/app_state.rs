use std::{fmt, sync::Arc};

use teeform_core::{AssetStore, Catalog, IngestService, PaginationService};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub ingest: Arc<IngestService>,
    pub pagination: Arc<PaginationService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the core services over the configured storage locations.
    /// Spawns the catalog writer task, so this needs a runtime.
    pub fn new(config: Config) -> Self {
        let catalog = Catalog::open(&config.catalog_path);
        let assets = AssetStore::new(&config.upload_dir, config.upload_url_prefix.clone());
        let ingest = IngestService::new(catalog.clone(), assets, config.max_upload_bytes);
        let pagination = PaginationService::new(catalog.clone());

        Self {
            config: Arc::new(config),
            catalog,
            ingest: Arc::new(ingest),
            pagination: Arc::new(pagination),
        }
    }
}
