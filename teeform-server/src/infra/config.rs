use std::{env, path::PathBuf};

/// Server configuration loaded via environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Storage settings
    pub upload_dir: PathBuf,
    pub catalog_path: PathBuf,
    /// URL path prefix uploaded assets are referenced under.
    pub upload_url_prefix: String,

    // Upload limits
    pub max_upload_bytes: u64,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,
}

const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let upload_dir: PathBuf = env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "./public/uploads".to_string())
            .into();

        // The catalog lives inside the upload directory unless placed
        // explicitly.
        let catalog_path = env::var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| upload_dir.join("data.json"));

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            upload_dir,
            catalog_path,
            upload_url_prefix: env::var("UPLOAD_URL_PREFIX")
                .unwrap_or_else(|_| "/uploads".to_string()),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        if let Some(parent) = self.catalog_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
