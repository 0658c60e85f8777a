//! Persistence for uploaded design binaries.

use std::path::{Path, PathBuf};

use teeform_model::AssetRef;
use tracing::debug;
use uuid::Uuid;

use crate::error::IngestError;

/// Content types the gallery accepts, with the extension each is
/// stored under.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// Extension an allowed content type is stored under, `None` when the
/// type is outside the allow-list.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    // Strip any parameters, e.g. "image/jpeg; charset=binary".
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();

    ALLOWED_TYPES
        .iter()
        .find(|(ty, _)| *ty == essence)
        .map(|(_, ext)| *ext)
}

/// Writes uploaded binaries under a root directory and hands out their
/// public references.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl AssetStore {
    /// `root` is where binaries land on disk; `public_prefix` is the
    /// URL path they are later served under, e.g. `/uploads`.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` under a collision-resistant name and return the
    /// public reference. The UUIDv4 name means two uploads of identical
    /// content still get distinct references.
    pub async fn save(&self, bytes: &[u8], extension: &str) -> Result<AssetRef, IngestError> {
        let name = format!("{}.{extension}", Uuid::new_v4());
        let target = self.root.join(&name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(IngestError::Storage)?;
        tokio::fs::write(&target, bytes)
            .await
            .map_err(IngestError::Storage)?;

        debug!(path = %target.display(), bytes = bytes.len(), "stored uploaded asset");
        Ok(AssetRef::new(format!("{}/{name}", self.public_prefix)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_maps_types_to_extensions() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("IMAGE/PNG"), Some("png"));
        assert_eq!(extension_for("image/webp; q=1"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("text/html"), None);
    }

    #[tokio::test]
    async fn save_writes_bytes_under_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path(), "/uploads");

        let first = store.save(b"design-a", "png").await.unwrap();
        let second = store.save(b"design-a", "png").await.unwrap();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("/uploads/"));
        assert!(first.as_str().ends_with(".png"));

        let name = first.as_str().rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(stored, b"design-a");
    }
}
