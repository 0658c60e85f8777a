//! The catalog store: an append-ordered JSON array of submission
//! records backed by a single file.
//!
//! Writes are funneled through one writer task so that concurrent
//! appends are serialized instead of racing on the read-modify-write
//! cycle (two submitters both reading the same base state and the
//! second write discarding the first). Each append rewrites the file
//! through a tempfile-then-rename, so readers observe either the pre-
//! or post-append state, never a torn file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use teeform_model::SubmissionRecord;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::CatalogError;

/// Depth of the writer command queue. Appends beyond this backpressure
/// the submitting handlers rather than queueing unboundedly.
const WRITER_QUEUE_DEPTH: usize = 64;

struct AppendCommand {
    record: SubmissionRecord,
    reply: oneshot::Sender<Result<(), CatalogError>>,
}

/// Cloneable handle to one catalog file.
///
/// `load` reads the file directly; `append` goes through the writer
/// task owned by the handle family. Dropping every handle shuts the
/// writer down once its queue drains.
#[derive(Clone)]
pub struct Catalog {
    path: Arc<PathBuf>,
    append_tx: mpsc::Sender<AppendCommand>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("path", &self.path).finish()
    }
}

impl Catalog {
    /// Open a catalog at `path`, spawning its writer task. The file is
    /// created lazily on first append; an absent file reads as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = Arc::new(path.into());
        let (append_tx, append_rx) = mpsc::channel(WRITER_QUEUE_DEPTH);

        let writer_path = Arc::clone(&path);
        tokio::spawn(run_writer(writer_path, append_rx));

        Self { path, append_tx }
    }

    /// Current snapshot of the catalog in append order.
    ///
    /// An absent or empty file yields an empty snapshot; a file that
    /// fails to parse is reported and also yields an empty snapshot so
    /// the read path stays up. Only genuine IO failures are errors.
    pub async fn load(&self) -> Result<Vec<SubmissionRecord>, CatalogError> {
        let raw = match tokio::fs::read(self.path.as_ref()).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file absent, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(parse_records(&raw, &self.path))
    }

    /// Append one record, serialized behind every other append.
    ///
    /// Resolves only after the record is durably part of the file, so a
    /// successful return followed by a crash still survives a restart.
    pub async fn append(&self, record: SubmissionRecord) -> Result<(), CatalogError> {
        let (reply, response) = oneshot::channel();
        self.append_tx
            .send(AppendCommand { record, reply })
            .await
            .map_err(|_| CatalogError::WriterUnavailable)?;

        response.await.map_err(|_| CatalogError::WriterUnavailable)?
    }
}

/// Writer loop: one append at a time, in arrival order.
async fn run_writer(path: Arc<PathBuf>, mut append_rx: mpsc::Receiver<AppendCommand>) {
    info!(path = %path.display(), "catalog writer started");

    while let Some(AppendCommand { record, reply }) = append_rx.recv().await {
        let task_path = Arc::clone(&path);
        let result = tokio::task::spawn_blocking(move || append_sync(&task_path, record))
            .await
            .unwrap_or_else(|join_err| {
                Err(CatalogError::Io(std::io::Error::other(join_err)))
            });

        if let Err(err) = &result {
            warn!(path = %path.display(), error = %err, "catalog append failed");
        }
        let _ = reply.send(result);
    }

    info!(path = %path.display(), "catalog writer stopped");
}

/// Full read-modify-write of the catalog file, finishing with an
/// atomic rename. Runs on the blocking pool.
fn append_sync(path: &Path, record: SubmissionRecord) -> Result<(), CatalogError> {
    let mut records = match std::fs::read(path) {
        Ok(raw) => parse_records(&raw, path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err.into()),
    };
    records.push(record);

    let serialized = serde_json::to_vec_pretty(&records)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    // Tempfile in the same directory so the final persist is a rename,
    // never a cross-device copy.
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&serialized)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| CatalogError::Io(err.error))?;

    Ok(())
}

/// Parse a catalog snapshot, degrading to empty on malformed content.
fn parse_records(raw: &[u8], path: &Path) -> Vec<SubmissionRecord> {
    if raw.iter().all(|b| b.is_ascii_whitespace()) {
        return Vec::new();
    }

    match serde_json::from_slice(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "catalog file is malformed, serving empty catalog"
            );
            Vec::new()
        }
    }
}
