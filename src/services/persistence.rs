use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::{trace, warn};

use crate::state::Snapshot;

/// Best-effort destination for published snapshots.
///
/// Implementations handle their own failures; nothing a sink does may
/// stop the poll loop.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Store `snapshot`, logging instead of failing.
    async fn persist(&self, snapshot: &Snapshot);
}

/// Writes snapshots as pretty-printed UTF-8 JSON to a fixed file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file content with `snapshot`.
    ///
    /// The document is written next to the target and renamed over it, so
    /// readers see either the old or the new file.
    ///
    /// # Errors
    /// Returns error if serialization, the write or the rename fails.
    pub async fn write(&self, snapshot: &Snapshot) -> io::Result<()> {
        let content = serde_json::to_string_pretty(snapshot).map_err(io::Error::other)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let staging = self.staging_path();
        fs::write(&staging, content).await?;
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e);
        }

        trace!(path = %self.path.display(), "state file written");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotSink for FileSink {
    async fn persist(&self, snapshot: &Snapshot) {
        if let Err(e) = self.write(snapshot).await {
            warn!("Failed to write state file {}: {e}", self.path.display());
        }
    }
}

/// Sink used when persistence is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSink;

#[async_trait]
impl SnapshotSink for DisabledSink {
    async fn persist(&self, _snapshot: &Snapshot) {}
}
