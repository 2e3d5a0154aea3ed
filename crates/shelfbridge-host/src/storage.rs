//! Private storage adapter (secondary/driven adapter)
//!
//! Implements [`PrivateStorage`] against a directory on the local
//! filesystem.
//!
//! ## Design Decisions
//!
//! - **Atomic writes**: write-to-temp + rename in the same directory, so a
//!   crash mid-copy never leaves a partial file under the reported name.
//!   The path returned to the caller always points at a completed, closed
//!   copy.
//! - **No retention**: this adapter only creates files; cleanup of old
//!   materialized copies is an external concern.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use shelfbridge_core::ports::PrivateStorage;
use tracing::{debug, instrument};

/// Adapter writing materialized copies under a private root directory.
#[derive(Debug, Clone)]
pub struct FsPrivateStorage {
    root: PathBuf,
}

impl FsPrivateStorage {
    /// Create storage rooted at `root`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The configured private root.
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl PrivateStorage for FsPrivateStorage {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn write_new(&self, file_name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create storage root {}", self.root.display()))?;

        let target = self.root.join(file_name);

        // Write to a temporary file in the same directory so rename is
        // atomic (same filesystem).
        let tmp_path = {
            let mut p = target.as_os_str().to_owned();
            p.push(".tmp");
            PathBuf::from(p)
        };

        debug!(?tmp_path, "writing to temporary file");
        if let Err(e) = tokio::fs::write(&tmp_path, data).await {
            // A failed write may still have created a partial temp file.
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to write {}", tmp_path.display())));
        }

        debug!("renaming temporary file to target");
        if let Err(e) = tokio::fs::rename(&tmp_path, &target).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to move copy into place at {}", target.display())));
        }

        debug!(path = %target.display(), "materialized copy complete");
        Ok(target)
    }
}
