//! Private storage port (driven/secondary port)
//!
//! The process-private file root where materialized copies live. The port
//! is write-only: retention and cleanup of previously materialized files
//! are an external concern.
//!
//! ## Design Notes
//!
//! - `write_new` must not report success until the copy is completed and
//!   closed; implementations are expected to write atomically so a crash
//!   never leaves a partial file under the returned path.
//! - File names are generated by the caller; the adapter only scopes them
//!   to the private root.

use std::path::PathBuf;

/// Port trait for the process-private storage root
#[async_trait::async_trait]
pub trait PrivateStorage: Send + Sync {
    /// Writes `data` under `file_name` inside the private root
    ///
    /// # Returns
    /// The absolute path of the completed copy
    ///
    /// # Errors
    /// Returns an error if the root cannot be created or the write fails
    async fn write_new(&self, file_name: &str, data: &[u8]) -> anyhow::Result<PathBuf>;
}
