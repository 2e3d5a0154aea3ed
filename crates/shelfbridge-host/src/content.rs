//! Filesystem content source adapter (secondary/driven adapter)
//!
//! Implements [`ContentSource`] by treating locators as filesystem paths
//! (with or without a `file://` scheme). The type lookup mirrors the
//! platform content-resolver query: a table keyed on the reference's
//! extension.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use shelfbridge_core::domain::newtypes::ContentRef;
use shelfbridge_core::ports::ContentSource;
use tracing::{debug, instrument};

/// Adapter resolving content references against the local filesystem.
///
/// Zero-sized: all context comes from the locator itself.
#[derive(Debug, Clone, Default)]
pub struct FsContentSource;

impl FsContentSource {
    /// Create a new `FsContentSource`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Strips an optional `file://` scheme from a locator.
    fn locator_path(locator: &ContentRef) -> &Path {
        let raw = locator.as_str();
        Path::new(raw.strip_prefix("file://").unwrap_or(raw))
    }

    /// System type-resolution query keyed on the reference's extension.
    ///
    /// Stands in for the platform's content-resolver lookup. Returns
    /// `None` for extensionless or unrecognized references.
    fn type_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "pdf" => Some("application/pdf"),
            "docx" => {
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
            }
            "doc" => Some("application/msword"),
            "txt" => Some("text/plain"),
            _ => None,
        }
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    #[instrument(skip(self), fields(locator = %locator))]
    async fn open(&self, locator: &ContentRef) -> anyhow::Result<Vec<u8>> {
        let path = Self::locator_path(locator);
        debug!("opening content reference");
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to open content reference {locator}"))?;
        debug!(bytes = data.len(), "content read complete");
        Ok(data)
    }

    #[instrument(skip(self), fields(locator = %locator))]
    async fn resolve_type(&self, locator: &ContentRef) -> Option<String> {
        let resolved = Self::locator_path(locator)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::type_for_extension)
            .map(str::to_string);
        debug!(?resolved, "type resolution query");
        resolved
    }
}
