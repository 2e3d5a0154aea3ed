//! Content source port (driven/secondary port)
//!
//! Resolves an opaque external content reference into a readable byte
//! stream and, when the sender declared nothing, a resolved content type.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because open/read failures are adapter-specific
//!   (invalid reference, permission denied, content vanished).
//! - `resolve_type` is the system type-resolution query: it returns `None`
//!   rather than an error when the type cannot be determined, because an
//!   unresolvable type is a recoverable no-op upstream.

use crate::domain::newtypes::ContentRef;

/// Port trait for resolving external content references
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Opens the referenced content and reads it to completion
    ///
    /// # Errors
    /// Returns an error if the reference is invalid, access is denied,
    /// or the content has vanished
    async fn open(&self, locator: &ContentRef) -> anyhow::Result<Vec<u8>>;

    /// Resolves the content type of a reference via the system lookup
    ///
    /// Returns `None` when the type cannot be determined.
    async fn resolve_type(&self, locator: &ContentRef) -> Option<String>;
}
