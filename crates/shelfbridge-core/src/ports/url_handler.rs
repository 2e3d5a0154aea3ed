//! URL handler port (driven/secondary port)
//!
//! Hands a URL to the platform's default handler (browser/download
//! manager), with an explicit chooser as the second step. The launch use
//! case owns the two-step fallback; this port only models the two
//! launch primitives.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because "no resolvable handler" looks different
//!   on every platform. The use case converts any error into a `false`
//!   return; nothing on this path propagates outward.

use url::Url;

/// Port trait for launching URLs through the platform
#[async_trait::async_trait]
pub trait UrlHandler: Send + Sync {
    /// Hands the URL to the platform's default handler
    ///
    /// # Arguments
    /// * `url` - The parsed target URL
    /// * `referrer` - Referrer identifying the launching application
    ///
    /// # Errors
    /// Returns an error if no handler is resolvable or the launch fails
    async fn open_default(&self, url: &Url, referrer: &str) -> anyhow::Result<()>;

    /// Presents an explicit chooser for the URL
    ///
    /// # Arguments
    /// * `url` - The parsed target URL
    /// * `title` - Task title shown by the chooser
    ///
    /// # Errors
    /// Returns an error if no chooser handler is resolvable
    async fn open_chooser(&self, url: &Url, title: &str) -> anyhow::Result<()>;
}
