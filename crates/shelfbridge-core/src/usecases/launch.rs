//! Download launch use case
//!
//! Hands a URL to the platform's default handler, retrying once via an
//! explicit chooser when no handler is resolvable. The boundary is a
//! boolean: any parse or launch failure is caught, logged, and converted
//! to `false`. Nothing here ever propagates an error outward.

use std::sync::Arc;

use tracing::{debug, error, warn};
use url::Url;

use crate::ports::UrlHandler;

/// Task title shown by the chooser fallback
pub const DOWNLOAD_CHOOSER_TITLE: &str = "Download APK";

/// Use case for launching download URLs through the platform
pub struct LaunchDownloadUseCase {
    url_handler: Arc<dyn UrlHandler>,
    referrer: String,
}

impl LaunchDownloadUseCase {
    /// Creates a new LaunchDownloadUseCase
    ///
    /// # Arguments
    ///
    /// * `url_handler` - Platform launch primitives
    /// * `app_id` - Application identifier used to form the referrer
    pub fn new(url_handler: Arc<dyn UrlHandler>, app_id: &str) -> Self {
        Self {
            url_handler,
            referrer: format!("app://{app_id}"),
        }
    }

    /// Attempts to launch `url`, reporting success as a boolean
    ///
    /// Linear two-step state machine: default handler first, chooser
    /// second, `false` when both fail. At most one launch happens.
    pub async fn launch(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(url, %error, "download URL failed to parse");
                return false;
            }
        };

        debug!(%parsed, "attempting to launch download");
        match self.url_handler.open_default(&parsed, &self.referrer).await {
            Ok(()) => {
                debug!(%parsed, "launched via default handler");
                true
            }
            Err(error) => {
                warn!(%parsed, %error, "no default handler, retrying via chooser");
                match self
                    .url_handler
                    .open_chooser(&parsed, DOWNLOAD_CHOOSER_TITLE)
                    .await
                {
                    Ok(()) => {
                        debug!(%parsed, "launched via chooser");
                        true
                    }
                    Err(error) => {
                        error!(%parsed, %error, "no handler found for download chooser");
                        false
                    }
                }
            }
        }
    }
}
