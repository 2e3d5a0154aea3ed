//! System URL handler adapter (secondary/driven adapter)
//!
//! Implements [`UrlHandler`] for desktop hosts. The default path goes
//! through the `webbrowser` crate, which resolves the platform's
//! registered handler. The chooser path shells out to an explicit opener
//! command (`xdg-open` by default) so the desktop environment presents
//! its own application selection when no direct handler took the URL.
//!
//! The port's `referrer` parameter is advisory-only on desktop hosts:
//! neither the opener nor `xdg-open` carries a referrer, so it is
//! recorded in the launch logs and goes no further.

use anyhow::Context;
use async_trait::async_trait;
use shelfbridge_core::ports::UrlHandler;
use tracing::{debug, instrument};
use url::Url;

/// Opener command used for the chooser fallback.
const CHOOSER_COMMAND: &str = "xdg-open";

/// Adapter launching URLs through the host desktop environment.
#[derive(Debug, Clone, Default)]
pub struct SystemUrlHandler;

impl SystemUrlHandler {
    /// Create a new `SystemUrlHandler`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlHandler for SystemUrlHandler {
    #[instrument(skip(self), fields(url = %url))]
    async fn open_default(&self, url: &Url, referrer: &str) -> anyhow::Result<()> {
        debug!(referrer, "handing URL to default handler");
        // webbrowser resolves the platform default handler synchronously;
        // run it off the async context.
        let target = url.to_string();
        tokio::task::spawn_blocking(move || webbrowser::open(&target))
            .await
            .context("default handler task panicked")?
            .context("no default handler resolved the URL")?;
        Ok(())
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn open_chooser(&self, url: &Url, title: &str) -> anyhow::Result<()> {
        debug!(title, command = CHOOSER_COMMAND, "launching chooser");
        let status = tokio::process::Command::new(CHOOSER_COMMAND)
            .arg(url.as_str())
            .status()
            .await
            .with_context(|| format!("failed to spawn {CHOOSER_COMMAND}"))?;
        if !status.success() {
            anyhow::bail!("{CHOOSER_COMMAND} exited with {status}");
        }
        Ok(())
    }
}
