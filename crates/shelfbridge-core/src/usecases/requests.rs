//! Inbound request dispatch
//!
//! Handles method calls arriving from the embedded runtime over the
//! request channel. Currently the only supported method is
//! `launchDownload`; anything else is answered with a structured
//! not-implemented error rather than being dropped.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::RequestError;
use crate::domain::event::RuntimeRequest;
use crate::usecases::launch::LaunchDownloadUseCase;

/// Method name for download launch requests
pub const METHOD_LAUNCH_DOWNLOAD: &str = "launchDownload";

/// Dispatcher for method calls from the embedded runtime
pub struct RequestDispatcher {
    launcher: Arc<LaunchDownloadUseCase>,
}

impl RequestDispatcher {
    /// Creates a new RequestDispatcher
    pub fn new(launcher: Arc<LaunchDownloadUseCase>) -> Self {
        Self { launcher }
    }

    /// Handles one request and produces its wire result
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidArgument`] when `launchDownload` is called
    ///   without a string `url` argument
    /// - [`RequestError::NotImplemented`] for unknown methods
    pub async fn handle(&self, request: &RuntimeRequest) -> Result<Value, RequestError> {
        debug!(method = %request.method, "dispatching runtime request");
        match request.method.as_str() {
            METHOD_LAUNCH_DOWNLOAD => {
                let url = request
                    .args
                    .get("url")
                    .and_then(Value::as_str)
                    .ok_or_else(|| RequestError::InvalidArgument("URL is required".to_string()))?;
                Ok(Value::Bool(self.launcher.launch(url).await))
            }
            other => Err(RequestError::NotImplemented(other.to_string())),
        }
    }
}
