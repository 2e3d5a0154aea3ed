//! Runtime channel adapter (secondary/driven adapter)
//!
//! Implements [`RuntimeChannel`] over an in-process `tokio::sync::mpsc`
//! channel. The embedded runtime holds the receiving end and consumes
//! [`RuntimeCall`]s at its own pace; sending never blocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelfbridge_core::domain::intake::NotificationPayload;
use shelfbridge_core::ports::RuntimeChannel;
use tokio::sync::mpsc;
use tracing::debug;

/// One method invocation on the embedded runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeCall {
    /// Invoked method name
    pub method: String,
    /// Materialized-file payload
    pub payload: NotificationPayload,
}

/// Channel adapter delivering runtime calls over an unbounded mpsc sender.
pub struct MpscRuntimeChannel {
    sender: mpsc::UnboundedSender<RuntimeCall>,
}

impl MpscRuntimeChannel {
    /// Creates the adapter plus the receiver the embedded runtime consumes.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RuntimeCall>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Wraps an existing sender.
    #[must_use]
    pub fn from_sender(sender: mpsc::UnboundedSender<RuntimeCall>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl RuntimeChannel for MpscRuntimeChannel {
    async fn invoke(&self, method: &str, payload: &NotificationPayload) -> anyhow::Result<()> {
        debug!(method, "invoking runtime method");
        self.sender
            .send(RuntimeCall {
                method: method.to_string(),
                payload: payload.clone(),
            })
            .map_err(|_| anyhow::anyhow!("runtime channel closed"))?;
        Ok(())
    }
}
