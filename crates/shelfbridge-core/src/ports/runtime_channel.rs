//! Runtime channel port (driven/secondary port)
//!
//! The asynchronous message channel into the embedded runtime. Delivery is
//! fire-and-forget: the bridge never observes whether the runtime handled
//! a call, and no retry exists.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because transport failures are adapter-specific
//!   (closed channel, serialization, dead peer).
//! - Readiness is NOT a property of this port. The [`RuntimeNotifier`]
//!   buffers payloads until the runtime announces readiness, so adapters
//!   may assume `invoke` is only called once the channel is usable.
//!
//! [`RuntimeNotifier`]: crate::usecases::notify::RuntimeNotifier

use crate::domain::intake::NotificationPayload;

/// Port trait for the outbound message channel to the embedded runtime
#[async_trait::async_trait]
pub trait RuntimeChannel: Send + Sync {
    /// Invokes a method on the embedded runtime with the given payload
    ///
    /// # Arguments
    /// * `method` - Method name (`handleSharedFile` or `handleOpenWithFile`)
    /// * `payload` - The materialized-file payload
    async fn invoke(&self, method: &str, payload: &NotificationPayload) -> anyhow::Result<()>;
}
