//! Runtime notification use case
//!
//! Delivers materialized-file payloads to the embedded runtime over the
//! [`RuntimeChannel`] port. Delivery is fire-and-forget: channel failures
//! are logged and dropped, never retried and never surfaced to the intake
//! pipeline.
//!
//! The embedded runtime may not be listening yet when the first event
//! arrives (it is still initializing its message channel), so payloads are
//! buffered until the runtime announces readiness via [`mark_ready`].
//! Buffered payloads are flushed in arrival order on the ready transition;
//! everything after that is delivered immediately.
//!
//! [`mark_ready`]: RuntimeNotifier::mark_ready

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::intake::{MaterializedFile, NotificationPayload};
use crate::ports::RuntimeChannel;

/// Internal notifier state behind a mutex
struct NotifierState {
    /// Whether the runtime has announced readiness
    ready: bool,
    /// Payloads queued before the ready transition, in arrival order
    pending: VecDeque<(&'static str, NotificationPayload)>,
}

/// Readiness-gated notifier for the embedded runtime
///
/// One instance per runtime channel. All state is owned by the instance;
/// there is no global flag.
pub struct RuntimeNotifier {
    channel: Arc<dyn RuntimeChannel>,
    state: Mutex<NotifierState>,
}

impl RuntimeNotifier {
    /// Creates a notifier over the given runtime channel
    pub fn new(channel: Arc<dyn RuntimeChannel>) -> Self {
        Self {
            channel,
            state: Mutex::new(NotifierState {
                ready: false,
                pending: VecDeque::new(),
            }),
        }
    }

    /// Queues or delivers a notification for a materialized file
    ///
    /// The method name depends on the source action: `Open` maps to
    /// `handleOpenWithFile`, `Share` to `handleSharedFile`. No return
    /// value: failures on the runtime side are invisible to the caller.
    pub async fn notify(&self, file: &MaterializedFile) {
        let method = file.source_action().runtime_method();
        let payload = NotificationPayload::from(file);

        let mut state = self.state.lock().await;
        if state.ready {
            self.deliver(method, &payload).await;
        } else {
            debug!(method, "runtime not ready yet, buffering notification");
            state.pending.push_back((method, payload));
        }
    }

    /// Records that the embedded runtime is ready and flushes the buffer
    ///
    /// Idempotent: calling again after the ready transition is a no-op.
    pub async fn mark_ready(&self) {
        let mut state = self.state.lock().await;
        if state.ready {
            return;
        }
        state.ready = true;
        debug!(
            buffered = state.pending.len(),
            "runtime ready, flushing buffered notifications"
        );
        while let Some((method, payload)) = state.pending.pop_front() {
            self.deliver(method, &payload).await;
        }
    }

    async fn deliver(&self, method: &str, payload: &NotificationPayload) {
        if let Err(error) = self.channel.invoke(method, payload).await {
            warn!(method, %error, "failed to deliver runtime notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::intake::SourceAction;

    /// Records invocations instead of delivering them
    struct RecordingChannel {
        calls: Mutex<Vec<(String, NotificationPayload)>>,
        fail: bool,
    }

    impl RecordingChannel {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait::async_trait]
    impl RuntimeChannel for RecordingChannel {
        async fn invoke(
            &self,
            method: &str,
            payload: &NotificationPayload,
        ) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("channel closed");
            }
            self.calls
                .lock()
                .await
                .push((method.to_string(), payload.clone()));
            Ok(())
        }
    }

    fn sample_file(action: SourceAction) -> MaterializedFile {
        MaterializedFile::new(
            PathBuf::from("/data/inbox/send_1700000000000.pdf"),
            "application/pdf".to_string(),
            action,
        )
    }

    #[tokio::test]
    async fn test_buffers_until_ready() {
        let channel = Arc::new(RecordingChannel::new());
        let notifier = RuntimeNotifier::new(channel.clone());

        notifier.notify(&sample_file(SourceAction::Share)).await;
        assert!(channel.calls.lock().await.is_empty());

        notifier.mark_ready().await;
        let calls = channel.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "handleSharedFile");
    }

    #[tokio::test]
    async fn test_flushes_in_fifo_order() {
        let channel = Arc::new(RecordingChannel::new());
        let notifier = RuntimeNotifier::new(channel.clone());

        notifier.notify(&sample_file(SourceAction::Share)).await;
        notifier.notify(&sample_file(SourceAction::Open)).await;
        notifier.mark_ready().await;

        let calls = channel.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "handleSharedFile");
        assert_eq!(calls[1].0, "handleOpenWithFile");
    }

    #[tokio::test]
    async fn test_delivers_immediately_after_ready() {
        let channel = Arc::new(RecordingChannel::new());
        let notifier = RuntimeNotifier::new(channel.clone());

        notifier.mark_ready().await;
        notifier.notify(&sample_file(SourceAction::Open)).await;

        let calls = channel.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "handleOpenWithFile");
        assert_eq!(calls[0].1.action, "VIEW");
    }

    #[tokio::test]
    async fn test_mark_ready_is_idempotent() {
        let channel = Arc::new(RecordingChannel::new());
        let notifier = RuntimeNotifier::new(channel.clone());

        notifier.notify(&sample_file(SourceAction::Share)).await;
        notifier.mark_ready().await;
        notifier.mark_ready().await;

        assert_eq!(channel.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_channel_failure_is_swallowed() {
        let channel = Arc::new(RecordingChannel::failing());
        let notifier = RuntimeNotifier::new(channel.clone());

        notifier.mark_ready().await;
        // Must not panic or propagate
        notifier.notify(&sample_file(SourceAction::Share)).await;
    }
}
