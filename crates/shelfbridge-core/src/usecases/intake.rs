//! Intake use case
//!
//! Orchestrates the full pipeline for an inbound external event:
//! classification, content-type resolution, materialization into private
//! storage, and runtime notification. Recoverable misses (unsupported
//! action, missing reference, missing content type, duplicate delivery)
//! are logged no-ops; only stream open/copy failures surface as errors,
//! and those abort the pipeline for the single event without crashing
//! anything.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::errors::IntakeError;
use crate::domain::event::{InboundEvent, ACTION_OPEN, ACTION_SHARE};
use crate::domain::extension::extension_for;
use crate::domain::intake::{InboundReference, MaterializedFile, SourceAction};
use crate::domain::newtypes::EventId;
use crate::ports::{ContentSource, PrivateStorage};
use crate::usecases::notify::RuntimeNotifier;

/// Bounded FIFO set of already-handled event ids
///
/// Replaces a single processed-flag with per-event identity tracking:
/// an event id is recorded once its materialization completes, and a
/// second delivery of the same id is suppressed. Oldest ids are evicted
/// first once the capacity is reached.
struct HandledEvents {
    ids: HashSet<EventId>,
    order: VecDeque<EventId>,
    capacity: usize,
}

impl HandledEvents {
    fn new(capacity: usize) -> Self {
        Self {
            ids: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    /// Records `id`, returning `false` when it was already present
    fn insert(&mut self, id: EventId) -> bool {
        if !self.ids.insert(id) {
            return false;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.ids.remove(&evicted);
            }
        }
        true
    }
}

/// Use case for the intent classification and file-materialization pipeline
///
/// Holds the content source and private storage ports plus the runtime
/// notifier, and tracks handled event ids for duplicate suppression.
pub struct IntakeUseCase {
    content_source: Arc<dyn ContentSource>,
    storage: Arc<dyn PrivateStorage>,
    notifier: Arc<RuntimeNotifier>,
    handled: Mutex<HandledEvents>,
}

impl IntakeUseCase {
    /// Creates a new IntakeUseCase
    ///
    /// # Arguments
    ///
    /// * `content_source` - Resolves external references into bytes and types
    /// * `storage` - Process-private root for materialized copies
    /// * `notifier` - Delivery path to the embedded runtime
    /// * `handled_capacity` - How many handled event ids to remember
    pub fn new(
        content_source: Arc<dyn ContentSource>,
        storage: Arc<dyn PrivateStorage>,
        notifier: Arc<RuntimeNotifier>,
        handled_capacity: usize,
    ) -> Self {
        Self {
            content_source,
            storage,
            notifier,
            handled: Mutex::new(HandledEvents::new(handled_capacity)),
        }
    }

    /// Classifies an inbound event into a reference the pipeline can act on
    ///
    /// Returns `None` for unsupported actions and for recognized actions
    /// missing their required reference. For open-with events without a
    /// declared type, the system type lookup fills the gap when it can.
    pub async fn classify(&self, event: &InboundEvent) -> Option<InboundReference> {
        match event.action.as_str() {
            ACTION_SHARE => {
                let Some(locator) = event.stream.clone() else {
                    warn!(event_id = %event.id, "share event received but no stream reference found");
                    return None;
                };
                debug!(event_id = %event.id, %locator, declared = ?event.declared_type, "classified share event");
                Some(InboundReference::new(
                    locator,
                    event.declared_type.clone(),
                    SourceAction::Share,
                ))
            }
            ACTION_OPEN => {
                let Some(locator) = event.data.clone() else {
                    warn!(event_id = %event.id, "open event received but no data reference found");
                    return None;
                };
                let declared = match &event.declared_type {
                    Some(ty) => Some(ty.clone()),
                    None => self.content_source.resolve_type(&locator).await,
                };
                debug!(event_id = %event.id, %locator, resolved = ?declared, "classified open event");
                Some(InboundReference::new(locator, declared, SourceAction::Open))
            }
            other => {
                warn!(event_id = %event.id, action = other, "unsupported inbound action");
                None
            }
        }
    }

    /// Runs the full pipeline for one inbound event
    ///
    /// # Returns
    ///
    /// - `Ok(Some(file))` when content was materialized and the runtime
    ///   notified
    /// - `Ok(None)` for recoverable no-ops: duplicate delivery,
    ///   classification miss, or a reference with no resolvable content
    ///   type
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] when the reference cannot be opened or
    /// the copy into private storage fails. No notification is sent in
    /// that case.
    pub async fn handle_event(
        &self,
        event: &InboundEvent,
    ) -> Result<Option<MaterializedFile>, IntakeError> {
        if self.handled.lock().await.contains(&event.id) {
            debug!(event_id = %event.id, "event already processed, skipping");
            return Ok(None);
        }

        let Some(reference) = self.classify(event).await else {
            return Ok(None);
        };

        let Some(content_type) = reference.declared_type().map(str::to_string) else {
            warn!(event_id = %event.id, locator = %reference.locator(), "no content type available, skipping");
            return Ok(None);
        };

        let file = self.materialize(&reference, &content_type).await?;

        // Only a completed copy counts as processed; a failed event may be
        // retried by a later delivery. The insert re-checks membership under
        // the same lock, so a second delivery racing past the early check
        // cannot notify twice.
        if !self.handled.lock().await.insert(event.id) {
            debug!(event_id = %event.id, "event completed concurrently, dropping duplicate");
            return Ok(None);
        }

        info!(
            event_id = %event.id,
            path = %file.absolute_path().display(),
            content_type = %file.content_type(),
            action = %file.source_action(),
            "materialized inbound file"
        );

        self.notifier.notify(&file).await;
        Ok(Some(file))
    }

    /// Copies the referenced content into private storage
    ///
    /// The generated name is `{send|view}_{epoch_millis}{ext}`, where the
    /// extension comes from the content-type table.
    async fn materialize(
        &self,
        reference: &InboundReference,
        content_type: &str,
    ) -> Result<MaterializedFile, IntakeError> {
        let data = self
            .content_source
            .open(reference.locator())
            .await
            .map_err(IntakeError::io)?;

        let file_name = format!(
            "{}_{}{}",
            reference.source_action().file_prefix(),
            Utc::now().timestamp_millis(),
            extension_for(content_type)
        );

        let path = self
            .storage
            .write_new(&file_name, &data)
            .await
            .map_err(IntakeError::io)?;

        Ok(MaterializedFile::new(
            path,
            content_type.to_string(),
            reference.source_action(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::domain::intake::NotificationPayload;
    use crate::domain::newtypes::ContentRef;
    use crate::ports::RuntimeChannel;

    /// In-memory content source keyed by locator string
    struct FakeContentSource {
        contents: HashMap<String, Vec<u8>>,
        types: HashMap<String, String>,
    }

    impl FakeContentSource {
        fn new() -> Self {
            Self {
                contents: HashMap::new(),
                types: HashMap::new(),
            }
        }

        fn with_content(mut self, locator: &str, data: &[u8]) -> Self {
            self.contents.insert(locator.to_string(), data.to_vec());
            self
        }

        fn with_type(mut self, locator: &str, ty: &str) -> Self {
            self.types.insert(locator.to_string(), ty.to_string());
            self
        }
    }

    #[async_trait::async_trait]
    impl ContentSource for FakeContentSource {
        async fn open(&self, locator: &ContentRef) -> anyhow::Result<Vec<u8>> {
            self.contents
                .get(locator.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("content vanished: {locator}"))
        }

        async fn resolve_type(&self, locator: &ContentRef) -> Option<String> {
            self.types.get(locator.as_str()).cloned()
        }
    }

    /// Records written files without touching the filesystem
    struct FakeStorage {
        writes: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl FakeStorage {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl PrivateStorage for FakeStorage {
        async fn write_new(&self, file_name: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
            self.writes
                .lock()
                .await
                .push((file_name.to_string(), data.to_vec()));
            Ok(PathBuf::from("/private/inbox").join(file_name))
        }
    }

    struct RecordingChannel {
        calls: Mutex<Vec<(String, NotificationPayload)>>,
    }

    #[async_trait::async_trait]
    impl RuntimeChannel for RecordingChannel {
        async fn invoke(
            &self,
            method: &str,
            payload: &NotificationPayload,
        ) -> anyhow::Result<()> {
            self.calls
                .lock()
                .await
                .push((method.to_string(), payload.clone()));
            Ok(())
        }
    }

    struct Harness {
        storage: Arc<FakeStorage>,
        channel: Arc<RecordingChannel>,
        intake: IntakeUseCase,
    }

    fn harness(source: FakeContentSource) -> Harness {
        let storage = Arc::new(FakeStorage::new());
        let channel = Arc::new(RecordingChannel {
            calls: Mutex::new(Vec::new()),
        });
        let notifier = Arc::new(RuntimeNotifier::new(channel.clone()));
        let intake = IntakeUseCase::new(Arc::new(source), storage.clone(), notifier, 4);
        Harness {
            storage,
            channel,
            intake,
        }
    }

    fn locator(s: &str) -> ContentRef {
        ContentRef::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_share_event_materializes_with_table_extension() {
        let h = harness(
            FakeContentSource::new().with_content("/ext/photo", b"\x89PNG not really"),
        );
        let event = InboundEvent::share(locator("/ext/photo"), Some("image/png".to_string()));

        let file = h.intake.handle_event(&event).await.unwrap().unwrap();

        // Table-driven extension: image/png still becomes .jpg
        let name = file.absolute_path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("send_"), "got {name}");
        assert!(name.ends_with(".jpg"), "got {name}");
        assert_eq!(file.content_type(), "image/png");

        let writes = h.storage.writes.lock().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, b"\x89PNG not really");
    }

    #[tokio::test]
    async fn test_open_event_resolves_type_via_system_lookup() {
        let h = harness(
            FakeContentSource::new()
                .with_content("/ext/report", b"%PDF-1.7")
                .with_type("/ext/report", "application/pdf"),
        );
        let event = InboundEvent::open(Some(locator("/ext/report")), None);

        let file = h.intake.handle_event(&event).await.unwrap().unwrap();

        let name = file.absolute_path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("view_"), "got {name}");
        assert!(name.ends_with(".pdf"), "got {name}");
        assert_eq!(file.content_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_unsupported_action_is_a_no_op() {
        let h = harness(FakeContentSource::new());
        let mut event = InboundEvent::share(locator("/ext/x"), Some("text/plain".to_string()));
        event.action = "action.EDIT".to_string();

        let result = h.intake.handle_event(&event).await.unwrap();
        assert!(result.is_none());
        assert!(h.storage.writes.lock().await.is_empty());
        assert!(h.channel.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_event_without_reference_is_a_no_op() {
        let h = harness(FakeContentSource::new());
        let event = InboundEvent::open(None, Some("application/pdf".to_string()));

        let result = h.intake.handle_event(&event).await.unwrap();
        assert!(result.is_none());
        assert!(h.storage.writes.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_share_event_without_type_is_a_no_op() {
        let h = harness(FakeContentSource::new().with_content("/ext/mystery", b"????"));
        let event = InboundEvent::share(locator("/ext/mystery"), None);

        let result = h.intake.handle_event(&event).await.unwrap();
        assert!(result.is_none());
        assert!(h.storage.writes.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_vanished_content_is_an_io_failure() {
        let h = harness(FakeContentSource::new());
        let event = InboundEvent::share(locator("/ext/gone"), Some("text/plain".to_string()));

        let result = h.intake.handle_event(&event).await;
        assert!(matches!(result, Err(IntakeError::Io { .. })));
        assert!(h.storage.writes.lock().await.is_empty());
        assert!(h.channel.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_event_materializes_once() {
        let h = harness(FakeContentSource::new().with_content("/ext/a", b"hello"));
        let event = InboundEvent::share(locator("/ext/a"), Some("text/plain".to_string()));

        let first = h.intake.handle_event(&event).await.unwrap();
        let second = h.intake.handle_event(&event).await.unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(h.storage.writes.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_event_is_not_marked_processed() {
        let h = harness(FakeContentSource::new());
        let event = InboundEvent::share(locator("/ext/late"), Some("text/plain".to_string()));

        assert!(h.intake.handle_event(&event).await.is_err());

        // The content shows up before the second delivery; the retry must
        // not be suppressed by the duplicate guard.
        let h2 = harness(FakeContentSource::new().with_content("/ext/late", b"now"));
        let file = h2.intake.handle_event(&event).await.unwrap();
        assert!(file.is_some());
    }

    #[tokio::test]
    async fn test_notification_sent_after_ready() {
        let h = harness(FakeContentSource::new().with_content("/ext/n", b"x"));
        let event = InboundEvent::open(
            Some(locator("/ext/n")),
            Some("application/msword".to_string()),
        );

        h.intake.handle_event(&event).await.unwrap();
        // Buffered until the runtime announces readiness
        assert!(h.channel.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_notifies_once() {
        let h = harness(FakeContentSource::new().with_content("/ext/b", b"bytes"));
        let event = InboundEvent::share(locator("/ext/b"), Some("text/plain".to_string()));

        // Both deliveries may pass the early duplicate check; the recording
        // step must let only one of them through.
        let (first, second) = tokio::join!(
            h.intake.handle_event(&event),
            h.intake.handle_event(&event)
        );
        let produced = [first.unwrap(), second.unwrap()]
            .iter()
            .filter(|outcome| outcome.is_some())
            .count();
        assert_eq!(produced, 1);
    }

    #[test]
    fn test_handled_events_insert_reports_new_ids() {
        let mut handled = HandledEvents::new(2);
        let a = EventId::new();
        assert!(handled.insert(a));
        assert!(!handled.insert(a));
    }

    #[test]
    fn test_handled_events_eviction() {
        let mut handled = HandledEvents::new(2);
        let a = EventId::new();
        let b = EventId::new();
        let c = EventId::new();

        handled.insert(a);
        handled.insert(b);
        handled.insert(c);

        assert!(!handled.contains(&a));
        assert!(handled.contains(&b));
        assert!(handled.contains(&c));
    }

    #[test]
    fn test_handled_events_reinsert_is_stable() {
        let mut handled = HandledEvents::new(2);
        let a = EventId::new();
        handled.insert(a);
        handled.insert(a);
        assert!(handled.contains(&a));
        assert_eq!(handled.order.len(), 1);
    }
}
