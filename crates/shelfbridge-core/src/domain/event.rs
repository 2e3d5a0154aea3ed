//! Inbound wire shapes
//!
//! [`InboundEvent`] is the raw event the host surface delivers for
//! classification; [`RuntimeRequest`] is a method call arriving from the
//! embedded runtime over the request channel.

use serde::{Deserialize, Serialize};

use super::newtypes::{ContentRef, EventId};

/// Wire action string for share-in events
pub const ACTION_SHARE: &str = "action.SEND";

/// Wire action string for open-with events
pub const ACTION_OPEN: &str = "action.VIEW";

/// A raw external event as delivered by the host platform
///
/// Share events carry their content reference in `stream`; open events
/// carry it in `data`. The action string is opaque to serde; the intake
/// use case decides whether it is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Identity of this delivery, used for duplicate suppression
    pub id: EventId,
    /// Platform action string (see [`ACTION_SHARE`] / [`ACTION_OPEN`])
    pub action: String,
    /// Primary data reference (open-with events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContentRef>,
    /// Attached stream reference (share events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<ContentRef>,
    /// Content type declared by the sender, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl InboundEvent {
    /// Builds a share-in event
    #[must_use]
    pub fn share(stream: ContentRef, declared_type: Option<String>) -> Self {
        Self {
            id: EventId::new(),
            action: ACTION_SHARE.to_string(),
            data: None,
            stream: Some(stream),
            declared_type,
        }
    }

    /// Builds an open-with event
    #[must_use]
    pub fn open(data: Option<ContentRef>, declared_type: Option<String>) -> Self {
        Self {
            id: EventId::new(),
            action: ACTION_OPEN.to_string(),
            data,
            stream: None,
            declared_type,
        }
    }
}

/// A method call arriving from the embedded runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRequest {
    /// Requested method name, e.g. `launchDownload`
    pub method: String,
    /// Method arguments as a JSON object
    #[serde(default)]
    pub args: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_event_carries_stream() {
        let locator = ContentRef::new("/tmp/shared.png".to_string()).unwrap();
        let event = InboundEvent::share(locator.clone(), Some("image/png".to_string()));
        assert_eq!(event.action, ACTION_SHARE);
        assert_eq!(event.stream, Some(locator));
        assert!(event.data.is_none());
    }

    #[test]
    fn test_open_event_carries_data() {
        let locator = ContentRef::new("/tmp/doc.pdf".to_string()).unwrap();
        let event = InboundEvent::open(Some(locator.clone()), None);
        assert_eq!(event.action, ACTION_OPEN);
        assert_eq!(event.data, Some(locator));
        assert!(event.stream.is_none());
    }

    #[test]
    fn test_event_json_roundtrip() {
        let event = InboundEvent::share(
            ContentRef::new("content://inbox/9".to_string()).unwrap(),
            Some("text/plain".to_string()),
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: InboundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn test_event_optional_fields_absent_in_json() {
        let event = InboundEvent::open(None, None);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("data").is_none());
        assert!(json.get("stream").is_none());
        assert!(json.get("declared_type").is_none());
    }

    #[test]
    fn test_runtime_request_defaults_args() {
        let request: RuntimeRequest =
            serde_json::from_str(r#"{"method": "launchDownload"}"#).unwrap();
        assert_eq!(request.method, "launchDownload");
        assert!(request.args.is_null());
    }
}
