//! Intake entities
//!
//! The shapes that flow through the intake pipeline: the classified
//! [`InboundReference`], the resulting [`MaterializedFile`], and the
//! [`NotificationPayload`] delivered to the embedded runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::ContentRef;

/// The action that triggered an inbound event
///
/// `Share` is a file shared into the application; `Open` is a file opened
/// via the host's "open with" surface. The wire forms (`SEND`/`VIEW`) are
/// what the embedded runtime sees in notification payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceAction {
    /// File shared into the application
    Share,
    /// File opened via "open with"
    Open,
}

impl SourceAction {
    /// Wire form sent to the embedded runtime
    #[must_use]
    pub const fn as_wire_str(&self) -> &'static str {
        match self {
            SourceAction::Share => "SEND",
            SourceAction::Open => "VIEW",
        }
    }

    /// Lowercased prefix used when generating materialized file names
    #[must_use]
    pub const fn file_prefix(&self) -> &'static str {
        match self {
            SourceAction::Share => "send",
            SourceAction::Open => "view",
        }
    }

    /// Runtime method invoked when delivering the notification
    #[must_use]
    pub const fn runtime_method(&self) -> &'static str {
        match self {
            SourceAction::Share => "handleSharedFile",
            SourceAction::Open => "handleOpenWithFile",
        }
    }

    /// Parse a wire action string
    ///
    /// # Errors
    /// Returns `DomainError::UnsupportedAction` for anything other than
    /// `SEND` or `VIEW`
    pub fn from_wire_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "SEND" => Ok(SourceAction::Share),
            "VIEW" => Ok(SourceAction::Open),
            other => Err(DomainError::UnsupportedAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for SourceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

/// A classified external content reference
///
/// Produced by intent classification, consumed by materialization.
/// Ephemeral: created per external event and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundReference {
    locator: ContentRef,
    declared_type: Option<String>,
    source_action: SourceAction,
}

impl InboundReference {
    /// Creates a new InboundReference
    #[must_use]
    pub fn new(
        locator: ContentRef,
        declared_type: Option<String>,
        source_action: SourceAction,
    ) -> Self {
        Self {
            locator,
            declared_type,
            source_action,
        }
    }

    /// The opaque locator for the external content
    #[must_use]
    pub fn locator(&self) -> &ContentRef {
        &self.locator
    }

    /// The declared content type, when the event carried one
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// The action that produced this reference
    #[must_use]
    pub fn source_action(&self) -> SourceAction {
        self.source_action
    }
}

/// A file copied into the application's private storage
///
/// The `absolute_path` always points at a completed, closed copy at
/// creation time. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFile {
    absolute_path: PathBuf,
    content_type: String,
    source_action: SourceAction,
}

impl MaterializedFile {
    /// Creates a new MaterializedFile
    #[must_use]
    pub fn new(absolute_path: PathBuf, content_type: String, source_action: SourceAction) -> Self {
        Self {
            absolute_path,
            content_type,
            source_action,
        }
    }

    /// Absolute path of the copy inside private storage
    #[must_use]
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Resolved content type of the copy
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The action that triggered materialization
    #[must_use]
    pub fn source_action(&self) -> SourceAction {
        self.source_action
    }
}

/// Wire payload delivered to the embedded runtime
///
/// Derived 1:1 from a [`MaterializedFile`]; has no independent lifecycle.
/// Key names match what the runtime's message channel expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Absolute path of the materialized copy
    pub file_path: String,
    /// Resolved content type
    pub mime_type: String,
    /// Wire action: `SEND` or `VIEW`
    pub action: String,
}

impl From<&MaterializedFile> for NotificationPayload {
    fn from(file: &MaterializedFile) -> Self {
        Self {
            file_path: file.absolute_path().to_string_lossy().into_owned(),
            mime_type: file.content_type().to_string(),
            action: file.source_action().as_wire_str().to_string(),
        }
    }
}
