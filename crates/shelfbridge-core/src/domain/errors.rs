//! Domain and boundary error types
//!
//! Every failure boundary in the core is expressed as an explicit type:
//! validation failures as [`DomainError`], materialization failures as
//! [`IntakeError`], and request-channel failures as [`RequestError`] with
//! stable wire codes. Nothing here ever escalates to a panic.

use thiserror::Error;

/// Errors that can occur when constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Content reference was empty or malformed
    #[error("Invalid content reference: {0}")]
    InvalidContentRef(String),

    /// Event id could not be parsed
    #[error("Invalid event id: {0}")]
    InvalidEventId(String),

    /// Action string is not one of the supported wire actions
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
}

/// Errors raised by the intake pipeline
///
/// Recoverable conditions (unsupported action, missing reference, missing
/// content type, duplicate event) are *not* errors: the pipeline reports
/// them as `Ok(None)` and logs them. Only stream open/copy failures reach
/// this type.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Opening the content reference or writing into private storage failed.
    /// The pipeline aborts for this event only; no notification is sent.
    #[error("I/O failure while materializing content: {source}")]
    Io {
        #[source]
        source: anyhow::Error,
    },
}

impl IntakeError {
    /// Wraps an adapter-level failure in the intake taxonomy
    pub fn io(source: anyhow::Error) -> Self {
        Self::Io { source }
    }
}

/// Errors returned across the inbound request channel
///
/// Each variant carries a stable wire code so the embedded runtime can
/// branch on it without parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A required argument was missing or had the wrong type
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested method is not handled by this bridge
    #[error("Method not implemented: {0}")]
    NotImplemented(String),
}

impl RequestError {
    /// Stable error code sent over the wire
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidArgument(_) => "INVALID_ARGUMENT",
            RequestError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }
}
