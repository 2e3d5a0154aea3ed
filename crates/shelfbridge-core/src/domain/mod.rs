//! Domain entities and pure logic
//!
//! Everything in this module is free of I/O. Ports and use cases build on
//! these types; adapters never define domain shapes of their own.

pub mod errors;
pub mod event;
pub mod extension;
pub mod intake;
pub mod newtypes;

pub use errors::{DomainError, IntakeError, RequestError};
pub use event::{InboundEvent, RuntimeRequest};
pub use extension::extension_for;
pub use intake::{InboundReference, MaterializedFile, NotificationPayload, SourceAction};
pub use newtypes::{ContentRef, EventId};
