//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ContentSource`] - Resolving external content references into bytes
//! - [`PrivateStorage`] - The process-private file root for materialized copies
//! - [`RuntimeChannel`] - Asynchronous message channel to the embedded runtime
//! - [`UrlHandler`] - The platform's default URL handler and its chooser

pub mod content_source;
pub mod runtime_channel;
pub mod storage;
pub mod url_handler;

pub use content_source::ContentSource;
pub use runtime_channel::RuntimeChannel;
pub use storage::PrivateStorage;
pub use url_handler::UrlHandler;
